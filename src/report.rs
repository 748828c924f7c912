use crate::tools::{ExtractOutcome, FormatOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub identifier: String,
    pub extension: String,
    pub search_path: PathBuf,
    pub input_file: String,
    pub formatting: FormatOutcome,
    pub extraction: ExtractOutcome,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// The retained extracted-record file.
    pub fn record_file(&self) -> &Path {
        &self.extraction.output
    }

    pub fn record_size(&self) -> u64 {
        self.extraction.output_size
    }
}
