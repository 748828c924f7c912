use crate::error::{ClmError, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Lists the immediate entries of a search directory.
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Entry names in listing order. Subdirectories are not descended into
    /// but their names are still returned.
    pub fn list_entries<P: AsRef<Path>>(root: P) -> Result<Vec<String>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ClmError::SearchPathNotFound {
                path: root_path.to_path_buf(),
            });
        }

        let mut names = Vec::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(|err| match err.into_io_error() {
                Some(io) => ClmError::Io(io),
                None => ClmError::SearchPathNotFound {
                    path: root_path.to_path_buf(),
                },
            })?;

            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => debug!(entry = ?entry.file_name(), "skipping non UTF-8 entry"),
            }
        }

        debug!(count = names.len(), dir = %root_path.display(), "listed search directory");
        Ok(names)
    }
}
