pub mod exit_codes;
pub mod extractor;
pub mod formatter;
pub mod tool_locator;

pub use exit_codes::ExitCodeTable;
pub use extractor::{ExtractOutcome, Extractor};
pub use formatter::{FormatOutcome, Formatter};
pub use tool_locator::ToolLocator;

use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open a capture file for a subprocess's stdout, creating it if needed and
/// appending otherwise.
pub(crate) fn open_capture(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Size of `path`, treating a missing file as empty.
pub(crate) fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
