use crate::error::{ClmError, Result};
use std::path::Path;
use tracing::debug;

/// Picks the raw input file out of a directory listing.
///
/// Matching is a case-sensitive substring test on the whole name, not a
/// suffix test, so `claims.xml.bak` matches `.xml`.
pub struct FileLocator<'a> {
    extension: &'a str,
    output_prefix: &'a str,
}

impl<'a> FileLocator<'a> {
    pub fn new(extension: &'a str, output_prefix: &'a str) -> Self {
        Self {
            extension,
            output_prefix,
        }
    }

    pub fn is_candidate(&self, name: &str) -> bool {
        !name.contains(self.output_prefix) && name.contains(self.extension)
    }

    /// First candidate in the order given.
    pub fn locate<'n, S: AsRef<str>>(
        &self,
        names: &'n [S],
        search_path: &Path,
    ) -> Result<&'n str> {
        let found = names
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|name| self.is_candidate(name));

        match found {
            Some(name) => {
                debug!(file = name, "located input file");
                Ok(name)
            }
            None => Err(ClmError::NoInputFile {
                extension: self.extension.to_string(),
                search_path: search_path.to_path_buf(),
            }),
        }
    }
}
