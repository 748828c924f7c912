use crate::config::ExtractorConfig;
use crate::error::{ClmError, Result};
use std::env::VarError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Finds the extraction tool inside the directory named by an environment
/// variable.
pub struct ToolLocator<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> ToolLocator<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn locate(&self) -> Result<PathBuf> {
        self.resolve(std::env::var(&self.config.env_var))
    }

    /// Resolve from an already-performed variable lookup.
    pub fn resolve(&self, lookup: std::result::Result<String, VarError>) -> Result<PathBuf> {
        let dir = match lookup {
            Ok(value) => PathBuf::from(value),
            Err(VarError::NotPresent) => {
                return Err(ClmError::ToolEnvUnset {
                    var: self.config.env_var.clone(),
                })
            }
            Err(VarError::NotUnicode(raw)) => {
                return Err(ClmError::ToolLookup {
                    message: format!(
                        "${} is not valid Unicode: {:?}",
                        self.config.env_var, raw
                    ),
                })
            }
        };

        if !dir.exists() {
            return Err(ClmError::ToolDirNotFound {
                var: self.config.env_var.clone(),
                path: dir,
            });
        }

        self.find_in(&dir)
    }

    /// First entry of `dir` whose name contains the tool name.
    pub fn find_in(&self, dir: &Path) -> Result<PathBuf> {
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1);

        for entry in walker {
            let entry = entry.map_err(|e| ClmError::ToolLookup {
                message: format!("failed to list {}: {}", dir.display(), e),
            })?;

            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.contains(&self.config.tool_name));

            if matches {
                let path = dir.join(entry.file_name());
                debug!(tool = %path.display(), "located extraction tool");
                return Ok(path);
            }
        }

        Err(ClmError::ToolNotFound {
            tool: self.config.tool_name.clone(),
            dir: dir.to_path_buf(),
        })
    }
}
