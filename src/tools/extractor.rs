use super::{file_size, open_capture};
use crate::error::{ClmError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutcome {
    pub output: PathBuf,
    pub exit_code: Option<i32>,
    /// Whether the formatted file handed to the tool had any content. This
    /// says nothing about whether a record was found.
    pub input_was_nonempty: bool,
    pub output_size: u64,
}

pub struct Extractor<'a> {
    tool: &'a Path,
}

impl<'a> Extractor<'a> {
    pub fn new(tool: &'a Path) -> Self {
        Self { tool }
    }

    /// Run `<tool> <formatted> <identifier>` with stdout appended to `output`.
    pub fn run(&self, formatted: &Path, identifier: &str, output: &Path) -> Result<ExtractOutcome> {
        info!(tool = %self.tool.display(), identifier, "extracting record");

        let status = Command::new(self.tool)
            .arg(formatted)
            .arg(identifier)
            .stdout(Stdio::from(open_capture(output)?))
            .status()
            .map_err(|source| ClmError::ToolSpawn {
                program: self.tool.display().to_string(),
                source,
            })?;

        let input_was_nonempty = file_size(formatted) != 0;
        if !input_was_nonempty {
            warn!(formatted = %formatted.display(), "extraction ran against an empty formatted file");
        }

        let output_size = file_size(output);
        debug!(exit_code = ?status.code(), output_size, "extraction tool finished");

        Ok(ExtractOutcome {
            output: output.to_path_buf(),
            exit_code: status.code(),
            input_was_nonempty,
            output_size,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn grep_tool(dir: &Path) -> PathBuf {
        let path = dir.join("getClmXml.pl");
        fs::write(&path, "#!/bin/sh\ngrep \"$2\" \"$1\"\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_extracts_matching_record() {
        let dir = tempdir().unwrap();
        let tool = grep_tool(dir.path());
        let formatted = dir.path().join("INDENT.data001.xml");
        fs::write(&formatted, "<claim id=\"CLM123\"/>\n<claim id=\"CLM999\"/>\n").unwrap();
        let output = dir.path().join("INDENT.CLM123");

        let outcome = Extractor::new(&tool).run(&formatted, "CLM123", &output).unwrap();

        assert!(outcome.input_was_nonempty);
        assert!(outcome.output_size > 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "<claim id=\"CLM123\"/>\n");
    }

    #[test]
    fn test_unknown_identifier_leaves_empty_output() {
        let dir = tempdir().unwrap();
        let tool = grep_tool(dir.path());
        let formatted = dir.path().join("INDENT.data001.xml");
        fs::write(&formatted, "<claim id=\"CLM999\"/>\n").unwrap();
        let output = dir.path().join("INDENT.CLM123");

        let outcome = Extractor::new(&tool).run(&formatted, "CLM123", &output).unwrap();

        assert!(outcome.input_was_nonempty);
        assert_eq!(outcome.output_size, 0);
        assert!(output.exists());
    }

    #[test]
    fn test_empty_formatted_input_is_flagged() {
        let dir = tempdir().unwrap();
        let tool = grep_tool(dir.path());
        let formatted = dir.path().join("INDENT.data001.xml");
        fs::write(&formatted, "").unwrap();
        let output = dir.path().join("INDENT.CLM123");

        let outcome = Extractor::new(&tool).run(&formatted, "CLM123", &output).unwrap();
        assert!(!outcome.input_was_nonempty);
    }

    #[test]
    fn test_tool_not_executable() {
        let dir = tempdir().unwrap();
        let tool = dir.path().join("getClmXml.pl");
        fs::write(&tool, "not a script").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o644)).unwrap();

        let result = Extractor::new(&tool).run(
            &dir.path().join("in"),
            "CLM123",
            &dir.path().join("out"),
        );
        assert!(matches!(result, Err(ClmError::ToolSpawn { .. })));
    }
}
