use super::{file_size, open_capture, ExitCodeTable};
use crate::config::FormatterConfig;
use crate::error::{ClmError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Result of one formatter run. The captured output is left on disk whatever
/// the exit status was.
#[derive(Debug, Clone, Serialize)]
pub struct FormatOutcome {
    pub output: PathBuf,
    pub exit_code: Option<i32>,
    pub description: String,
    pub output_size: u64,
}

impl FormatOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub struct Formatter<'a> {
    config: &'a FormatterConfig,
    codes: ExitCodeTable,
}

impl<'a> Formatter<'a> {
    /// Builds the exit-code table from the xmllint defaults plus any
    /// configured entries, which take precedence.
    pub fn new(config: &'a FormatterConfig) -> Self {
        let codes = config
            .exit_codes
            .iter()
            .fold(ExitCodeTable::default(), |table, entry| {
                table.with_entry(entry.code, entry.description.as_str())
            });

        Self { config, codes }
    }

    /// Run `<program> <args...> <input>` with stdout appended to `output`.
    /// Blocks until the formatter exits.
    pub fn run(&self, input: &Path, output: &Path) -> Result<FormatOutcome> {
        info!(program = %self.config.program, input = %input.display(), "formatting input file");

        // The Command owns the only handle to the capture file; it is closed
        // when the statement ends, before anyone reads the output.
        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(input)
            .stdout(Stdio::from(open_capture(output)?))
            .status()
            .map_err(|source| ClmError::ToolSpawn {
                program: self.config.program.clone(),
                source,
            })?;

        let exit_code = status.code();
        let description = self.codes.describe(exit_code).to_string();
        let output_size = file_size(output);

        debug!(?exit_code, output_size, "formatter finished");

        Ok(FormatOutcome {
            output: output.to_path_buf(),
            exit_code,
            description,
            output_size,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::ExitCodeEntry;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config_for(program: &Path) -> FormatterConfig {
        FormatterConfig {
            program: program.display().to_string(),
            args: vec!["--format".to_string(), "--recover".to_string()],
            strict: false,
            exit_codes: Vec::new(),
        }
    }

    #[test]
    fn test_successful_format_captures_stdout() {
        let dir = tempdir().unwrap();
        // $1 and $2 are the flags, $3 is the input file.
        let script = write_script(dir.path(), "fmt", "cat \"$3\"");
        let input = dir.path().join("data001.xml");
        fs::write(&input, "<claims><claim id=\"CLM123\"/></claims>\n").unwrap();
        let output = dir.path().join("INDENT.data001.xml");

        let config = config_for(&script);
        let outcome = Formatter::new(&config).run(&input, &output).unwrap();

        assert!(outcome.succeeded());
        assert_eq!(outcome.description, "Successfully performed xmllint on file");
        assert!(outcome.output_size > 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<claims><claim id=\"CLM123\"/></claims>\n"
        );
    }

    #[test]
    fn test_flags_are_passed_before_input() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "fmt", "echo \"$1 $2\"");
        let input = dir.path().join("data001.xml");
        fs::write(&input, "<claims/>").unwrap();
        let output = dir.path().join("out");

        let config = config_for(&script);
        Formatter::new(&config).run(&input, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "--format --recover\n");
    }

    #[test]
    fn test_nonzero_exit_is_reported_and_output_kept() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "fmt", "exit 3");
        let input = dir.path().join("data001.xml");
        fs::write(&input, "<claims>").unwrap();
        let output = dir.path().join("INDENT.data001.xml");

        let config = config_for(&script);
        let outcome = Formatter::new(&config).run(&input, &output).unwrap();

        assert!(!outcome.succeeded());
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(outcome.description, "Validation error");
        assert!(output.exists());
        assert_eq!(outcome.output_size, 0);
    }

    #[test]
    fn test_output_is_appended() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "fmt", "echo formatted");
        let input = dir.path().join("data001.xml");
        fs::write(&input, "<claims/>").unwrap();
        let output = dir.path().join("INDENT.data001.xml");
        fs::write(&output, "previous\n").unwrap();

        let config = config_for(&script);
        Formatter::new(&config).run(&input, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\nformatted\n");
    }

    #[test]
    fn test_custom_exit_code_description() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "fmt", "exit 42");
        let input = dir.path().join("data001.xml");
        fs::write(&input, "<claims/>").unwrap();
        let output = dir.path().join("out");

        let mut config = config_for(&script);
        config.exit_codes.push(ExitCodeEntry {
            code: 42,
            description: "Site specific failure".to_string(),
        });
        let outcome = Formatter::new(&config).run(&input, &output).unwrap();

        assert_eq!(outcome.description, "Site specific failure");
    }

    #[test]
    fn test_missing_program() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("no-such-formatter"));
        let input = dir.path().join("data001.xml");
        let output = dir.path().join("out");

        let result = Formatter::new(&config).run(&input, &output);
        assert!(matches!(result, Err(ClmError::ToolSpawn { .. })));
    }
}
