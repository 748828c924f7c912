use crate::error::{ClmError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEARCH_ROOT: &str = "/export/home/claims";
pub const DEFAULT_EXTENSION: &str = ".xml";
pub const DEFAULT_OUTPUT_PREFIX: &str = "INDENT.";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub formatter: FormatterConfig,
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_root: PathBuf,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Marker prepended to generated file names. Input files containing it
    /// are never picked up again.
    pub prefix: String,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Treat a nonzero formatter exit status as fatal.
    pub strict: bool,
    /// Extra or replacement descriptions for formatter exit statuses.
    pub exit_codes: Vec<ExitCodeEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExitCodeEntry {
    pub code: i32,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Environment variable naming the directory that holds the tool.
    pub env_var: String,
    /// Substring matched against entries of that directory.
    pub tool_name: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_root: PathBuf::from(DEFAULT_SEARCH_ROOT),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            program: "xmllint".to_string(),
            args: vec!["--format".to_string(), "--recover".to_string()],
            strict: false,
            exit_codes: Vec::new(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            env_var: "PERLPATH".to_string(),
            tool_name: "getClmXml.pl".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ClmError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ClmError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ClmError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["indentclm.toml", ".indentclm.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    /// Apply command line overrides. An empty value leaves the configured
    /// setting in place.
    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(extension) = cli_args.extension.as_ref().filter(|e| !e.is_empty()) {
            self.search.extension = extension.clone();
        }

        if let Some(output_dir) = cli_args
            .output_dir
            .as_ref()
            .filter(|d| !d.as_os_str().is_empty())
        {
            self.output.directory = output_dir.clone();
        }

        if cli_args.strict_format {
            self.formatter.strict = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ClmError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ClmError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.extension.is_empty() {
            return Err(ClmError::Config {
                message: "Extension must not be empty".to_string(),
            });
        }

        // An empty prefix would exclude every file from the search.
        if self.output.prefix.is_empty() {
            return Err(ClmError::Config {
                message: "Output prefix must not be empty".to_string(),
            });
        }

        if self.formatter.program.trim().is_empty() {
            return Err(ClmError::Config {
                message: "Formatter program must be specified".to_string(),
            });
        }

        if self.extractor.env_var.is_empty() || self.extractor.tool_name.is_empty() {
            return Err(ClmError::Config {
                message: "Extractor env_var and tool_name must both be specified".to_string(),
            });
        }

        if !self.output.directory.is_dir() {
            return Err(ClmError::Config {
                message: format!(
                    "Output directory does not exist: {}",
                    self.output.directory.display()
                ),
            });
        }

        Ok(())
    }

    /// Path of a generated file named `<prefix><name>` in the output directory.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output
            .directory
            .join(format!("{}{}", self.output.prefix, name))
    }

    /// Defaults with a relative output directory, suitable for writing out
    /// as a starting configuration.
    pub fn sample() -> Self {
        let mut sample_config = Self::default();
        sample_config.output.directory = PathBuf::from(".");
        sample_config
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extension: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub strict_format: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_strict_format(mut self, strict: bool) -> Self {
        self.strict_format = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.extension, ".xml");
        assert_eq!(config.output.prefix, "INDENT.");
        assert_eq!(config.formatter.program, "xmllint");
        assert_eq!(config.formatter.args, vec!["--format", "--recover"]);
        assert!(!config.formatter.strict);
        assert_eq!(config.extractor.env_var, "PERLPATH");
        assert_eq!(config.extractor.tool_name, "getClmXml.pl");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.search.extension.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.prefix.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.directory = PathBuf::from("/definitely/not/a/real/dir");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.formatter.strict = true;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(loaded_config.formatter.strict);
        assert_eq!(loaded_config.search.extension, config.search.extension);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[formatter]\nprogram = \"/usr/local/bin/xmllint\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.formatter.program, "/usr/local/bin/xmllint");
        assert_eq!(config.formatter.args, vec!["--format", "--recover"]);
        assert_eq!(config.search.extension, ".xml");
    }

    #[test]
    fn test_exit_code_entries() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "[[formatter.exit_codes]]\ncode = 42\ndescription = \"Site specific failure\""
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.formatter.exit_codes.len(), 1);
        assert_eq!(config.formatter.exit_codes[0].code, 42);
        assert_eq!(config.formatter.program, "xmllint");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/no/such/indentclm.toml");
        assert!(matches!(result, Err(ClmError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_extension(Some(".dat".to_string()))
            .with_output_dir(Some(PathBuf::from("/tmp/out")))
            .with_strict_format(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.search.extension, ".dat");
        assert_eq!(config.output.directory, PathBuf::from("/tmp/out"));
        assert!(config.formatter.strict);
    }

    #[test]
    fn test_empty_overrides_keep_configured_values() {
        let mut config = Config::default();
        config.output.directory = PathBuf::from("/work");

        let overrides = CliOverrides::new()
            .with_extension(Some(String::new()))
            .with_output_dir(Some(PathBuf::new()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.search.extension, ".xml");
        assert_eq!(config.output.directory, PathBuf::from("/work"));
    }

    #[test]
    fn test_output_path() {
        let mut config = Config::default();
        config.output.directory = PathBuf::from("/work");
        assert_eq!(
            config.output_path("data001.xml"),
            PathBuf::from("/work/INDENT.data001.xml")
        );
        assert_eq!(config.output_path("CLM123"), PathBuf::from("/work/INDENT.CLM123"));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::sample().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("directory = \".\""));
        assert!(sample.contains("[search]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[formatter]"));
        assert!(sample.contains("[extractor]"));
    }
}
