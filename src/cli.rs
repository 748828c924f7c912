use crate::config::{CliOverrides, Config};
use crate::error::{ClmError, Result};
use crate::scanner::resolve_search_path;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "indentclm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Format a claims file and extract one claim by its unique identifier")]
#[command(
    long_about = "indentclm finds the first file with the given extension in the search \
                  directory, re-indents it with xmllint into INDENT.<file>, then runs \
                  getClmXml.pl from $PERLPATH to write the claim matching the identifier \
                  into INDENT.<identifier>."
)]
#[command(after_help = "EXAMPLES:\n  \
    indentclm --id CLM123\n  \
    indentclm --id CLM123 --folder batch7\n  \
    indentclm --id CLM123 --path /data/claims --extension .dat\n  \
    indentclm --id CLM123 --config my-config.toml --output-format json")]
pub struct Cli {
    /// Unique identifier of the claim to extract
    #[arg(long = "id", visible_alias = "identifier", value_name = "IDENTIFIER")]
    pub identifier: Option<String>,

    /// Extension substring of the file to search for (default: .xml)
    #[arg(long = "x", visible_aliases = ["ext", "extension"], value_name = "EXTENSION")]
    pub extension: Option<String>,

    /// Full path of the directory to search. Subdirectories are not searched.
    #[arg(long = "p", visible_alias = "path", value_name = "DIR")]
    pub search_path: Option<PathBuf>,

    /// Subdirectory of the default search root (ignored when --path is given)
    #[arg(long = "f", visible_alias = "folder", value_name = "NAME")]
    pub folder: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Directory where INDENT.* files are written (default: current directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Fail the run when the formatter exits with a nonzero status
    #[arg(long)]
    pub strict_format: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show the resolved search without running any tool")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_extension(self.extension.clone())
            .with_output_dir(self.output_dir.clone())
            .with_strict_format(self.strict_format)
    }

    /// The identifier as given, or `MissingIdentifier` when absent or blank.
    pub fn require_identifier(&self) -> Result<&str> {
        match self.identifier.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(ClmError::MissingIdentifier),
        }
    }

    pub fn resolve_search_path(&self, config: &Config) -> PathBuf {
        resolve_search_path(
            &config.search.default_root,
            self.folder.as_deref(),
            self.search_path.as_deref(),
        )
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
