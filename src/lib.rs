pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod tools;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{
    CliOverrides, Config, ExitCodeEntry, ExtractorConfig, FormatterConfig, OutputConfig, SearchConfig,
};
pub use error::{ClmError, Result, UserFriendlyError};
pub use report::RunReport;

// Core functionality re-exports
pub use scanner::{resolve_search_path, DirectoryScanner, FileLocator};
pub use tools::{ExitCodeTable, ExtractOutcome, Extractor, FormatOutcome, Formatter, ToolLocator};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One claim extraction request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub identifier: String,
    pub search_path: PathBuf,
}

impl SearchRequest {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(identifier: S, search_path: P) -> Self {
        Self {
            identifier: identifier.into(),
            search_path: search_path.into(),
        }
    }
}

/// Runs the locate, format, extract and finalize pipeline.
pub struct IndentClm {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl IndentClm {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an IndentClm instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = OutputMode::from(&cli_args.output_format);

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Locate the input file, format it, extract the claim and clean up.
    ///
    /// On success only `INDENT.<identifier>` remains. When the extraction
    /// produced nothing, the empty record file is removed and the formatted
    /// file is kept for inspection.
    pub fn run(&self, request: &SearchRequest) -> Result<RunReport> {
        self.run_with(request, |locator| locator.locate())
    }

    /// Same as [`IndentClm::run`], with the extraction tool resolved by
    /// `locate_tool` once the search directory has been listed.
    pub fn run_with<F>(&self, request: &SearchRequest, locate_tool: F) -> Result<RunReport>
    where
        F: FnOnce(&ToolLocator<'_>) -> Result<PathBuf>,
    {
        let search_path = request.search_path.as_path();
        let extension = self.config.search.extension.as_str();

        let entries = DirectoryScanner::list_entries(search_path)?;
        let tool = locate_tool(&ToolLocator::new(&self.config.extractor))?;

        self.output_formatter.info(&format!(
            "Looking for {} file in {}",
            extension,
            search_path.display()
        ));
        let input_name = FileLocator::new(extension, &self.config.output.prefix)
            .locate(&entries, search_path)?
            .to_string();

        let formatted = self.config.output_path(&input_name);
        let record = self.config.output_path(&request.identifier);

        // The tool would append to the file it reads, and success would then
        // delete the record along with the formatted file.
        if formatted == record {
            return Err(ClmError::OutputCollision {
                identifier: request.identifier.clone(),
                path: record,
            });
        }

        self.output_formatter.start_operation(&format!(
            "{} file {} found! Formatting file...",
            extension, input_name
        ));
        let formatting = self.format(&search_path.join(&input_name), &formatted)?;

        self.output_formatter.start_operation(&format!(
            "File formatted. Attempting to extract claim with unique identifier {} from file...",
            request.identifier
        ));
        let result = self.progress_manager.with_spinner("Extracting claim", || {
            Extractor::new(&tool).run(&formatted, &request.identifier, &record)
        });

        let extraction = match result {
            Ok(extraction) => extraction,
            Err(e) => {
                remove_if_present(&record);
                return Err(e);
            }
        };

        if !extraction.input_was_nonempty {
            self.output_formatter.warning(&format!(
                "Formatted file {} was empty",
                formatted.display()
            ));
        }

        self.finalize(request, &formatted, &record, extraction.output_size)?;

        Ok(RunReport {
            identifier: request.identifier.clone(),
            extension: extension.to_string(),
            search_path: request.search_path.clone(),
            input_file: input_name,
            formatting,
            extraction,
            finished_at: Utc::now(),
        })
    }

    fn format(&self, input: &Path, formatted: &Path) -> Result<FormatOutcome> {
        let result = self.progress_manager.with_spinner("Formatting file", || {
            Formatter::new(&self.config.formatter).run(input, formatted)
        });

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                remove_if_present(formatted);
                return Err(e);
            }
        };

        if outcome.succeeded() {
            self.output_formatter.info(&outcome.description);
        } else {
            self.output_formatter.warning(&outcome.description);
            warn!(exit_code = ?outcome.exit_code, "formatter reported an error");

            if self.config.formatter.strict {
                remove_if_present(formatted);
                return Err(ClmError::FormatterFailed {
                    code: outcome.exit_code,
                    description: outcome.description,
                });
            }
        }

        Ok(outcome)
    }

    /// The size of the record file decides the outcome of the run.
    fn finalize(
        &self,
        request: &SearchRequest,
        formatted: &Path,
        record: &Path,
        record_size: u64,
    ) -> Result<()> {
        if record_size > 0 {
            std::fs::remove_file(formatted)?;
            info!(record = %record.display(), record_size, "claim extracted");
            Ok(())
        } else {
            std::fs::remove_file(record)?;
            Err(ClmError::IdentifierNotFound {
                identifier: request.identifier.clone(),
                search_path: request.search_path.clone(),
            })
        }
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ClmError) {
        self.output_formatter.print_user_friendly_error(error);
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::sample().save_to_file(output_path)
    }
}

fn remove_if_present(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "could not remove intermediate file");
        }
    }
}
