use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClmError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No unique identifier included to search claim for")]
    MissingIdentifier,

    #[error("Search path {} for file does not exist", path.display())]
    SearchPathNotFound { path: PathBuf },

    #[error("{extension} file not found in {}", search_path.display())]
    NoInputFile {
        extension: String,
        search_path: PathBuf,
    },

    #[error("Environment variable ${var} is not defined")]
    ToolEnvUnset { var: String },

    #[error("Directory {} from ${var} does not exist", path.display())]
    ToolDirNotFound { var: String, path: PathBuf },

    #[error("{tool} not found in {}", dir.display())]
    ToolNotFound { tool: String, dir: PathBuf },

    #[error("Unexpected failure while locating extraction tool: {message}")]
    ToolLookup { message: String },

    #[error("Failed to start {program}: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatter exited with {}: {description}", code.map_or("a signal".to_string(), |c| format!("code {}", c)))]
    FormatterFailed {
        code: Option<i32>,
        description: String,
    },

    #[error("Identifier {identifier} would be written to the formatted file itself: {}", path.display())]
    OutputCollision { identifier: String, path: PathBuf },

    #[error("Identifier {identifier} not found in search path {}", search_path.display())]
    IdentifierNotFound {
        identifier: String,
        search_path: PathBuf,
    },
}

impl ClmError {
    /// Process exit code for this error. Usage and configuration problems
    /// share clap's usage code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClmError::MissingIdentifier | ClmError::Config { .. } => 2,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ClmError {
    fn user_message(&self) -> String {
        match self {
            ClmError::SearchPathNotFound { path } => {
                format!(
                    "Search path {} for file does not exist. Please verify search path.",
                    path.display()
                )
            }
            ClmError::ToolNotFound { tool, dir } => {
                format!(
                    "{} not found in {}. Please verify path to {} file",
                    tool,
                    dir.display(),
                    tool
                )
            }
            ClmError::ToolSpawn { program, source } => {
                format!("Could not run {}: {}", program, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ClmError::MissingIdentifier => Some(
                "Pass the claim identifier with --id <IDENTIFIER>.".to_string()
            ),
            ClmError::SearchPathNotFound { .. } => Some(
                "Use --path for a full directory path, or --folder for a subdirectory of the default search root.".to_string()
            ),
            ClmError::NoInputFile { .. } => Some(
                "Check the directory contents or choose another extension with --extension. Files carrying the output prefix are skipped.".to_string()
            ),
            ClmError::ToolEnvUnset { var } => Some(format!(
                "Define ${var} in your .profile, for example: export {var}=$HOME/develop/perl"
            )),
            ClmError::ToolDirNotFound { var, .. } => Some(format!(
                "Point ${var} at the directory that contains the extraction script."
            )),
            ClmError::ToolNotFound { .. } => Some(
                "Copy the extraction script into the directory or fix the tool name in the configuration file.".to_string()
            ),
            ClmError::ToolSpawn { .. } => Some(
                "Ensure the program is installed, on PATH and executable.".to_string()
            ),
            ClmError::FormatterFailed { .. } => Some(
                "Inspect the input file, or drop --strict-format to continue past formatter errors.".to_string()
            ),
            ClmError::OutputCollision { .. } => Some(
                "The identifier equals the input file name. Pass the claim identifier, not a file name.".to_string()
            ),
            ClmError::IdentifierNotFound { .. } => Some(
                "Verify the identifier and that the located file is the one containing the claim.".to_string()
            ),
            ClmError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ClmError {
    fn from(error: toml::de::Error) -> Self {
        ClmError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClmError>;
