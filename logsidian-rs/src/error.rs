//! Error types and exit codes for logsidian.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
    pub const OUTPUT_EXISTS: i32 = 3;
    pub const INVALID_APP_CONFIG: i32 = 5;
}

/// Main error type for migration operations.
///
/// The text transforms never fail; every variant here comes from the
/// filesystem and configuration layer around them.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Input not found: {0}. Provide a valid input path.")]
    InputNotFound(PathBuf),

    #[error("Output already exists: {0}. Provide a different path or pass --force.")]
    OutputExists(PathBuf),

    #[error("Invalid app config in {path}: {message}")]
    InvalidAppConfig { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

impl MigrateError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MigrateError::InputNotFound(_) => ExitCode::InputNotFound,
            MigrateError::OutputExists(_) => ExitCode::OutputExists,
            MigrateError::InvalidAppConfig { .. } => ExitCode::InvalidAppConfig,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    InputNotFound,
    OutputExists,
    InvalidAppConfig,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::InputNotFound => exit_code::INPUT_NOT_FOUND,
            ExitCode::OutputExists => exit_code::OUTPUT_EXISTS,
            ExitCode::InvalidAppConfig => exit_code::INVALID_APP_CONFIG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            MigrateError::InputNotFound(PathBuf::from("graph")).exit_code(),
            ExitCode::InputNotFound
        );
        assert_eq!(
            MigrateError::OutputExists(PathBuf::from("vault")).exit_code(),
            ExitCode::OutputExists
        );
        assert_eq!(
            MigrateError::InvalidAppConfig {
                path: PathBuf::from("app.json"),
                message: "bad".to_string(),
            }
            .exit_code(),
            ExitCode::InvalidAppConfig
        );
        assert_eq!(
            MigrateError::Other("boom".to_string()).exit_code(),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), exit_code::SUCCESS);
        assert_eq!(ExitCode::GeneralError.code(), 1);
        assert_eq!(ExitCode::InputNotFound.code(), 2);
        assert_eq!(ExitCode::OutputExists.code(), 3);
        assert_eq!(ExitCode::InvalidAppConfig.code(), 5);
    }

    #[test]
    fn test_input_not_found_message() {
        let err = MigrateError::InputNotFound(PathBuf::from("graph"));
        assert!(err.to_string().contains("graph"));
        assert!(err.to_string().contains("Provide a valid input path"));
    }
}
