use serde::Serialize;
use thiserror::Error;

/// Unified error type for linecmp.
///
/// Serializes to `{"type": ..., "details": {...}}` for JSON output.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to decode {path} as {encoding}")]
    Decode { path: String, encoding: String },

    #[error("Failed to create output directory {path}: {message}")]
    OutputDir { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    OutputWrite { path: String, message: String },
}

impl AppError {
    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an Input Not Found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a Read error
    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an Output Write error
    pub fn output_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error stops the whole comparison.
    ///
    /// Only a single output file failing to write is non-fatal: the other
    /// files are still written.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::OutputWrite { .. })
    }
}

// Convert from ConfigError
impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

// Convert from IndexError
impl From<crate::index::IndexError> for AppError {
    fn from(err: crate::index::IndexError) -> Self {
        use crate::index::IndexError;
        match err {
            IndexError::NotFound(path) => AppError::input_not_found(path.display().to_string()),
            IndexError::Io { path, source } => {
                AppError::read(path.display().to_string(), source.to_string())
            }
            IndexError::Decode { path, encoding } => AppError::Decode {
                path: path.display().to_string(),
                encoding: encoding.to_owned(),
            },
        }
    }
}

// Convert from ReportError
impl From<crate::report::ReportError> for AppError {
    fn from(err: crate::report::ReportError) -> Self {
        use crate::report::ReportError;
        match err {
            ReportError::CreateDir { path, source } => AppError::OutputDir {
                path: path.display().to_string(),
                message: source.to_string(),
            },
            ReportError::Write { path, source } => {
                AppError::output_write(path.display().to_string(), source.to_string())
            }
        }
    }
}

// Convert to String for the CLI error surface
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
