//! Error types and exit codes for reckon
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (empty dataset, unknown user or item)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the reckon binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - empty dataset, unknown IDs (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ReckonError {
    fn from(err: rusqlite::Error) -> Self {
        ReckonError::Other(err.to_string())
    }
}

/// Errors that can occur while training models or scoring items
#[derive(Error, Debug)]
pub enum ReckonError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("unknown algorithm: {0} (expected: mean, user-user, item-item, or content)")]
    UnknownAlgorithm(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("cannot compute a mean over an empty vector")]
    EmptyVector,

    #[error("no ratings available to train a model")]
    NoRatings,

    #[error("unknown user: {id}")]
    UnknownUser { id: i64 },

    #[error("unknown item: {id}")]
    UnknownItem { id: i64 },

    #[error("malformed {path:?} line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),

    // Mirrors the exit code of the first failure
    #[error("{failed} of {total} request(s) failed; first: {first}")]
    Batch {
        failed: usize,
        total: usize,
        first: Box<ReckonError>,
    },
}

impl ReckonError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        ReckonError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ReckonError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a line-numbered parse error for an input file
    pub fn parse(path: impl Into<PathBuf>, line: usize, reason: impl std::fmt::Display) -> Self {
        ReckonError::Parse {
            path: path.into(),
            line,
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ReckonError::UnknownFormat(_)
            | ReckonError::UnknownAlgorithm(_)
            | ReckonError::UsageError(_)
            | ReckonError::InvalidValue { .. } => ExitCode::Usage,

            ReckonError::EmptyVector
            | ReckonError::NoRatings
            | ReckonError::UnknownUser { .. }
            | ReckonError::UnknownItem { .. }
            | ReckonError::Parse { .. } => ExitCode::Data,

            ReckonError::Io(_)
            | ReckonError::Json(_)
            | ReckonError::Toml(_)
            | ReckonError::FailedOperation { .. }
            | ReckonError::Other(_) => ExitCode::Failure,

            ReckonError::Batch { first, .. } => first.exit_code(),
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ReckonError::UnknownFormat(_) => "unknown_format",
            ReckonError::UnknownAlgorithm(_) => "unknown_algorithm",
            ReckonError::UsageError(_) => "usage_error",
            ReckonError::InvalidValue { .. } => "invalid_value",
            ReckonError::EmptyVector => "empty_vector",
            ReckonError::NoRatings => "no_ratings",
            ReckonError::UnknownUser { .. } => "unknown_user",
            ReckonError::UnknownItem { .. } => "unknown_item",
            ReckonError::Parse { .. } => "parse_error",
            ReckonError::Io(_) => "io_error",
            ReckonError::Json(_) => "json_error",
            ReckonError::Toml(_) => "toml_error",
            ReckonError::FailedOperation { .. } => "failed_operation",
            ReckonError::Other(_) => "other",
            ReckonError::Batch { .. } => "batch_failure",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for reckon operations
pub type Result<T> = std::result::Result<T, ReckonError>;
