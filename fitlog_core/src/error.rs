//! Error types for the fitlog_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric workout field named in validation failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkoutField {
    Sets,
    Reps,
    Weight,
    Duration,
}

impl fmt::Display for WorkoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkoutField::Sets => "sets",
            WorkoutField::Reps => "reps",
            WorkoutField::Weight => "weight",
            WorkoutField::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Recoverable validation failures.
///
/// A record that fails with any of these is never persisted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Free-text workout had fewer than four lines
    #[error("Insufficient workout data: expected at least 4 lines, got {lines}")]
    InsufficientData { lines: usize },

    /// The sets/reps line did not look like `4 sets x 10 reps`
    #[error("Invalid sets/reps format: {line:?}")]
    InvalidSetsRepsFormat { line: String },

    /// A numeric field could not be read as a number
    #[error("Field '{field}' is not numeric: {value:?}")]
    NonNumericField { field: WorkoutField, value: String },

    /// A numeric field violated `sets>0, reps>0, weight>=0, duration>0`
    #[error("Field '{field}' is out of range: {value}")]
    OutOfRangeField { field: WorkoutField, value: String },

    /// Category or workout name absent on direct creation
    #[error("Required workout field '{0}' is missing")]
    MissingRequiredField(&'static str),

    /// Date string in none of the accepted formats
    #[error("Invalid date {0:?}: expected MM/DD/YYYY, YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    /// Calorie calculator input out of range
    #[error("Invalid {field}: {message}")]
    InvalidProfile {
        field: &'static str,
        message: &'static str,
    },
}

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before persistence
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
