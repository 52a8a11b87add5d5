//! Error types for the sweep engine.

use thiserror::Error;

/// Result type alias for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Errors that can occur while configuring a rule or running a simulation.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Rule submission rejected; nothing was stored
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Account record from the balance provider lacks a required field
    #[error("Malformed account {account}: {reason}")]
    MalformedAccount { account: String, reason: String },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: banksweep <balances.json|balances.csv> [--threshold <amount> --frequency <daily|weekly|monthly>] [--sweep-amount <amount>]")]
    MissingArgument,

    /// Unrecognized or incomplete command-line option
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SweepError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SweepError::Validation {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(account: impl Into<String>, reason: impl Into<String>) -> Self {
        SweepError::MalformedAccount {
            account: account.into(),
            reason: reason.into(),
        }
    }
}
