//! Error types for the tempus scheduler

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for tempus operations
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum TempusError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Submission rejected because the queue is at capacity (backpressure)
    #[error("Queue full: {message}")]
    QueueFull { message: String },

    /// Operation refused because the scheduler has stopped accepting
    #[error("Scheduler shutting down: {message}")]
    ShuttingDown { message: String },

    /// Malformed input (parsing, schema mismatches)
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TempusError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a queue-full rejection
    pub fn queue_full(message: impl Into<String>) -> Self {
        Self::QueueFull {
            message: message.into(),
        }
    }

    /// Create a shutting-down refusal
    pub fn shutting_down(message: impl Into<String>) -> Self {
        Self::ShuttingDown {
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    ///
    /// A full queue drains as workers dispatch, so retrying (or backing off)
    /// is meaningful. A scheduler that stopped accepting never starts again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QueueFull { .. } | Self::Io { .. })
    }
}

/// Conversion from std::io::Error
impl From<std::io::Error> for TempusError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{}", err))
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for TempusError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("{}", err))
    }
}
