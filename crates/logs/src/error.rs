//! Error types for the structured logger

use crate::channel::Channel;
use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors raised while building, formatting or dispatching log records
#[derive(Error, Debug)]
pub enum LogError {
    /// A record carries a field outside its channel's allow-list.
    ///
    /// The record never reaches a sink; the caller has a bug.
    #[error("{key} not allowed in {channel} logs")]
    SchemaViolation { channel: Channel, key: String },

    /// A dynamic record was not a JSON object
    #[error("{channel} log record must be a JSON object")]
    NotAnObject { channel: Channel },

    /// Unknown severity name
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    /// Configuration could not be parsed
    #[error("logger configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sink failed to accept a line
    #[error("sink {sink} failed: {reason}")]
    Sink { sink: String, reason: String },
}

impl LogError {
    pub fn schema_violation(channel: Channel, key: impl Into<String>) -> Self {
        Self::SchemaViolation { channel, key: key.into() }
    }

    pub fn sink(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Sink { sink: sink.into(), reason: reason.into() }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }
}
