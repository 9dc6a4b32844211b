//! Error types for privsync

use thiserror::Error;

/// A statement the server received and refused to execute.
///
/// Carries the server's error code, SQLSTATE and message verbatim so callers
/// can report the backend's own explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRejection {
    pub code: u16,
    pub state: String,
    pub message: String,
}

impl std::fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ERROR {} ({}): {}", self.code, self.state, self.message)
    }
}

/// Core error type for privsync operations
#[derive(Error, Debug)]
pub enum PrivsyncError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Server rejected statement: {0}")]
    Rejected(ServerRejection),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrivsyncError {
    /// True when the server itself refused the statement, as opposed to a
    /// transport or local failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, PrivsyncError::Rejected(_))
    }
}

/// Result type alias for privsync operations
pub type Result<T> = std::result::Result<T, PrivsyncError>;
