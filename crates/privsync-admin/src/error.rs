//! Error types for privilege management

use crate::PrivilegeScope;
use privsync_core::PrivsyncError;
use thiserror::Error;

/// A `SHOW GRANTS` row that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse grants row ({reason}): {input:?}")]
pub struct ParseError {
    /// What was wrong, naming the offending token where there is one
    pub reason: String,
    /// The complete input line
    pub input: String,
}

impl ParseError {
    pub(crate) fn new(reason: impl Into<String>, input: &str) -> Self {
        Self {
            reason: reason.into(),
            input: input.to_string(),
        }
    }
}

/// Errors raised while building, reading or applying privileges
#[derive(Error, Debug)]
pub enum GrantError {
    /// A required field is missing or blank
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The privilege name is not in the catalog for its scope
    #[error("{scope} privilege \"{name}\" not supported by {server}")]
    UnsupportedPrivilege {
        scope: PrivilegeScope,
        name: String,
        server: String,
    },

    /// The server refused a statement it received
    #[error("{message}")]
    RemoteRejection {
        code: u16,
        state: String,
        message: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Rolling back a failed batch did not complete.
    ///
    /// Every compensation is still attempted after one fails; this reports
    /// the earliest compensation, in replay order, that exhausted its
    /// attempts.
    #[error("Compensation failed while rolling back ({cause}): `{statement}`: {compensation}")]
    CompensationFailed {
        /// The failure that triggered the rollback
        cause: Box<GrantError>,
        /// Last error of the compensation that could not be applied
        compensation: Box<GrantError>,
        /// The earliest compensating statement that failed
        statement: String,
    },

    /// An action has no inverse relative to the baseline snapshot
    #[error("No compensation for action: {0}")]
    MissingCompensation(String),

    /// Transport or driver failure below the server
    #[error(transparent)]
    Executor(PrivsyncError),

    #[error("Catalog configuration error: {0}")]
    Configuration(String),
}

impl GrantError {
    /// True when the server itself refused the statement
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, GrantError::RemoteRejection { .. })
    }
}

impl From<PrivsyncError> for GrantError {
    fn from(err: PrivsyncError) -> Self {
        match err {
            PrivsyncError::Rejected(rejection) => GrantError::RemoteRejection {
                code: rejection.code,
                state: rejection.state,
                message: rejection.message,
            },
            other => GrantError::Executor(other),
        }
    }
}

/// Result type alias for privilege management
pub type Result<T> = std::result::Result<T, GrantError>;

#[cfg(test)]
mod tests {
    use super::*;
    use privsync_core::ServerRejection;

    #[test]
    fn test_rejection_maps_to_remote_rejection() {
        let err: GrantError = PrivsyncError::Rejected(ServerRejection {
            code: 1142,
            state: "42000".to_string(),
            message: "GRANT command denied to user 'app'@'%'".to_string(),
        })
        .into();

        assert!(err.is_remote_rejection());
        assert_eq!(err.to_string(), "GRANT command denied to user 'app'@'%'");
    }

    #[test]
    fn test_transport_error_is_not_remote_rejection() {
        let err: GrantError = PrivsyncError::Connection("broken pipe".to_string()).into();
        assert!(!err.is_remote_rejection());
        assert!(matches!(err, GrantError::Executor(_)));
    }

    #[test]
    fn test_unsupported_privilege_message() {
        let err = GrantError::UnsupportedPrivilege {
            scope: PrivilegeScope::Table,
            name: "SUPER".to_string(),
            server: "MariaDB".to_string(),
        };
        assert_eq!(err.to_string(), "Table privilege \"SUPER\" not supported by MariaDB");
    }

    #[test]
    fn test_compensation_failed_exposes_both_halves() {
        let err = GrantError::CompensationFailed {
            cause: Box::new(GrantError::RemoteRejection {
                code: 1044,
                state: "42000".to_string(),
                message: "Access denied".to_string(),
            }),
            compensation: Box::new(GrantError::Executor(PrivsyncError::Connection(
                "lost connection".to_string(),
            ))),
            statement: "REVOKE SELECT ON *.* FROM `app`@`%`;".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("Access denied"));
        assert!(message.contains("lost connection"));
        assert!(message.contains("REVOKE SELECT ON *.* FROM `app`@`%`;"));
    }
}
