//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use privsync_admin::StatementExecutor;
use privsync_core::{PrivsyncError, Result, ServerRejection};
use std::sync::Arc;

/// How a scripted statement fails
#[derive(Debug, Clone)]
pub enum Failure {
    /// The server refuses the statement
    Reject(String),
    /// The connection breaks before the server answers
    Transport(String),
}

impl Failure {
    fn to_error(&self) -> PrivsyncError {
        match self {
            Failure::Reject(message) => PrivsyncError::Rejected(ServerRejection {
                code: 1142,
                state: "42000".to_string(),
                message: message.clone(),
            }),
            Failure::Transport(message) => PrivsyncError::Connection(message.clone()),
        }
    }
}

struct ScriptedFailure {
    statement: String,
    failure: Failure,
    remaining: usize,
}

/// Mock executor for testing reconciliation logic without a server.
///
/// `SHOW GRANTS` queries return the configured report lines. Statements
/// registered with [`MockExecutor::failing`] fail the given number of times,
/// then succeed.
pub struct MockExecutor {
    grants: Vec<String>,
    fetch_failure: Option<Failure>,
    failures: parking_lot::Mutex<Vec<ScriptedFailure>>,
    /// Log of every statement and query received, in order
    pub statement_log: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            grants: Vec::new(),
            fetch_failure: None,
            failures: parking_lot::Mutex::new(Vec::new()),
            statement_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    /// Lines returned by `SHOW GRANTS`
    pub fn with_grants(mut self, lines: &[&str]) -> Self {
        self.grants = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_fetch_failure(mut self, failure: Failure) -> Self {
        self.fetch_failure = Some(failure);
        self
    }

    /// Fail `statement` the next `times` times it is executed
    pub fn failing(self, statement: impl Into<String>, times: usize, failure: Failure) -> Self {
        self.failures.lock().push(ScriptedFailure {
            statement: statement.into(),
            failure,
            remaining: times,
        });
        self
    }

    /// Always reject `statement`
    pub fn rejecting(self, statement: impl Into<String>, message: &str) -> Self {
        self.failing(statement, usize::MAX, Failure::Reject(message.to_string()))
    }

    pub fn statement_log(&self) -> Vec<String> {
        self.statement_log.lock().clone()
    }

    /// Statements other than `SHOW GRANTS` queries
    pub fn executed(&self) -> Vec<String> {
        self.statement_log()
            .into_iter()
            .filter(|s| !s.starts_with("SHOW GRANTS"))
            .collect()
    }

    pub fn count(&self, statement: &str) -> usize {
        self.statement_log().iter().filter(|s| *s == statement).count()
    }
}

#[async_trait]
impl StatementExecutor for MockExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.statement_log.lock().push(sql.to_string());

        let mut failures = self.failures.lock();
        if let Some(scripted) = failures
            .iter_mut()
            .find(|f| f.statement == sql && f.remaining > 0)
        {
            scripted.remaining -= 1;
            return Err(scripted.failure.to_error());
        }
        Ok(())
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<String>> {
        self.statement_log.lock().push(sql.to_string());

        if let Some(failure) = &self.fetch_failure {
            return Err(failure.to_error());
        }
        Ok(self.grants.clone())
    }
}

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
