//! Connection trait

use crate::{QueryResult, Result, StatementResult};
use async_trait::async_trait;

/// A database connection
///
/// Statements are sent as complete SQL text; privilege management never binds
/// parameters because GRANT/REVOKE identifiers cannot be placeholders.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a statement that returns no rows (GRANT, REVOKE, DDL)
    async fn execute(&self, sql: &str) -> Result<StatementResult>;

    /// Execute a statement that returns rows (SELECT, SHOW)
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}
