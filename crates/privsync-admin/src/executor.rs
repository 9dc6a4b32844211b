//! Statement execution seam
//!
//! The reconciliation engine only needs two things from a server: run a
//! statement, and run a query whose rows are single text values. Rejections
//! by the server surface as [`PrivsyncError::Rejected`] so callers can tell
//! them apart from transport failures.

use async_trait::async_trait;
use privsync_core::{Connection, PrivsyncError, Result};
use std::sync::Arc;

/// Executes SQL text against a server
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute a statement that returns no rows
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Execute a query and return the first column of every row as text
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<String>>;
}

/// [`StatementExecutor`] over a database [`Connection`]
#[derive(Clone)]
pub struct ConnectionExecutor {
    connection: Arc<dyn Connection>,
}

impl ConnectionExecutor {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }
}

#[async_trait]
impl StatementExecutor for ConnectionExecutor {
    #[tracing::instrument(skip(self, sql), fields(driver = %self.connection.driver_name(), sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str) -> Result<()> {
        self.connection.execute(sql).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, sql), fields(driver = %self.connection.driver_name(), sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<String>> {
        let result = self.connection.query(sql).await?;

        let mut rows = Vec::with_capacity(result.rows.len());
        for row in &result.rows {
            match row.get(0) {
                None => continue,
                Some(value) if value.is_null() => continue,
                Some(value) => {
                    let text = value.as_text().ok_or_else(|| {
                        PrivsyncError::Query(format!("column is not UTF-8 text: {}", value))
                    })?;
                    rows.push(text.to_string());
                }
            }
        }
        tracing::debug!(
            column = result.columns.first().map(String::as_str),
            row_count = rows.len(),
            "fetched text rows"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privsync_core::{QueryResult, Row, ServerRejection, StatementResult, Value};
    use pretty_assertions::assert_eq;

    struct FixedConnection {
        result: QueryResult,
        reject: bool,
    }

    #[async_trait]
    impl Connection for FixedConnection {
        fn driver_name(&self) -> &str {
            "fixed"
        }

        async fn execute(&self, _sql: &str) -> Result<StatementResult> {
            if self.reject {
                return Err(PrivsyncError::Rejected(ServerRejection {
                    code: 1142,
                    state: "42000".to_string(),
                    message: "denied".to_string(),
                }));
            }
            Ok(StatementResult::default())
        }

        async fn query(&self, _sql: &str) -> Result<QueryResult> {
            Ok(self.result.clone())
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }

        fn is_closed(&self) -> bool {
            false
        }
    }

    fn executor(values: Vec<Value>, reject: bool) -> ConnectionExecutor {
        ConnectionExecutor::new(Arc::new(FixedConnection {
            result: QueryResult::single_column("Grants for app@%", values),
            reject,
        }))
    }

    #[tokio::test]
    async fn test_fetch_rows_reads_first_column() {
        let exec = executor(
            vec![
                Value::String("GRANT USAGE ON *.* TO `app`@`%`".to_string()),
                Value::Bytes(b"GRANT SELECT ON `shop`.* TO `app`@`%`".to_vec()),
                Value::Null,
            ],
            false,
        );

        let rows = exec.fetch_rows("SHOW GRANTS FOR `app`@`%`;").await.unwrap();
        assert_eq!(
            rows,
            vec![
                "GRANT USAGE ON *.* TO `app`@`%`".to_string(),
                "GRANT SELECT ON `shop`.* TO `app`@`%`".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_rows_rejects_binary() {
        let exec = executor(vec![Value::Bytes(vec![0xff, 0xfe])], false);
        let err = exec.fetch_rows("SHOW GRANTS").await.unwrap_err();
        assert!(matches!(err, PrivsyncError::Query(_)));
    }

    #[tokio::test]
    async fn test_fetch_rows_skips_empty_rows() {
        let exec = ConnectionExecutor::new(Arc::new(FixedConnection {
            result: QueryResult {
                rows: vec![Row::default()],
                ..QueryResult::empty()
            },
            reject: false,
        }));
        assert!(exec.fetch_rows("SHOW GRANTS").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_passes_rejection_through() {
        let exec = executor(vec![], true);
        let err = exec.execute("GRANT SUPER ON *.* TO `app`@`%`;").await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(exec.connection().driver_name(), "fixed");
    }
}
