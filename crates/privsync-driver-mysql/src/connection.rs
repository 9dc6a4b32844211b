//! MySQL connection implementation

use async_trait::async_trait;
use mysql_async::{
    Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row as MySqlRow, prelude::*,
};
use privsync_core::{
    Connection, ConnectionConfig, PrivsyncError, QueryResult, Result, Row, ServerRejection,
    StatementResult, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// MySQL/MariaDB connection wrapper
///
/// Holds a single-connection pool so that every statement of a privilege
/// batch runs on the same server session, in submission order.
pub struct MySqlConnection {
    pool: Pool,
    name: String,
    closed: AtomicBool,
}

impl MySqlConnection {
    /// Connect to a MySQL/MariaDB server
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        tracing::info!(
            name = %config.name,
            host = %config.host,
            port = %config.port,
            database = ?config.database,
            "connecting to MySQL database"
        );

        let mut opts_builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(config.host.as_str())
            .tcp_port(config.port);

        if let Some(db) = &config.database {
            opts_builder = opts_builder.db_name(Some(db.as_str()));
        }
        if let Some(u) = &config.username {
            opts_builder = opts_builder.user(Some(u.as_str()));
        }
        if let Some(p) = &config.password {
            opts_builder = opts_builder.pass(Some(p.as_str()));
        }

        let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
            PrivsyncError::Connection(
                "Failed to configure MySQL pool constraints (min=1, max=1)".into(),
            )
        })?;

        let pool_opts = PoolOpts::default()
            .with_constraints(constraints)
            .with_reset_connection(false);
        opts_builder = opts_builder.pool_opts(pool_opts);

        let pool = Pool::new(Opts::from(opts_builder));
        // Verify connectivity by acquiring and releasing a connection
        let conn = pool
            .get_conn()
            .await
            .map_err(|e| classify_error(e, "Failed to connect to MySQL"))?;
        drop(conn);

        tracing::info!(host = %config.host, port = %config.port, "MySQL connection established");
        Ok(Self {
            pool,
            name: config.name.clone(),
            closed: AtomicBool::new(false),
        })
    }

    async fn get_conn(&self) -> Result<Conn> {
        if self.is_closed() {
            return Err(PrivsyncError::Connection(format!(
                "MySQL connection '{}' is closed",
                self.name
            )));
        }
        self.pool
            .get_conn()
            .await
            .map_err(|e| classify_error(e, "Failed to get MySQL connection"))
    }
}

/// Map a driver error onto the core taxonomy.
///
/// Server errors are rejections of a statement the server received; anything
/// else means the statement may never have reached it.
pub(crate) fn classify_error(err: mysql_async::Error, context: &str) -> PrivsyncError {
    match err {
        mysql_async::Error::Server(server) => PrivsyncError::Rejected(ServerRejection {
            code: server.code,
            state: server.state,
            message: server.message,
        }),
        mysql_async::Error::Io(e) => PrivsyncError::Connection(format!("{}: {}", context, e)),
        mysql_async::Error::Driver(e) => PrivsyncError::Connection(format!("{}: {}", context, e)),
        other => PrivsyncError::Query(format!("{}: {}", context, other)),
    }
}

/// Convert a mysql_async value to our Value type.
///
/// The text protocol reports every column as bytes; valid UTF-8 becomes a
/// string, anything else is kept as raw bytes. Binary-protocol numbers and
/// temporal values are rendered the way the server prints them.
pub(crate) fn mysql_value_to_value(val: mysql_async::Value) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Value::String(s),
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::String(i.to_string()),
        mysql_async::Value::UInt(u) => Value::String(u.to_string()),
        mysql_async::Value::Float(f) => Value::String(f.to_string()),
        mysql_async::Value::Double(d) => Value::String(d.to_string()),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = format!("{:04}-{:02}-{:02}", year, month, day);
            if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                Value::String(date)
            } else {
                Value::String(format!(
                    "{} {:02}:{:02}:{:02}.{:06}",
                    date, hour, min, sec, micro
                ))
            }
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = days * 24 + hours as u32;
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        let mut conn = self.get_conn().await?;

        conn.query_drop(sql)
            .await
            .map_err(|e| classify_error(e, "Failed to execute statement"))?;

        let result = StatementResult {
            affected_rows: conn.affected_rows(),
            warnings: conn.get_warnings(),
        };
        tracing::debug!(
            affected_rows = result.affected_rows,
            warnings = result.warnings,
            "statement executed"
        );
        Ok(result)
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();
        let mut conn = self.get_conn().await?;

        let mysql_rows: Vec<MySqlRow> = conn
            .query(sql)
            .await
            .map_err(|e| classify_error(e, "Failed to execute query"))?;

        let columns: Vec<String> = mysql_rows
            .first()
            .map(|row| {
                row.columns_ref()
                    .iter()
                    .map(|col| col.name_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = mysql_rows
            .into_iter()
            .map(|mut mysql_row| {
                let values = (0..columns.len())
                    .map(|idx| {
                        mysql_row
                            .take::<mysql_async::Value, _>(idx)
                            .map(mysql_value_to_value)
                            .unwrap_or(Value::Null)
                    })
                    .collect();
                Row::new(values)
            })
            .collect();

        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = start_time.elapsed().as_millis() as u64,
            "query executed successfully"
        );

        Ok(QueryResult { columns, rows })
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::info!(name = %self.name, "closing MySQL connection pool");
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| PrivsyncError::Connection(format!("Failed to close MySQL connection: {}", e)))
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
