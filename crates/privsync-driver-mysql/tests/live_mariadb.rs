//! Tests against a running MariaDB server.
//!
//! Ignored by default. Point them at a disposable server with
//! `PRIVSYNC_TEST_MYSQL_HOST`, `PRIVSYNC_TEST_MYSQL_PORT`,
//! `PRIVSYNC_TEST_MYSQL_USER` and `PRIVSYNC_TEST_MYSQL_PASSWORD`, then run
//! `cargo test -p privsync-driver-mysql -- --ignored`.

use anyhow::Context;
use privsync_core::{Connection, ConnectionConfig, DEFAULT_MYSQL_PORT};
use privsync_driver_mysql::MySqlConnection;

fn live_config() -> anyhow::Result<ConnectionConfig> {
    let host = std::env::var("PRIVSYNC_TEST_MYSQL_HOST").context("PRIVSYNC_TEST_MYSQL_HOST not set")?;
    let port = match std::env::var("PRIVSYNC_TEST_MYSQL_PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_MYSQL_PORT,
    };
    let user = std::env::var("PRIVSYNC_TEST_MYSQL_USER").unwrap_or_else(|_| "root".to_string());
    let password = std::env::var("PRIVSYNC_TEST_MYSQL_PASSWORD").unwrap_or_default();
    Ok(ConnectionConfig::new_mysql(&host, port, &user).with_password(password))
}

#[tokio::test]
#[ignore = "requires a running MariaDB server"]
async fn test_show_grants_and_rejection() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let conn = MySqlConnection::connect(&live_config()?).await?;

    conn.execute("CREATE USER IF NOT EXISTS `privsync_probe`@`%`;").await?;
    conn.execute("GRANT SELECT ON *.* TO `privsync_probe`@`%`;").await?;

    let grants = conn.query("SHOW GRANTS FOR `privsync_probe`@`%`;").await?;
    let lines: Vec<&str> = grants
        .rows
        .iter()
        .filter_map(|row| row.get(0).and_then(|v| v.as_text()))
        .collect();
    assert!(lines.iter().any(|l| l.starts_with("GRANT SELECT ON *.*")));

    let err = conn
        .execute("GRANT SELECT ON `privsync_missing_db`.`missing_table` TO `privsync_probe`@`%`;")
        .await
        .unwrap_err();
    assert!(err.is_rejection(), "expected a server rejection, got {err:?}");

    conn.execute("DROP USER `privsync_probe`@`%`;").await?;
    conn.close().await?;
    assert!(conn.is_closed());
    assert!(conn.query("SELECT 1").await.is_err());
    Ok(())
}
