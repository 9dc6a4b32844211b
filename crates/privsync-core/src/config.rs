//! Connection configuration

use crate::{PrivsyncError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default MariaDB/MySQL port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

fn default_port() -> u16 {
    DEFAULT_MYSQL_PORT
}

/// Connection configuration
///
/// Deserializes from a `[connection]` table:
///
/// ```toml
/// [connection]
/// name = "staging"
/// host = "db.internal"
/// port = 3306
/// username = "admin"
/// password = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Display name, used in log output
    #[serde(default)]
    pub name: String,
    /// Host address
    pub host: String,
    /// Port number
    #[serde(default = "default_port")]
    pub port: u16,
    /// Default database, if any
    #[serde(default)]
    pub database: Option<String>,
    /// Username
    #[serde(default)]
    pub username: Option<String>,
    /// Password
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Deserialize)]
struct ConnectionFile {
    connection: ConnectionConfig,
}

impl ConnectionConfig {
    /// Create a MySQL/MariaDB configuration
    pub fn new_mysql(host: &str, port: u16, username: &str) -> Self {
        Self {
            name: "MariaDB".to_string(),
            host: host.to_string(),
            port,
            database: None,
            username: Some(username.to_string()),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Parse a configuration from TOML text containing a `[connection]` table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConnectionFile = toml::from_str(content)
            .map_err(|e| PrivsyncError::Configuration(format!("invalid connection config: {}", e)))?;
        let config = file.connection;
        if config.host.trim().is_empty() {
            return Err(PrivsyncError::Configuration(
                "connection host must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading connection config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
