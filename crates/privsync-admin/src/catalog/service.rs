//! Privilege catalog implementation

use crate::{GrantError, KnownPrivilege, PrivilegeScope, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};

const MARIADB_CATALOG_TOML: &str = include_str!("mariadb.toml");

/// Catalog description as written in a `[catalog]` TOML table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Server label used in error messages
    #[serde(default = "default_server")]
    pub server: String,
    pub global: Vec<String>,
    pub database: Vec<String>,
    pub table: Vec<String>,
}

fn default_server() -> String {
    "MariaDB".to_string()
}

#[derive(Deserialize)]
struct CatalogFile {
    catalog: CatalogConfig,
}

/// The privilege names a server accepts at each scope
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeCatalog {
    server: String,
    global: IndexSet<String>,
    database: IndexSet<String>,
    table: IndexSet<String>,
}

impl PrivilegeCatalog {
    /// Build a catalog from a parsed configuration.
    ///
    /// Every scope must list at least one name and no name may be blank.
    /// Duplicates collapse onto their first occurrence.
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        Ok(Self {
            global: name_set(PrivilegeScope::Global, config.global)?,
            database: name_set(PrivilegeScope::Database, config.database)?,
            table: name_set(PrivilegeScope::Table, config.table)?,
            server: config.server,
        })
    }

    /// Parse a catalog from TOML text containing a `[catalog]` table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| GrantError::Configuration(format!("invalid catalog TOML: {}", e)))?;
        Self::from_config(file.catalog)
    }

    /// Load a catalog from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GrantError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            server = %catalog.server,
            global = catalog.global.len(),
            database = catalog.database.len(),
            table = catalog.table.len(),
            "loaded privilege catalog"
        );
        Ok(catalog)
    }

    /// The built-in MariaDB catalog, parsed once per process
    pub fn mariadb() -> Arc<Self> {
        static CATALOG: OnceLock<Arc<PrivilegeCatalog>> = OnceLock::new();
        CATALOG
            .get_or_init(|| {
                Arc::new(
                    Self::from_toml_str(MARIADB_CATALOG_TOML)
                        .expect("Failed to parse built-in MariaDB catalog mariadb.toml"),
                )
            })
            .clone()
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// All names valid at `scope`, in configuration order
    pub fn names_for(&self, scope: PrivilegeScope) -> &IndexSet<String> {
        match scope {
            PrivilegeScope::Global => &self.global,
            PrivilegeScope::Database => &self.database,
            PrivilegeScope::Table => &self.table,
        }
    }

    pub fn contains(&self, scope: PrivilegeScope, name: &str) -> bool {
        self.names_for(scope).contains(name)
    }

    /// What `ALL PRIVILEGES` stands for at `scope`: every name except USAGE
    pub fn all_privileges(&self, scope: PrivilegeScope) -> impl Iterator<Item = &str> {
        let usage = KnownPrivilege::Usage.as_sql();
        self.names_for(scope)
            .iter()
            .map(String::as_str)
            .filter(move |name| *name != usage)
    }

    /// Fail with an unsupported-privilege error unless `name` is valid at `scope`
    pub fn ensure_supported(&self, scope: PrivilegeScope, name: &str) -> Result<()> {
        if self.contains(scope, name) {
            Ok(())
        } else {
            Err(GrantError::UnsupportedPrivilege {
                scope,
                name: name.to_string(),
                server: self.server.clone(),
            })
        }
    }
}

fn name_set(scope: PrivilegeScope, names: Vec<String>) -> Result<IndexSet<String>> {
    if names.is_empty() {
        return Err(GrantError::Configuration(format!(
            "{} privilege list must not be empty",
            scope
        )));
    }
    names
        .into_iter()
        .map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                Err(GrantError::Configuration(format!(
                    "{} privilege list contains a blank name",
                    scope
                )))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
