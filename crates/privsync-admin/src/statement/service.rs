//! Statement builder implementation
//!
//! Renders privilege changes into the exact text MariaDB expects. Database
//! and table names are always backtick-quoted; privilege names are keywords
//! and are emitted as given.

use crate::privilege::require_identifier;
use crate::{GrantError, Grantee, Privilege, PrivilegeOperation, PrivilegeScope, Result};

/// Builds GRANT, REVOKE and SHOW GRANTS statements
///
/// # Examples
///
/// ```
/// use privsync_admin::{Grantee, PrivilegeOperation, PrivilegeScope, StatementBuilder};
///
/// let sql = StatementBuilder::new()
///     .build_statement(
///         PrivilegeOperation::Grant,
///         PrivilegeScope::Database,
///         "SELECT",
///         Some("db"),
///         None,
///         &Grantee::user("u", "h").unwrap(),
///     )
///     .unwrap();
/// assert_eq!(sql, "GRANT SELECT ON `db`.* TO `u`@`h`;");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementBuilder;

impl StatementBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Render a GRANT or REVOKE for a single privilege
    ///
    /// # Arguments
    /// * `operation` - Grant or revoke
    /// * `scope` - Level the privilege applies to
    /// * `name` - Privilege name, e.g. `SELECT`
    /// * `database` - Required for database and table scope
    /// * `table` - Required for table scope
    /// * `grantee` - User or role receiving/losing the privilege
    pub fn build_statement(
        &self,
        operation: PrivilegeOperation,
        scope: PrivilegeScope,
        name: &str,
        database: Option<&str>,
        table: Option<&str>,
        grantee: &Grantee,
    ) -> Result<String> {
        if name.trim().is_empty() {
            return Err(GrantError::InvalidArgument(
                "privilege name must not be empty".to_string(),
            ));
        }
        grantee.validate()?;

        let target = match scope {
            PrivilegeScope::Global => "*.*".to_string(),
            PrivilegeScope::Database => {
                let database = database.unwrap_or_default();
                require_identifier("database", database)?;
                format!("`{}`.*", database)
            }
            PrivilegeScope::Table => {
                let database = database.unwrap_or_default();
                let table = table.unwrap_or_default();
                require_identifier("database", database)?;
                require_identifier("table", table)?;
                format!("`{}`.`{}`", database, table)
            }
        };

        Ok(format!(
            "{} {} ON {} {} {};",
            operation.keyword(),
            name,
            target,
            operation.preposition(),
            grantee.to_sql()
        ))
    }

    /// Render a GRANT or REVOKE for a privilege value
    pub fn build_for(
        &self,
        operation: PrivilegeOperation,
        privilege: &Privilege,
        grantee: &Grantee,
    ) -> Result<String> {
        self.build_statement(
            operation,
            privilege.scope(),
            privilege.name(),
            Some(privilege.database_name()),
            Some(privilege.table_name()),
            grantee,
        )
    }

    /// Render the query reporting a grantee's current privileges
    pub fn show_grants(&self, grantee: &Grantee) -> String {
        format!("SHOW GRANTS FOR {};", grantee.to_sql())
    }
}
