//! Grantees, privileges, actions and apply results

use crate::{GrantError, Result};
use serde::{Deserialize, Serialize};

/// Host pattern matching any host; the implicit host of a role
pub const ANY_HOST: &str = "%";

/// Database/table placeholder for privileges that cover every object
pub const WILDCARD: &str = "*";

/// Reject blank identifiers and identifiers that cannot be backtick-quoted
/// without escaping.
pub(crate) fn require_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GrantError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.contains('`') {
        return Err(GrantError::InvalidArgument(format!(
            "{} must not contain a backtick: {}",
            field, value
        )));
    }
    Ok(())
}

/// The identity a privilege is granted to or revoked from
///
/// # Examples
///
/// ```
/// use privsync_admin::Grantee;
///
/// let user = Grantee::user("app", "10.0.%").unwrap();
/// assert_eq!(user.to_sql(), "`app`@`10.0.%`");
///
/// let role = Grantee::role("reporting").unwrap();
/// assert_eq!(role.host(), "%");
/// assert_eq!(role.to_sql(), "`reporting`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GranteeRecord")]
pub enum Grantee {
    /// An account, identified by user name and host pattern
    User { name: String, host: String },
    /// A role, valid from any host
    Role { name: String },
}

impl Grantee {
    /// Create a user grantee
    pub fn user(name: impl Into<String>, host: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let host = host.into();
        require_identifier("user name", &name)?;
        require_identifier("user host", &host)?;
        Ok(Grantee::User { name, host })
    }

    /// Create a role grantee
    pub fn role(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_identifier("role name", &name)?;
        Ok(Grantee::Role { name })
    }

    /// Check the name, and a user's host, can be rendered.
    ///
    /// Values built directly from the variants skip the constructor checks.
    pub fn validate(&self) -> Result<()> {
        match self {
            Grantee::User { name, host } => {
                require_identifier("user name", name)?;
                require_identifier("user host", host)
            }
            Grantee::Role { name } => require_identifier("role name", name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Grantee::User { name, .. } | Grantee::Role { name } => name,
        }
    }

    /// Host pattern; `%` for roles
    pub fn host(&self) -> &str {
        match self {
            Grantee::User { host, .. } => host,
            Grantee::Role { .. } => ANY_HOST,
        }
    }

    pub fn is_role(&self) -> bool {
        matches!(self, Grantee::Role { .. })
    }

    /// Render the grantee as it appears after TO/FROM
    pub fn to_sql(&self) -> String {
        match self {
            Grantee::User { name, host } => format!("`{}`@`{}`", name, host),
            Grantee::Role { name } => format!("`{}`", name),
        }
    }
}

/// Unchecked wire form of [`Grantee`]
#[derive(Deserialize)]
enum GranteeRecord {
    User { name: String, host: String },
    Role { name: String },
}

impl TryFrom<GranteeRecord> for Grantee {
    type Error = GrantError;

    fn try_from(record: GranteeRecord) -> Result<Self> {
        match record {
            GranteeRecord::User { name, host } => Grantee::user(name, host),
            GranteeRecord::Role { name } => Grantee::role(name),
        }
    }
}

impl std::fmt::Display for Grantee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grantee::User { name, host } => write!(f, "{}@{}", name, host),
            Grantee::Role { name } => write!(f, "role {}", name),
        }
    }
}

/// Level of the server a privilege applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivilegeScope {
    /// Whole server (`*.*`)
    Global,
    /// One database (`` `db`.* ``)
    Database,
    /// One table (`` `db`.`table` ``)
    Table,
}

impl PrivilegeScope {
    pub const ALL: [PrivilegeScope; 3] = [
        PrivilegeScope::Global,
        PrivilegeScope::Database,
        PrivilegeScope::Table,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeScope::Global => "Global",
            PrivilegeScope::Database => "Database",
            PrivilegeScope::Table => "Table",
        }
    }
}

impl std::fmt::Display for PrivilegeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named privilege at a scope
///
/// Global privileges carry `*` for database and table, database privileges
/// carry `*` for table.
///
/// # Examples
///
/// ```
/// use privsync_admin::{KnownPrivilege, Privilege, PrivilegeScope};
///
/// let p = Privilege::table(KnownPrivilege::Select, "shop", "orders");
/// assert_eq!(p.scope(), PrivilegeScope::Table);
/// assert_eq!(p.name(), "SELECT");
/// assert_eq!(p.database_name(), "shop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Privilege {
    name: String,
    scope: PrivilegeScope,
    database: String,
    table: String,
}

impl Privilege {
    /// A server-wide privilege
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: PrivilegeScope::Global,
            database: WILDCARD.to_string(),
            table: WILDCARD.to_string(),
        }
    }

    /// A privilege on every object of one database
    pub fn database(name: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: PrivilegeScope::Database,
            database: database.into(),
            table: WILDCARD.to_string(),
        }
    }

    /// A privilege on one table
    pub fn table(
        name: impl Into<String>,
        database: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scope: PrivilegeScope::Table,
            database: database.into(),
            table: table.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> PrivilegeScope {
        self.scope
    }

    /// Database name, `*` for global privileges
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Table name, `*` unless the scope is a table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Check the fields required by the scope are present.
    ///
    /// Catalog membership is checked separately, against whichever catalog
    /// the caller is configured with.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GrantError::InvalidArgument(
                "privilege name must not be empty".to_string(),
            ));
        }
        match self.scope {
            PrivilegeScope::Global => Ok(()),
            PrivilegeScope::Database => require_identifier("database", &self.database),
            PrivilegeScope::Table => {
                require_identifier("database", &self.database)?;
                require_identifier("table", &self.table)
            }
        }
    }
}

impl std::fmt::Display for Privilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope {
            PrivilegeScope::Global => write!(f, "{} ON *.*", self.name),
            PrivilegeScope::Database => write!(f, "{} ON {}.*", self.name, self.database),
            PrivilegeScope::Table => {
                write!(f, "{} ON {}.{}", self.name, self.database, self.table)
            }
        }
    }
}

/// A privilege observed on the server for a grantee
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantedPrivilege {
    grantee: Grantee,
    privilege: Privilege,
}

impl GrantedPrivilege {
    pub fn new(grantee: Grantee, privilege: Privilege) -> Self {
        Self { grantee, privilege }
    }

    pub fn grantee(&self) -> &Grantee {
        &self.grantee
    }

    pub fn privilege(&self) -> &Privilege {
        &self.privilege
    }
}

/// Grant or revoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrivilegeOperation {
    Grant,
    Revoke,
}

impl PrivilegeOperation {
    /// Leading SQL keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            PrivilegeOperation::Grant => "GRANT",
            PrivilegeOperation::Revoke => "REVOKE",
        }
    }

    /// Keyword introducing the grantee
    pub fn preposition(&self) -> &'static str {
        match self {
            PrivilegeOperation::Grant => "TO",
            PrivilegeOperation::Revoke => "FROM",
        }
    }

    /// The operation that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            PrivilegeOperation::Grant => PrivilegeOperation::Revoke,
            PrivilegeOperation::Revoke => PrivilegeOperation::Grant,
        }
    }
}

impl std::fmt::Display for PrivilegeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One requested change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeAction {
    pub privilege: Privilege,
    pub operation: PrivilegeOperation,
}

impl PrivilegeAction {
    pub fn new(privilege: Privilege, operation: PrivilegeOperation) -> Self {
        Self {
            privilege,
            operation,
        }
    }

    pub fn grant(privilege: Privilege) -> Self {
        Self::new(privilege, PrivilegeOperation::Grant)
    }

    pub fn revoke(privilege: Privilege) -> Self {
        Self::new(privilege, PrivilegeOperation::Revoke)
    }
}

/// Outcome of applying one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    grantee: Grantee,
    privilege: Privilege,
    operation: PrivilegeOperation,
    success: bool,
    error_message: Option<String>,
}

impl ApplyResult {
    pub fn succeeded(grantee: Grantee, privilege: Privilege, operation: PrivilegeOperation) -> Self {
        Self {
            grantee,
            privilege,
            operation,
            success: true,
            error_message: None,
        }
    }

    pub fn failed(
        grantee: Grantee,
        privilege: Privilege,
        operation: PrivilegeOperation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            grantee,
            privilege,
            operation,
            success: false,
            error_message: Some(message.into()),
        }
    }

    pub fn grantee(&self) -> &Grantee {
        &self.grantee
    }

    pub fn privilege(&self) -> &Privilege {
        &self.privilege
    }

    pub fn operation(&self) -> PrivilegeOperation {
        self.operation
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Overwrite a success once its change has been rolled back
    pub(crate) fn mark_discarded(&mut self, notice: &str) {
        self.success = false;
        self.error_message = Some(notice.to_string());
    }
}
