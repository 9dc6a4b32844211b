//! Typed names for the privileges MariaDB understands

use serde::{Deserialize, Serialize};

/// A MariaDB privilege, mapped to its canonical SQL name
///
/// Which scopes accept a privilege is decided by the [`PrivilegeCatalog`],
/// not by this type.
///
/// [`PrivilegeCatalog`]: crate::PrivilegeCatalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownPrivilege {
    Usage,
    BinlogAdmin,
    BinlogMonitor,
    ReplicationClient,
    BinlogReplay,
    SlaveMonitor,
    ReplicaMonitor,
    ReplicationSlave,
    ReplicationReplica,
    ReplicationMasterAdmin,
    ReplicationSlaveAdmin,
    ConnectionAdmin,
    CreateUser,
    FederatedAdmin,
    File,
    Process,
    ReadOnlyAdmin,
    Reload,
    SetUser,
    ShowDatabases,
    Shutdown,
    Super,
    Create,
    CreateTemporaryTables,
    Alter,
    Drop,
    CreateRoutine,
    AlterRoutine,
    Execute,
    Event,
    LockTables,
    CreateView,
    ShowView,
    Trigger,
    Index,
    References,
    Select,
    Insert,
    Update,
    Delete,
    DeleteHistory,
    GrantOption,
    CreateTablespace,
}

impl KnownPrivilege {
    pub const ALL: [KnownPrivilege; 43] = [
        KnownPrivilege::Usage,
        KnownPrivilege::BinlogAdmin,
        KnownPrivilege::BinlogMonitor,
        KnownPrivilege::ReplicationClient,
        KnownPrivilege::BinlogReplay,
        KnownPrivilege::SlaveMonitor,
        KnownPrivilege::ReplicaMonitor,
        KnownPrivilege::ReplicationSlave,
        KnownPrivilege::ReplicationReplica,
        KnownPrivilege::ReplicationMasterAdmin,
        KnownPrivilege::ReplicationSlaveAdmin,
        KnownPrivilege::ConnectionAdmin,
        KnownPrivilege::CreateUser,
        KnownPrivilege::FederatedAdmin,
        KnownPrivilege::File,
        KnownPrivilege::Process,
        KnownPrivilege::ReadOnlyAdmin,
        KnownPrivilege::Reload,
        KnownPrivilege::SetUser,
        KnownPrivilege::ShowDatabases,
        KnownPrivilege::Shutdown,
        KnownPrivilege::Super,
        KnownPrivilege::Create,
        KnownPrivilege::CreateTemporaryTables,
        KnownPrivilege::Alter,
        KnownPrivilege::Drop,
        KnownPrivilege::CreateRoutine,
        KnownPrivilege::AlterRoutine,
        KnownPrivilege::Execute,
        KnownPrivilege::Event,
        KnownPrivilege::LockTables,
        KnownPrivilege::CreateView,
        KnownPrivilege::ShowView,
        KnownPrivilege::Trigger,
        KnownPrivilege::Index,
        KnownPrivilege::References,
        KnownPrivilege::Select,
        KnownPrivilege::Insert,
        KnownPrivilege::Update,
        KnownPrivilege::Delete,
        KnownPrivilege::DeleteHistory,
        KnownPrivilege::GrantOption,
        KnownPrivilege::CreateTablespace,
    ];

    /// Convert privilege to SQL keyword
    pub fn as_sql(&self) -> &'static str {
        match self {
            KnownPrivilege::Usage => "USAGE",
            KnownPrivilege::BinlogAdmin => "BINLOG ADMIN",
            KnownPrivilege::BinlogMonitor => "BINLOG MONITOR",
            KnownPrivilege::ReplicationClient => "REPLICATION CLIENT",
            KnownPrivilege::BinlogReplay => "BINLOG REPLAY",
            KnownPrivilege::SlaveMonitor => "SLAVE MONITOR",
            KnownPrivilege::ReplicaMonitor => "REPLICA MONITOR",
            KnownPrivilege::ReplicationSlave => "REPLICATION SLAVE",
            KnownPrivilege::ReplicationReplica => "REPLICATION REPLICA",
            KnownPrivilege::ReplicationMasterAdmin => "REPLICATION MASTER ADMIN",
            KnownPrivilege::ReplicationSlaveAdmin => "REPLICATION SLAVE ADMIN",
            KnownPrivilege::ConnectionAdmin => "CONNECTION ADMIN",
            KnownPrivilege::CreateUser => "CREATE USER",
            KnownPrivilege::FederatedAdmin => "FEDERATED ADMIN",
            KnownPrivilege::File => "FILE",
            KnownPrivilege::Process => "PROCESS",
            KnownPrivilege::ReadOnlyAdmin => "READ_ONLY ADMIN",
            KnownPrivilege::Reload => "RELOAD",
            KnownPrivilege::SetUser => "SET USER",
            KnownPrivilege::ShowDatabases => "SHOW DATABASES",
            KnownPrivilege::Shutdown => "SHUTDOWN",
            KnownPrivilege::Super => "SUPER",
            KnownPrivilege::Create => "CREATE",
            KnownPrivilege::CreateTemporaryTables => "CREATE TEMPORARY TABLES",
            KnownPrivilege::Alter => "ALTER",
            KnownPrivilege::Drop => "DROP",
            KnownPrivilege::CreateRoutine => "CREATE ROUTINE",
            KnownPrivilege::AlterRoutine => "ALTER ROUTINE",
            KnownPrivilege::Execute => "EXECUTE",
            KnownPrivilege::Event => "EVENT",
            KnownPrivilege::LockTables => "LOCK TABLES",
            KnownPrivilege::CreateView => "CREATE VIEW",
            KnownPrivilege::ShowView => "SHOW VIEW",
            KnownPrivilege::Trigger => "TRIGGER",
            KnownPrivilege::Index => "INDEX",
            KnownPrivilege::References => "REFERENCES",
            KnownPrivilege::Select => "SELECT",
            KnownPrivilege::Insert => "INSERT",
            KnownPrivilege::Update => "UPDATE",
            KnownPrivilege::Delete => "DELETE",
            KnownPrivilege::DeleteHistory => "DELETE HISTORY",
            KnownPrivilege::GrantOption => "GRANT OPTION",
            KnownPrivilege::CreateTablespace => "CREATE TABLESPACE",
        }
    }

    /// Look up a privilege by its SQL name
    pub fn from_sql(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_sql() == name)
    }
}

impl std::fmt::Display for KnownPrivilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl From<KnownPrivilege> for String {
    fn from(privilege: KnownPrivilege) -> Self {
        privilege.as_sql().to_string()
    }
}
