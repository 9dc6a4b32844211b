//! MySQL/MariaDB driver implementation

mod connection;

pub use connection::MySqlConnection;
