//! Privilege catalog
//!
//! The per-scope sets of privilege names a server accepts. Catalogs are
//! configuration: the built-in MariaDB catalog ships as `mariadb.toml`, and
//! other server versions can be described in the same format.

mod service;


pub use service::*;
