//! privsync admin - MariaDB privilege reconciliation
//!
//! This crate manages access-control grants on a MariaDB-family server:
//! - Privileges, grantees and actions as structured data
//! - A per-scope catalog of the privilege names the server understands
//! - Rendering GRANT/REVOKE statements
//! - Parsing `SHOW GRANTS` output back into structured grants
//! - Applying batches of changes, compensating already-applied changes when
//!   a later one fails

pub mod catalog;
pub mod controller;
pub mod error;
pub mod executor;
pub mod parser;
pub mod privilege;
pub mod repository;
pub mod statement;

pub use catalog::*;
pub use controller::*;
pub use error::*;
pub use executor::*;
pub use parser::*;
pub use privilege::*;
pub use repository::*;
pub use statement::*;
