//! `SHOW GRANTS` row parsing
//!
//! Turns one line of a MariaDB grants report into structured grants. Only
//! the `GRANT <privileges> ON <target> TO <grantee>` shape is understood;
//! anything else is a parse error.

mod service;


pub use service::*;
