//! Grants repository
//!
//! Reads a grantee's current privileges from the server.

mod service;

pub use service::*;
