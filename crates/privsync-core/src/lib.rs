//! privsync core - connection abstractions shared by the privsync crates
//!
//! This crate provides the fundamental traits and types that the driver and
//! admin crates depend on. It defines:
//!
//! - `Connection` - Trait for database connections
//! - `ConnectionConfig` - Connection parameters, loadable from TOML
//! - `PrivsyncError` - Core error type, including server-side rejections
//! - Text-oriented result types: `Value`, `Row`, `QueryResult`

mod config;
mod connection;
mod error;
mod types;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use types::*;
