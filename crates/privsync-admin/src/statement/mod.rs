//! GRANT/REVOKE statement rendering

mod service;

#[cfg(test)]
mod tests;

pub use service::*;
