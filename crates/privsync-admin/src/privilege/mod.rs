//! Privilege data model
//!
//! Grantees, privileges at the three MariaDB scopes, and the actions and
//! results exchanged with the reconciliation controller.

mod known;
mod model;


pub use known::*;
pub use model::*;
