//! Reconciliation controller
//!
//! Applies single privilege changes and batches of changes for one grantee.
//! A batch snapshots the grantee's privileges first; when an action fails,
//! the actions already applied are undone with their inverse statements.

mod service;


pub use service::*;
