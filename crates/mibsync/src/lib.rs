//! mibsync: Keeps the Nutanix SNMP MIB in step with alert definitions.
//!
//! Parses the managed section of an existing MIB file, derives new
//! object-types and notification-types from alert plugin schemas, and
//! splices the result back after the `ntxAlert` marker line.

pub mod alerts;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod parser;
pub mod registry;
pub mod rewrite;
pub mod sync;
pub mod walk;

pub use error::{Result, SyncError};
pub use registry::Registry;
