//! mibsync-core: Shared types and error handling for mibsync.
//!
//! This crate provides the foundational types used by the sync tool:
//! - MIB record types (object-type and notification-type definitions)
//! - The alert plugin-schema model read from JSON alert files
//! - Message descriptors standing in for protobuf reflection
//! - Common error types

pub mod error;
pub mod schema;
pub mod types;

pub use error::CoreError;
pub use types::{ObjectRecord, Syntax, TrapRecord};
