//! Error types for the mibsync crate.

use mibsync_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid descriptor field {field}: {source}")]
    Catalog {
        field: String,
        #[source]
        source: CoreError,
    },

    #[error("Attribute not found in catalog: {0}")]
    UnknownAttribute(String),

    #[error("Name exceeds {max} characters: {name}")]
    NameTooLong { name: String, max: usize },

    #[error("Failed to parse descriptor file {path}: {source}")]
    Descriptor {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
