use thiserror::Error;

/// Errors raised while decoding schema metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown field type code: {0}")]
    UnknownFieldType(i32),

    #[error("Unknown field label code: {0}")]
    UnknownFieldLabel(i32),
}
