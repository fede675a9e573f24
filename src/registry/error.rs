use thiserror::Error;

use crate::storage::StorageError;

/// Errors produced while mapping storage keys back to module coordinates.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("malformed storage key: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("storage backend unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("operation not supported by this backend: {0}")]
    Unsupported(&'static str),
}
