use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by billing operations.
///
/// Every variant aborts only the operation that raised it; nothing is
/// persisted for a failed operation.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Client already exists: {0}")]
    DuplicateClient(String),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("No work logged for client: {0}")]
    NoWorkLogged(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// State file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed state file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
