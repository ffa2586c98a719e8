//! Persistent storage errors

use thiserror::Error;

/// Errors raised while loading or saving a [`Stored`](crate::storage::Stored) value.
///
/// Malformed persisted content is not repaired; it surfaces as [`StorageError::Parse`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The persisted string at `key` is not valid JSON.
    #[error("failed to parse stored value at '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The merged JSON could not be turned into the target type.
    #[error("stored value at '{key}' does not match the expected shape: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The current value could not be serialized.
    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The SQLite backend failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Creating the storage directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No platform data directory could be determined.
    #[error("could not determine a data directory for persistent storage")]
    NoDataDir,
}
