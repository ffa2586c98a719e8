//! Persistence of a value to a key/value store.
//!
//! [`Stored`] loads a value once on open, merging any persisted JSON over the
//! configured initial value, and writes the full value back after every
//! mutation. There is no debouncing and no schema validation.

mod config;
mod json;
mod memory;
mod paths;
mod sqlite;

pub use config::*;
pub use json::*;
pub use memory::*;
pub use sqlite::*;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::state::State;

/// String key/value store holding serialized values.
///
/// Implementations are synchronous; each call either completes or fails.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw string stored at `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` at `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// A value mirrored to a [`StorageBackend`] key.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use listkit::storage::{MemoryStorage, StorageBackend, StorageConfig, Stored};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Prefs {
///     a: i32,
///     b: i32,
/// }
///
/// let backend = Arc::new(MemoryStorage::new());
/// backend.set_item("prefs", r#"{"b":3}"#)?;
///
/// let prefs = Stored::open(
///     backend.clone(),
///     StorageConfig::new().with_key("prefs").with_initial(Prefs { a: 1, b: 2 }),
/// )?;
/// assert_eq!(prefs.get(), Prefs { a: 1, b: 3 });
///
/// prefs.update(|p| p.a = 5)?;
/// assert_eq!(backend.get_item("prefs")?.as_deref(), Some(r#"{"a":5,"b":3}"#));
/// # Ok::<(), listkit::error::StorageError>(())
/// ```
pub struct Stored<T> {
    key: String,
    value: State<T>,
    backend: Arc<dyn StorageBackend>,
    replacer: Option<JsonTransform>,
}

impl<T> Stored<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads the value at the configured key.
    ///
    /// Nothing persisted (or an empty string) counts as an empty object. With no
    /// initial value, the persisted object alone must deserialize into `T`.
    ///
    /// # Errors
    ///
    /// [`StorageError::Parse`] if the persisted string is not JSON,
    /// [`StorageError::Deserialize`] if the merged value does not fit `T`, or
    /// any backend error.
    pub fn open<B>(backend: Arc<B>, config: StorageConfig<T>) -> Result<Self, StorageError>
    where
        B: StorageBackend + 'static,
    {
        let StorageConfig {
            key,
            initial,
            reviver,
            replacer,
        } = config;

        let persisted = match backend.get_item(&key)? {
            Some(raw) if !raw.is_empty() => {
                let parsed: serde_json::Value =
                    serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
                        key: key.clone(),
                        source,
                    })?;
                Some(match &reviver {
                    Some(reviver) => revive(parsed, reviver),
                    None => parsed,
                })
            }
            _ => None,
        };
        log::debug!("[storage] opening '{}' (persisted: {})", key, persisted.is_some());

        let initial = match initial {
            Some(initial) => serde_json::to_value(&initial).map_err(|source| StorageError::Serialize {
                key: key.clone(),
                source,
            })?,
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        let value: T = serde_json::from_value(merge(initial, persisted)).map_err(|source| {
            StorageError::Deserialize {
                key: key.clone(),
                source,
            }
        })?;

        Ok(Self {
            key,
            value: State::new(value),
            backend,
            replacer,
        })
    }

    /// Storage key this value is written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of mutations applied since open.
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.get()
    }

    /// Borrow the current value for the duration of the closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Replaces the value and writes it.
    pub fn set(&self, value: T) -> Result<(), StorageError> {
        self.value.set(value);
        self.persist()
    }

    /// Mutates the value in place and writes it.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StorageError> {
        let result = self.value.update(f);
        self.persist()?;
        Ok(result)
    }

    /// Serializes the current value and overwrites the stored string.
    pub fn persist(&self) -> Result<(), StorageError> {
        let json = self
            .value
            .with(|value| serde_json::to_value(value))
            .map_err(|source| StorageError::Serialize {
                key: self.key.clone(),
                source,
            })?;
        let json = match &self.replacer {
            Some(replacer) => replace(json, replacer),
            None => json,
        };
        let raw = json.to_string();
        log::trace!("[storage] writing '{}' ({} bytes)", self.key, raw.len());
        self.backend.set_item(&self.key, &raw)
    }
}

impl<T: fmt::Debug> fmt::Debug for Stored<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stored")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
