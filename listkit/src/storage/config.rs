//! Storage configuration

use std::fmt;
use std::sync::Arc;

use super::JsonTransform;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "use-storage-store";

/// Options for a [`Stored`](super::Stored) value.
///
/// # Example
///
/// ```
/// use listkit::storage::StorageConfig;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Prefs {
///     page_size: usize,
/// }
///
/// let config = StorageConfig::new()
///     .with_key("table-prefs")
///     .with_initial(Prefs { page_size: 25 });
/// assert_eq!(config.key, "table-prefs");
/// ```
pub struct StorageConfig<T> {
    /// Storage key.
    ///
    /// Default: `use-storage-store`
    pub key: String,

    /// Values used for fields that have not been persisted yet.
    pub initial: Option<T>,

    /// Applied to every parsed JSON node, children first.
    pub reviver: Option<JsonTransform>,

    /// Applied to every JSON node before writing, parents first.
    pub replacer: Option<JsonTransform>,
}

impl<T> Default for StorageConfig<T> {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            initial: None,
            reviver: None,
            replacer: None,
        }
    }
}

impl<T> StorageConfig<T> {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage key. An empty key falls back to the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.key = if key.is_empty() {
            DEFAULT_STORAGE_KEY.to_string()
        } else {
            key
        };
        self
    }

    /// Sets the initial value.
    pub fn with_initial(mut self, initial: T) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Sets the reviver. Returning `None` drops the node.
    pub fn with_reviver(
        mut self,
        reviver: impl Fn(&str, serde_json::Value) -> Option<serde_json::Value> + Send + Sync + 'static,
    ) -> Self {
        self.reviver = Some(Arc::new(reviver));
        self
    }

    /// Sets the replacer. Returning `None` drops the node.
    pub fn with_replacer(
        mut self,
        replacer: impl Fn(&str, serde_json::Value) -> Option<serde_json::Value> + Send + Sync + 'static,
    ) -> Self {
        self.replacer = Some(Arc::new(replacer));
        self
    }
}

impl<T> fmt::Debug for StorageConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("key", &self.key)
            .field("initial", &self.initial.is_some())
            .field("reviver", &self.reviver.is_some())
            .field("replacer", &self.replacer.is_some())
            .finish()
    }
}
