//! Shared reactive source handles.
//!
//! Helpers in this crate never subscribe to anything. Instead every source is a
//! [`State`] carrying a version counter, and derived values are cached in a
//! [`Memo`] keyed by the versions they were computed from. Reading a derived
//! value after a mutation recomputes it once; reading it again is free.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Shared mutable value with a change counter.
///
/// `State<T>` uses `Arc<RwLock<T>>` internally, so it is cheap to clone and every
/// clone observes the same value. Each [`set`](State::set) or
/// [`update`](State::update) bumps [`version`](State::version), which is how
/// derived values notice that they are stale.
///
/// # Example
///
/// ```
/// use listkit::State;
///
/// let items = State::new(vec![1, 2, 3]);
/// let before = items.version();
///
/// items.update(|v| v.push(4));
///
/// assert_eq!(items.with(|v| v.len()), 4);
/// assert!(items.version() > before);
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    version: Arc<AtomicU64>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Borrow the current value for the duration of the closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Update the value using a closure
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = f(&mut guard);
        self.version.fetch_add(1, Ordering::SeqCst);
        result
    }

    /// Number of mutations applied so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for State<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Single-slot cache for a derived value.
///
/// The key describes everything the value was computed from. As long as the key
/// passed to [`get_or_compute`](Memo::get_or_compute) is unchanged, the cached
/// value is returned.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Mutex<Option<(K, V)>>,
}

impl<K, V> Memo<K, V> {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Drop the cached value so the next read recomputes.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(K, V)>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    /// Return the cached value for `key`, computing it with `f` if the key changed.
    pub fn get_or_compute(&self, key: K, f: impl FnOnce() -> V) -> V {
        let mut slot = self.lock();
        if let Some((cached_key, value)) = slot.as_ref()
            && *cached_key == key
        {
            return value.clone();
        }
        let value = f();
        *slot = Some((key, value.clone()));
        value
    }
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
