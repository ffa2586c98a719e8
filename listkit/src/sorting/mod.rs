//! Multi-column sort state and comparator composition.
//!
//! [`Sorting`] keeps an ordered list of `(key, direction)` entries restricted to
//! the keys of its column registry, and composes a comparator from them: the
//! first entry decides unless it ties, then the second, and so on.

mod column;
mod direction;

pub use column::*;
pub use direction::*;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::FieldAccess;
use crate::state::Memo;
use crate::state::State;

type Registry<T> = Arc<HashMap<String, ColumnCmp<T>>>;

/// Reactive sorting for a set of columns.
///
/// # Example
///
/// ```
/// use listkit::model::Record;
/// use listkit::sorting::{ColumnDef, Sorting};
///
/// let sorting = Sorting::new(vec![ColumnDef::<Record>::new("name")]);
/// let mut items = vec![
///     Record::new().set("name", "b"),
///     Record::new(),
///     Record::new().set("name", "a"),
/// ];
///
/// sorting.toggle("name");
/// sorting.sort(&mut items);
///
/// let names: Vec<_> = items.iter().map(|r| r.get("name").cloned()).collect();
/// assert_eq!(names, vec![Some("a".into()), Some("b".into()), None]);
/// ```
pub struct Sorting<T> {
    columns: State<Vec<ColumnDef<T>>>,
    resolve: Resolver<T>,
    state: State<Vec<SortEntry>>,
    registry: Memo<u64, Registry<T>>,
    comparator: Memo<(u64, u64), Option<Comparator<T>>>,
}

impl<T: FieldAccess + 'static> Sorting<T> {
    /// Creates a sorting over `columns` with an empty sort state.
    ///
    /// Columns without an explicit comparator read their values by key or
    /// [`sort_by`](ColumnDef::sort_by) accessor.
    pub fn new(columns: impl Into<State<Vec<ColumnDef<T>>>>) -> Self {
        Self::with_resolver(columns, |column| Some(column.comparator()))
    }
}

impl<T: 'static> Sorting<T> {
    /// Creates a sorting that only uses explicit column comparators.
    ///
    /// For items without field access. Columns lacking
    /// [`with_cmp`](ColumnDef::with_cmp) are not registered.
    pub fn with_comparators(columns: impl Into<State<Vec<ColumnDef<T>>>>) -> Self {
        Self::with_resolver(columns, ColumnDef::explicit_cmp)
    }

    fn with_resolver(columns: impl Into<State<Vec<ColumnDef<T>>>>, resolve: Resolver<T>) -> Self {
        Self {
            columns: columns.into(),
            resolve,
            state: State::new(Vec::new()),
            registry: Memo::new(),
            comparator: Memo::new(),
        }
    }

    /// The observed column definitions.
    pub fn columns(&self) -> &State<Vec<ColumnDef<T>>> {
        &self.columns
    }

    /// Shared handle to the sort state.
    pub fn state(&self) -> &State<Vec<SortEntry>> {
        &self.state
    }

    fn registry(&self) -> Registry<T> {
        self.registry.get_or_compute(self.columns.version(), || {
            Arc::new(self.columns.with(|columns| build_registry(columns, self.resolve)))
        })
    }

    /// Whether `key` names a registered column.
    pub fn has_key(&self, key: &str) -> bool {
        self.registry().contains_key(key)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Sort state as an ordered list.
    pub fn sorting_array(&self) -> Vec<SortEntry> {
        self.state.get()
    }

    /// Sort state as `(key, direction)` pairs, in priority order.
    pub fn sorting_state(&self) -> Vec<(String, Direction)> {
        self.state
            .with(|entries| entries.iter().map(|e| (e.key.clone(), e.dir)).collect())
    }

    /// Replaces the sort state from `(key, sign)` pairs.
    ///
    /// Pairs with a zero sign or an unknown key are dropped; order is kept.
    pub fn set_sorting_state<K: Into<String>>(&self, entries: impl IntoIterator<Item = (K, i32)>) {
        let registry = self.registry();
        let entries: Vec<SortEntry> = entries
            .into_iter()
            .filter_map(|(key, sign)| {
                let key = key.into();
                let dir = Direction::from_sign(sign)?;
                registry.contains_key(&key).then(|| SortEntry::new(key, dir))
            })
            .collect();
        self.state.set(entries);
    }

    /// Composed comparator, or `None` while the sort state is empty.
    ///
    /// Entries whose key has left the registry are skipped.
    pub fn comparator(&self) -> Option<Comparator<T>> {
        let key = (self.columns.version(), self.state.version());
        self.comparator.get_or_compute(key, || {
            let entries = self.state.get();
            if entries.is_empty() {
                return None;
            }
            let registry = self.registry();
            let chain: Vec<(ColumnCmp<T>, Direction)> = entries
                .iter()
                .filter_map(|entry| registry.get(&entry.key).map(|cmp| (Arc::clone(cmp), entry.dir)))
                .collect();
            let comparator: Comparator<T> = Arc::new(move |a: &T, b: &T| {
                chain
                    .iter()
                    .map(|(cmp, dir)| cmp(a, b, *dir))
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
            Some(comparator)
        })
    }

    /// Sorts `items` in place with the current comparator. Stable.
    pub fn sort(&self, items: &mut [T]) {
        if let Some(cmp) = self.comparator() {
            items.sort_by(|a, b| cmp(a, b));
        }
    }

    /// Returns a sorted copy of `items`.
    pub fn sorted(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = items.to_vec();
        self.sort(&mut items);
        items
    }

    // =========================================================================
    // Mutators
    //
    // All of these do nothing when the key is not a registered column.
    // =========================================================================

    /// Replaces the whole sort state with a single key, or clears it when `dir`
    /// is `None`.
    pub fn set(&self, key: &str, dir: Option<Direction>) {
        if !self.has_key(key) {
            return;
        }
        let entries = dir.map(|dir| vec![SortEntry::new(key, dir)]).unwrap_or_default();
        self.state.set(entries);
    }

    /// Adds `key` as the last sort key, replacing any existing entry for it.
    pub fn add(&self, key: &str, dir: Direction) {
        if !self.has_key(key) {
            return;
        }
        self.state.update(|entries| {
            entries.retain(|e| e.key != key);
            entries.push(SortEntry::new(key, dir));
        });
    }

    /// Removes `key` from the sort state.
    pub fn remove(&self, key: &str) {
        if !self.has_key(key) {
            return;
        }
        self.state.update(|entries| entries.retain(|e| e.key != key));
    }

    /// Cycles `key` through ascending, descending and removed.
    pub fn toggle(&self, key: &str) {
        if !self.has_key(key) {
            return;
        }
        self.state.update(|entries| match entries.iter().position(|e| e.key == key) {
            None => entries.push(SortEntry::new(key, Direction::Asc)),
            Some(idx) => match entries[idx].dir {
                Direction::Asc => entries[idx].dir = Direction::Desc,
                Direction::Desc => {
                    entries.remove(idx);
                }
            },
        });
        log::trace!("[sorting] toggled '{}'", key);
    }

    /// Clears the sort state.
    pub fn clear(&self) {
        self.state.set(Vec::new());
    }
}

impl<T> std::fmt::Debug for Sorting<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sorting")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
