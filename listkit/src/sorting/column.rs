//! Column definitions and the per-key comparator registry.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Direction;
use super::NullOrder;
use crate::model::Accessor;
use crate::model::FieldAccess;

/// Comparator for one column. Receives the active direction.
pub type ColumnCmp<T> = Arc<dyn Fn(&T, &T, Direction) -> Ordering + Send + Sync>;

/// Comparator over whole items, composed from the sort state.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Turns a column into its comparator, or `None` if it cannot be sorted.
pub(crate) type Resolver<T> = fn(&ColumnDef<T>) -> Option<ColumnCmp<T>>;

/// A sortable column.
///
/// Without an explicit comparator, values are read with `sort_by` (or the key
/// itself as a property/dotted path) and compared naturally.
///
/// # Example
///
/// ```
/// use listkit::model::Record;
/// use listkit::sorting::{ColumnDef, NullOrder};
///
/// let columns: Vec<ColumnDef<Record>> = vec![
///     ColumnDef::new("name"),
///     ColumnDef::new("owner").sort_by("owner.name").nulls(NullOrder::First),
/// ];
/// ```
pub struct ColumnDef<T> {
    /// Column key used by the sort state.
    pub key: String,
    /// Explicit comparator, used verbatim when set.
    pub cmp: Option<ColumnCmp<T>>,
    /// How to read the sort value. Defaults to the key.
    pub sort_by: Option<Accessor<T>>,
    /// Placement of non-comparable values.
    pub nulls: NullOrder,
}

impl<T> ColumnDef<T> {
    /// Creates a column sorted by the field named `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cmp: None,
            sort_by: None,
            nulls: NullOrder::default(),
        }
    }

    /// Uses an explicit comparator for this column.
    pub fn with_cmp(mut self, cmp: impl Fn(&T, &T, Direction) -> Ordering + Send + Sync + 'static) -> Self {
        self.cmp = Some(Arc::new(cmp));
        self
    }

    /// Reads sort values with the given accessor.
    pub fn sort_by(mut self, accessor: impl Into<Accessor<T>>) -> Self {
        self.sort_by = Some(accessor.into());
        self
    }

    /// Sets the placement of non-comparable values.
    pub fn nulls(mut self, nulls: NullOrder) -> Self {
        self.nulls = nulls;
        self
    }

    /// The comparator given with [`with_cmp`](ColumnDef::with_cmp), if any.
    pub fn explicit_cmp(&self) -> Option<ColumnCmp<T>> {
        self.cmp.clone()
    }
}

impl<T: FieldAccess + 'static> ColumnDef<T> {
    /// Builds the comparator for this column.
    pub fn comparator(&self) -> ColumnCmp<T> {
        if let Some(cmp) = &self.cmp {
            return Arc::clone(cmp);
        }
        let get = match &self.sort_by {
            Some(accessor) => accessor.resolve(),
            None => Accessor::<T>::parse(&self.key).resolve(),
        };
        let nulls = self.nulls;
        Arc::new(move |a: &T, b: &T, dir: Direction| {
            let va = get(a);
            let vb = get(b);
            match (va.is_comparable(), vb.is_comparable()) {
                // Mismatched kinds tie.
                (true, true) => dir.apply(va.compare(&vb).unwrap_or(Ordering::Equal)),
                (ca, cb) => nulls.place(ca, cb, dir),
            }
        })
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            cmp: self.cmp.clone(),
            sort_by: self.sort_by.clone(),
            nulls: self.nulls,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("cmp", &self.cmp.is_some())
            .field("sort_by", &self.sort_by)
            .field("nulls", &self.nulls)
            .finish()
    }
}

/// Comparators by column key. Columns with an empty key or no comparator are
/// skipped; a later column replaces an earlier one with the same key.
pub(crate) fn build_registry<T>(
    columns: &[ColumnDef<T>],
    resolve: Resolver<T>,
) -> HashMap<String, ColumnCmp<T>> {
    let mut registry = HashMap::with_capacity(columns.len());
    for column in columns {
        if column.key.is_empty() {
            continue;
        }
        match resolve(column) {
            Some(cmp) => {
                registry.insert(column.key.clone(), cmp);
            }
            None => log::debug!("[sorting] column '{}' has no comparator, skipped", column.key),
        }
    }
    registry
}
