//! Multi-item selection with shift-click range select.
//!
//! Selection is tracked by id in a global list that survives the items going
//! out of view (another page, a filter). The visible selection is the part of
//! the global list whose ids are currently in `items`.

mod highlight;
mod id;

pub use highlight::*;
pub use id::*;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::model::FieldAccess;
use crate::state::Memo;
use crate::state::State;

/// Shared function reading an id from an item. `None` means not selectable.
pub type IdFn<T, Id> = Arc<dyn Fn(&T) -> Option<Id> + Send + Sync>;

/// Tri-state summary of the visible selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SelectionState {
    /// Nothing visible is selected, or nothing is visible.
    #[default]
    None,
    /// Some but not all visible items are selected.
    Some,
    /// Every visible item is selected.
    All,
}

/// Options for a [`Selection`].
#[derive(Clone)]
pub struct SelectionConfig {
    /// Hook used to clear text highlight after a range select.
    pub highlight_clearer: Option<Arc<dyn HighlightClearer>>,

    /// How long to wait before clearing the highlight.
    ///
    /// Default: 10ms
    pub highlight_delay: Duration,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            highlight_clearer: None,
            highlight_delay: HIGHLIGHT_CLEAR_DELAY,
        }
    }
}

impl SelectionConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the highlight clearing hook.
    pub fn with_highlight_clearer(mut self, clearer: impl HighlightClearer + 'static) -> Self {
        self.highlight_clearer = Some(Arc::new(clearer));
        self
    }

    /// Sets the highlight clearing delay.
    pub fn with_highlight_delay(mut self, delay: Duration) -> Self {
        self.highlight_delay = delay;
        self
    }
}

impl fmt::Debug for SelectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionConfig")
            .field("highlight_clearer", &self.highlight_clearer.is_some())
            .field("highlight_delay", &self.highlight_delay)
            .finish()
    }
}

/// Reactive selection over a list of items.
///
/// # Example
///
/// ```
/// use listkit::State;
/// use listkit::model::Record;
/// use listkit::selection::{RowId, Selection};
///
/// let items = State::new(
///     (1..=4).map(|n| Record::new().set("id", n)).collect::<Vec<_>>(),
/// );
/// let selection = Selection::by_id(items);
///
/// selection.set_selection([RowId::from(2)]);
/// selection.select_until(&RowId::from(4), false);
///
/// assert_eq!(
///     selection.selection(),
///     vec![RowId::from(2), RowId::from(3), RowId::from(4)],
/// );
/// assert!(selection.is_some());
/// ```
pub struct Selection<T, Id = RowId> {
    items: State<Vec<T>>,
    id_of: IdFn<T, Id>,
    global: State<Vec<Id>>,
    config: SelectionConfig,
    page_ids: Memo<u64, Vec<Id>>,
    visible: Memo<(u64, u64), Vec<Id>>,
}

impl<T, Id> Selection<T, Id>
where
    T: 'static,
    Id: Clone + Eq + Hash + 'static,
{
    /// Creates a selection reading ids with `id_of`.
    pub fn new(
        items: impl Into<State<Vec<T>>>,
        id_of: impl Fn(&T) -> Id + Send + Sync + 'static,
    ) -> Self {
        Self::with_id_fn(items, Arc::new(move |item: &T| Some(id_of(item))))
    }

    /// Creates a selection from a shared id function.
    ///
    /// Items for which the function returns `None` cannot be selected and do
    /// not count as visible.
    pub fn with_id_fn(items: impl Into<State<Vec<T>>>, id_of: IdFn<T, Id>) -> Self {
        Self {
            items: items.into(),
            id_of,
            global: State::new(Vec::new()),
            config: SelectionConfig::default(),
            page_ids: Memo::new(),
            visible: Memo::new(),
        }
    }

    /// Replaces the options of this selection.
    pub fn with_config(mut self, config: SelectionConfig) -> Self {
        self.config = config;
        self
    }

    /// The observed item list.
    pub fn items(&self) -> &State<Vec<T>> {
        &self.items
    }

    /// Ids of the visible items, in item order.
    pub fn page_ids(&self) -> Vec<Id> {
        self.page_ids.get_or_compute(self.items.version(), || {
            self.items
                .with(|items| items.iter().filter_map(|item| (self.id_of)(item)).collect())
        })
    }

    // =========================================================================
    // Visible selection
    // =========================================================================

    /// Selected ids that are currently visible.
    ///
    /// Ordered as in the global selection, so the last entry is the most recently
    /// selected one. Never contains duplicates.
    pub fn selection(&self) -> Vec<Id> {
        let key = (self.items.version(), self.global.version());
        self.visible.get_or_compute(key, || {
            let visible: HashSet<Id> = self.page_ids().into_iter().collect();
            let mut seen = HashSet::new();
            self.global.with(|global| {
                global
                    .iter()
                    .filter(|id| visible.contains(*id) && seen.insert((*id).clone()))
                    .cloned()
                    .collect()
            })
        })
    }

    /// Replaces the visible part of the selection.
    ///
    /// Selected ids that are not visible are kept.
    pub fn set_selection(&self, ids: impl IntoIterator<Item = Id>) {
        let visible: HashSet<Id> = self.page_ids().into_iter().collect();
        self.global.update(|global| {
            let kept: Vec<Id> = global.drain(..).filter(|id| !visible.contains(id)).collect();
            *global = dedup(kept.into_iter().chain(ids).collect());
        });
    }

    /// Whether `id` is selected, visible or not.
    pub fn is_selected(&self, id: &Id) -> bool {
        self.global.with(|global| global.contains(id))
    }

    // =========================================================================
    // Global selection
    // =========================================================================

    /// All selected ids, including those no longer in `items`.
    pub fn global_selection(&self) -> Vec<Id> {
        self.global.get()
    }

    /// Replaces the global selection.
    pub fn set_global_selection(&self, ids: Vec<Id>) {
        self.global.set(ids);
    }

    /// Mutates the global selection in place.
    pub fn update_global_selection<R>(&self, f: impl FnOnce(&mut Vec<Id>) -> R) -> R {
        self.global.update(f)
    }

    /// Shared handle to the global selection.
    pub fn global_state(&self) -> &State<Vec<Id>> {
        &self.global
    }

    // =========================================================================
    // Summary
    // =========================================================================

    /// Current tri-state summary.
    pub fn state(&self) -> SelectionState {
        // Items may share an id; count each id once, as `selection` does.
        let visible = self.page_ids().into_iter().collect::<HashSet<_>>().len();
        let selected = self.selection().len();
        if visible == 0 || selected == 0 {
            SelectionState::None
        } else if selected == visible {
            SelectionState::All
        } else {
            SelectionState::Some
        }
    }

    /// Are all visible items selected?
    pub fn is_all(&self) -> bool {
        self.state() == SelectionState::All
    }

    /// Are some but not all visible items selected?
    pub fn is_some(&self) -> bool {
        self.state() == SelectionState::Some
    }

    /// Is no visible item selected?
    pub fn is_none(&self) -> bool {
        self.state() == SelectionState::None
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Selects every visible item, or clears the visible selection if all are
    /// already selected.
    pub fn toggle_all(&self) {
        if self.state() == SelectionState::All {
            self.set_selection(Vec::new());
        } else {
            self.set_selection(self.page_ids());
        }
    }

    /// Selects from the most recently selected item to `target` (shift-click).
    ///
    /// The range is inclusive and taken in visible order, whichever end comes
    /// first. `target` becomes the new anchor. Does nothing when nothing is
    /// selected or `target` is not visible.
    ///
    /// With `clear_highlight`, the configured [`HighlightClearer`] runs shortly
    /// after.
    pub fn select_until(&self, target: &Id, clear_highlight: bool) {
        let mut selection = self.selection();
        let Some(anchor) = selection.last().cloned() else {
            return;
        };
        let ids = self.page_ids();
        let (Some(from), Some(to)) = (
            ids.iter().position(|id| *id == anchor),
            ids.iter().position(|id| id == target),
        ) else {
            return;
        };
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        log::trace!("[selection] range select {}..={}", start, end);

        selection.extend(ids[start..=end].iter().cloned());
        selection.retain(|id| id != target);
        selection.push(target.clone());
        self.set_selection(selection);

        if clear_highlight && let Some(clearer) = &self.config.highlight_clearer {
            schedule_clear(Arc::clone(clearer), self.config.highlight_delay);
        }
    }
}

impl<T> Selection<T, RowId>
where
    T: FieldAccess + 'static,
{
    /// Creates a selection reading ids from the `id` field.
    pub fn by_id(items: impl Into<State<Vec<T>>>) -> Self {
        Self::by_field(items, DEFAULT_ID_FIELD)
    }

    /// Creates a selection reading ids from the given field.
    pub fn by_field(items: impl Into<State<Vec<T>>>, field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_id_fn(
            items,
            Arc::new(move |item: &T| item.field(&field).as_ref().and_then(RowId::from_value)),
        )
    }
}

impl<T, Id: fmt::Debug> fmt::Debug for Selection<T, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("global", &self.global)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Removes duplicates, keeping the first occurrence.
fn dedup<Id: Clone + Eq + Hash>(ids: Vec<Id>) -> Vec<Id> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_items_without_id_are_not_visible() {
        let items = vec![
            serde_json::json!({ "id": 1 }),
            serde_json::json!({ "name": "no id" }),
        ];
        let selection = Selection::by_id(items);
        assert_eq!(selection.page_ids(), vec![RowId::Int(1)]);

        selection.toggle_all();
        assert!(selection.is_all());
    }
}
