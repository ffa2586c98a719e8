//! Page-based slicing of a list.
//!
//! [`Pagination`] observes a shared item list and exposes the current page.
//! When the list (or the page size) changes so that the current page no longer
//! exists, the page index is pulled back to the last page on the next read.

mod config;

pub use config::*;

use std::sync::Mutex;

use crate::state::Memo;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    index: usize,
    size: usize,
}

/// Reactive pagination over a list of items.
///
/// # Example
///
/// ```
/// use listkit::State;
/// use listkit::pagination::{Pagination, PaginationConfig};
///
/// let items = State::new((0..25).collect::<Vec<_>>());
/// let pages = Pagination::new(items.clone(), PaginationConfig::default());
///
/// assert_eq!(pages.page_count(), 3);
/// pages.goto(-1);
/// assert_eq!(pages.page_items(), vec![20, 21, 22, 23, 24]);
/// assert!(pages.is_last_page());
///
/// items.update(|v| v.truncate(12));
/// assert_eq!(pages.page_index(), 1);
/// ```
#[derive(Debug)]
pub struct Pagination<T> {
    items: State<Vec<T>>,
    cursor: State<Cursor>,
    /// Page count seen on the previous read; clamping only runs when it changes.
    observed_count: Mutex<usize>,
    page_items: Memo<(u64, Cursor), Vec<T>>,
}

impl<T> Pagination<T> {
    /// Creates a pagination over `items`.
    pub fn new(items: impl Into<State<Vec<T>>>, config: PaginationConfig) -> Self {
        let items = items.into();
        let cursor = Cursor {
            index: config.initial_page_index,
            size: config.initial_page_size.max(1),
        };
        let count = count_pages(items.with(Vec::len), cursor.size);
        Self {
            items,
            cursor: State::new(cursor),
            observed_count: Mutex::new(count),
            page_items: Memo::new(),
        }
    }

    /// The observed item list.
    pub fn items(&self) -> &State<Vec<T>> {
        &self.items
    }

    /// Number of items per page.
    pub fn page_size(&self) -> usize {
        self.cursor.with(|c| c.size)
    }

    /// Sets the number of items per page (at least 1).
    pub fn set_page_size(&self, size: usize) {
        let size = size.max(1);
        self.cursor.update(|c| c.size = size);
        self.sync();
    }

    /// 0-indexed current page.
    pub fn page_index(&self) -> usize {
        self.sync();
        self.cursor.with(|c| c.index)
    }

    /// Sets the current page.
    ///
    /// Negative and out-of-range values wrap around the page count, so `-1` is
    /// the last page. Does nothing while the list is empty.
    pub fn set_page_index(&self, index: isize) {
        let count = self.sync();
        if count == 0 {
            return;
        }
        let index = index.rem_euclid(count as isize) as usize;
        log::trace!("[pagination] page index -> {}", index);
        self.cursor.update(|c| c.index = index);
    }

    /// Number of pages, 0 for an empty list.
    pub fn page_count(&self) -> usize {
        self.sync()
    }

    /// Whether the current page is the last one. Always `false` for an empty list.
    pub fn is_last_page(&self) -> bool {
        let count = self.sync();
        count > 0 && self.cursor.with(|c| c.index + 1 == count)
    }

    /// Go to page number (0-indexed). Negative values wrap around.
    pub fn goto(&self, index: isize) {
        self.set_page_index(index);
    }

    /// Go to the next page, wrapping to the first after the last.
    pub fn next(&self) {
        let index = self.page_index() as isize;
        self.set_page_index(index + 1);
    }

    /// Go to the previous page, wrapping to the last before the first.
    pub fn prev(&self) {
        let index = self.page_index() as isize;
        self.set_page_index(index - 1);
    }

    /// Recomputes the page count and clamps the index when the count changed.
    fn sync(&self) -> usize {
        let cursor = self.cursor.get();
        let count = count_pages(self.items.with(Vec::len), cursor.size);

        let mut observed = match self.observed_count.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *observed != count {
            *observed = count;
            let last = count.saturating_sub(1);
            if cursor.index > last {
                log::debug!(
                    "[pagination] page count now {}, clamping index {} -> {}",
                    count,
                    cursor.index,
                    last
                );
                self.cursor.update(|c| c.index = last);
            }
        }
        count
    }
}

impl<T: Clone> Pagination<T> {
    /// Items on the current page.
    ///
    /// Empty when the list is empty or the index is past the end.
    pub fn page_items(&self) -> Vec<T> {
        self.sync();
        let cursor = self.cursor.get();
        let key = (self.items.version(), cursor);
        self.page_items.get_or_compute(key, || {
            let skip = cursor.index.saturating_mul(cursor.size);
            self.items
                .with(|items| items.iter().skip(skip).take(cursor.size).cloned().collect())
        })
    }
}

fn count_pages(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}
