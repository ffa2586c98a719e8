//! Reactive state helpers for list views
//!
//! Four independent helpers over a shared item list:
//!
//! - [`pagination::Pagination`]: page-based slicing with automatic index clamping
//! - [`selection::Selection`]: multi-item selection with shift-click range select
//! - [`sorting::Sorting`]: multi-column sort state and comparator composition
//! - [`storage::Stored`]: a value mirrored to a persistent key/value store
//!
//! Sources are [`State`] handles. Helpers compare source versions on every read
//! and recompute derived values only when something changed.

pub mod error;
pub mod model;
pub mod pagination;
pub mod selection;
pub mod sorting;
pub mod storage;

mod state;

pub use state::*;
