//! Deferred clearing of text highlight after shift-click range selection.

use std::sync::Arc;
use std::time::Duration;

/// Delay before the highlight is cleared.
pub const HIGHLIGHT_CLEAR_DELAY: Duration = Duration::from_millis(10);

/// Host hook that removes any active text highlight.
///
/// Shift-clicking a row usually highlights the text between the two clicks.
/// [`Selection::select_until`](super::Selection::select_until) asks the host to
/// clear it shortly afterwards.
pub trait HighlightClearer: Send + Sync {
    /// Clears the current text highlight.
    fn clear_highlight(&self);
}

impl<F> HighlightClearer for F
where
    F: Fn() + Send + Sync,
{
    fn clear_highlight(&self) {
        self()
    }
}

/// Runs the clearer after `delay` without blocking the caller.
///
/// Uses the ambient tokio runtime when there is one, a detached thread otherwise.
pub(crate) fn schedule_clear(clearer: Arc<dyn HighlightClearer>, delay: Duration) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                clearer.clear_highlight();
            });
        }
        Err(_) => {
            std::thread::spawn(move || {
                std::thread::sleep(delay);
                clearer.clear_highlight();
            });
        }
    }
}
