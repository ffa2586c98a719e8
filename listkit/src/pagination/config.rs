//! Pagination configuration

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Initial state of a [`Pagination`](super::Pagination).
///
/// # Example
///
/// ```
/// use listkit::pagination::PaginationConfig;
///
/// let config = PaginationConfig::default()
///     .with_page_size(25)
///     .with_page_index(2);
/// assert_eq!(config.initial_page_size, 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items per page.
    ///
    /// Default: 10
    pub initial_page_size: usize,

    /// 0-indexed starting page.
    ///
    /// Default: 0
    pub initial_page_index: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_PAGE_SIZE,
            initial_page_index: 0,
        }
    }
}

impl PaginationConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size. Zero falls back to the default.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.initial_page_size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        self
    }

    /// Sets the initial page index.
    pub fn with_page_index(mut self, index: usize) -> Self {
        self.initial_page_index = index;
        self
    }
}
