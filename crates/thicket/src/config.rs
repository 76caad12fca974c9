//! Engine Configuration

/// Selection engine configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries listed by [`Selection::summary`](crate::Selection::summary)
    pub summary_limit: usize,

    /// Parsed selectors kept by the bundled DOM host.
    ///
    /// Only read when the host is built with `DomHost::with_config`; queries
    /// ignore it.
    pub selector_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_limit: 10,
            selector_cache_capacity: 64,
        }
    }
}
