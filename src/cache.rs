//! In-memory cache strategy for decoded chapter lists

/// How decoded chapter lists are memoized in front of the disk cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStrategy {
    /// Always read from disk (default). External cache clears are seen immediately.
    #[default]
    None,
    /// Keep the most recently used lists in memory, up to the given number of titles
    Lru(usize),
}

impl CacheStrategy {
    /// Validate cache strategy configuration
    ///
    /// # Errors
    ///
    /// Returns error if LRU size is 0 (would panic on NonZeroUsize)
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            CacheStrategy::Lru(0) => Err(crate::Error::InvalidCacheStrategy(
                "LRU cache size must be greater than 0".into(),
            )),
            _ => Ok(()),
        }
    }
}
