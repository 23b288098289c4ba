//! Builder for MangaCache
//!
//! This module contains [`MangaCacheBuilder`] which provides a fluent API
//! for creating a [`MangaCache`](super::MangaCache).

use crate::cache::CacheStrategy;
use crate::config::CacheConfigBuilder;
use crate::error::Result;
use crate::source::ChapterSource;
use crate::storage::JsonStorage;
use std::path::PathBuf;

use super::MangaCache;

/// Builder for creating a [`MangaCache`] with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// let cache = MangaCache::builder("my-reader")
///     .cache_dir("~/.cache/my-reader")
///     .chapter_list_cache(CacheStrategy::Lru(32))
///     .build(site_client)?;
/// ```
pub struct MangaCacheBuilder {
    config_builder: CacheConfigBuilder,
}

impl MangaCacheBuilder {
    /// Create a new builder with the required app name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_builder: CacheConfigBuilder::new(app_name),
        }
    }

    /// Set the cache root directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.cache_dir(path);
        self
    }

    /// Pretty print cache entries.
    pub fn pretty_json(mut self) -> Self {
        self.config_builder = self.config_builder.pretty_json();
        self
    }

    /// Use compact JSON (the default).
    pub fn compact_json(mut self) -> Self {
        self.config_builder = self.config_builder.compact_json();
        self
    }

    /// Memoize decoded chapter lists in memory.
    pub fn chapter_list_cache(mut self, strategy: CacheStrategy) -> Self {
        self.config_builder = self.config_builder.chapter_list_cache(strategy);
        self
    }

    /// Build the [`MangaCache`] around `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chapter-list cache strategy is invalid.
    pub fn build(self, source: impl ChapterSource + 'static) -> Result<MangaCache<JsonStorage>> {
        MangaCache::new(self.config_builder.build(), source)
    }
}
