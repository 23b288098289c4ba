//! Core configuration types for mangacache

use std::path::PathBuf;

use crate::cache::CacheStrategy;
use crate::layout::CacheLayout;
use crate::storage::{JsonStorage, StorageBackend};

/// Configuration for initializing a [`MangaCache`](crate::MangaCache)
#[derive(Debug, Clone)]
pub struct CacheConfig<S: StorageBackend = JsonStorage> {
    /// Root directory of the cache tree
    pub cache_dir: PathBuf,

    /// Application name (used to derive the default cache directory)
    pub app_name: String,

    /// Storage backend implementation
    pub storage: S,

    /// In-memory memoization of decoded chapter lists
    pub chapter_list_strategy: CacheStrategy,
}

impl Default for CacheConfig<JsonStorage> {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("."),
            app_name: "app".into(),
            storage: JsonStorage::default(),
            chapter_list_strategy: CacheStrategy::default(),
        }
    }
}

impl<S: StorageBackend> CacheConfig<S> {
    /// Path layout rooted at `cache_dir`, using the backend's file extension
    pub fn layout(&self) -> CacheLayout {
        CacheLayout::new(self.cache_dir.clone(), self.storage.extension())
    }
}

impl CacheConfig<JsonStorage> {
    /// Create a new builder for CacheConfig
    ///
    /// # Example
    /// ```rust
    /// use mangacache::CacheConfig;
    ///
    /// let config = CacheConfig::builder("my-reader")
    ///     .cache_dir("/tmp/my-reader")
    ///     .build();
    /// assert_eq!(config.cache_dir, std::path::PathBuf::from("/tmp/my-reader"));
    /// ```
    pub fn builder(app_name: impl Into<String>) -> CacheConfigBuilder {
        CacheConfigBuilder::new(app_name)
    }
}

/// Builder for creating CacheConfig with a fluent API
#[derive(Debug, Clone)]
pub struct CacheConfigBuilder {
    cache_dir: Option<PathBuf>,
    app_name: String,
    pretty_json: bool,
    chapter_list_strategy: CacheStrategy,
}

impl CacheConfigBuilder {
    /// Create a new builder with the required app name
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            cache_dir: None,
            app_name: app_name.into(),
            pretty_json: false,
            chapter_list_strategy: CacheStrategy::default(),
        }
    }

    /// Set the cache root directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.cache_dir = Some(expanded);
        self
    }

    /// Pretty print cache entries (compact by default)
    pub fn pretty_json(mut self) -> Self {
        self.pretty_json = true;
        self
    }

    /// Use compact JSON (no pretty printing)
    pub fn compact_json(mut self) -> Self {
        self.pretty_json = false;
        self
    }

    /// Memoize decoded chapter lists in memory
    pub fn chapter_list_cache(mut self, strategy: CacheStrategy) -> Self {
        self.chapter_list_strategy = strategy;
        self
    }

    /// Build the CacheConfig
    ///
    /// If `cache_dir` is not set, uses the system cache directory for the app.
    pub fn build(self) -> CacheConfig<JsonStorage> {
        let cache_dir = self.cache_dir.unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|d| d.join(&self.app_name))
                .unwrap_or_else(|| PathBuf::from("."))
        });

        let storage = if self.pretty_json {
            JsonStorage::new()
        } else {
            JsonStorage::compact()
        };

        CacheConfig {
            cache_dir,
            app_name: self.app_name,
            storage,
            chapter_list_strategy: self.chapter_list_strategy,
        }
    }
}
