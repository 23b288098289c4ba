//! Main cache facade
//!
//! This module contains the [`MangaCache`] struct which is the primary entry point
//! for UI code: page and chapter-list lookups, title details, per-chapter reading
//! state and chapter navigation, all sharing one cache root and one source.

mod builder;

pub use builder::MangaCacheBuilder;

use crate::chapter_config::ConfigStore;
use crate::chapters::{ChapterListCache, PageCache};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::layout::TitleEntry;
use crate::model::{ChapterConfig, ChapterRecords, MangaDetails, PageSet};
use crate::navigator::{ChapterNavigator, Direction, Navigation};
use crate::source::ChapterSource;
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::CacheStore;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// File-backed cache for one reader application.
///
/// # Example
///
/// ```rust,no_run
/// use mangacache::{ChapterRecord, ChapterSource, Direction, MangaCache, MangaDetails, SourceError};
///
/// struct Site;
///
/// impl ChapterSource for Site {
///     fn fetch_chapter_pages(&self, _url: &str) -> Result<Vec<String>, SourceError> {
///         Ok(vec!["https://cdn.example.org/1.jpg".into()])
///     }
///     fn fetch_chapter_list(&self, _url: &str) -> Result<Vec<ChapterRecord>, SourceError> {
///         Ok(vec![ChapterRecord::new("https://example.org/m/c2"), ChapterRecord::new("https://example.org/m/c1")])
///     }
///     fn fetch_manga_details(&self, _url: &str) -> Result<MangaDetails, SourceError> {
///         Ok(MangaDetails::default())
///     }
/// }
///
/// let cache = MangaCache::builder("my-reader")
///     .cache_dir("~/.cache/my-reader")
///     .build(Site)?;
///
/// let next = cache.navigate("https://example.org/m", "https://example.org/m/c1", Direction::Forward)?;
/// # Ok::<(), mangacache::Error>(())
/// ```
pub struct MangaCache<S: StorageBackend = JsonStorage> {
    config: CacheConfig<S>,
    store: Arc<CacheStore<S>>,
    source: Arc<dyn ChapterSource>,
    chapters: Arc<ChapterListCache<S>>,
    pages: Arc<PageCache<S>>,
    configs: ConfigStore<S>,
    navigator: ChapterNavigator<S>,
}

impl MangaCache<JsonStorage> {
    /// Create a builder for a JSON-backed cache
    pub fn builder(app_name: impl Into<String>) -> MangaCacheBuilder {
        MangaCacheBuilder::new(app_name)
    }
}

impl<S: StorageBackend + 'static> MangaCache<S> {
    /// Create a cache from a resolved configuration.
    ///
    /// The cache root is created lazily, on the first entry written under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the chapter-list cache strategy is invalid.
    pub fn new(config: CacheConfig<S>, source: impl ChapterSource + 'static) -> Result<Self> {
        let source: Arc<dyn ChapterSource> = Arc::new(source);
        let store = Arc::new(CacheStore::new(config.layout(), config.storage.clone()));

        let chapters = Arc::new(ChapterListCache::new(
            Arc::clone(&store),
            Arc::clone(&source),
            config.chapter_list_strategy,
        )?);
        let pages = Arc::new(PageCache::new(Arc::clone(&store), Arc::clone(&source)));
        let configs = ConfigStore::new(Arc::clone(&store));
        let navigator = ChapterNavigator::new(Arc::clone(&chapters), Arc::clone(&pages));

        info!("manga cache rooted at {}", config.cache_dir.display());

        Ok(Self {
            config,
            store,
            source,
            chapters,
            pages,
            configs,
            navigator,
        })
    }

    pub fn config(&self) -> &CacheConfig<S> {
        &self.config
    }

    pub fn cache_dir(&self) -> &Path {
        &self.config.cache_dir
    }

    pub fn store(&self) -> &CacheStore<S> {
        &self.store
    }

    pub fn chapter_lists(&self) -> &ChapterListCache<S> {
        &self.chapters
    }

    pub fn page_cache(&self) -> &PageCache<S> {
        &self.pages
    }

    pub fn configs(&self) -> &ConfigStore<S> {
        &self.configs
    }

    pub fn navigator(&self) -> &ChapterNavigator<S> {
        &self.navigator
    }

    // -------------------------------------------------------------------------
    // Pages
    // -------------------------------------------------------------------------

    /// Page urls of a chapter, fetched on first use.
    ///
    /// # Errors
    ///
    /// See [`CacheStore::fetch_or_load`].
    pub fn pages(&self, manga_url: &str, chapter_url: &str) -> Result<PageSet> {
        self.pages.pages(manga_url, chapter_url)
    }

    /// Re-fetch and replace the page urls of a chapter.
    ///
    /// # Errors
    ///
    /// See [`CacheStore::invalidate_and_reload`].
    pub fn refresh_pages(&self, manga_url: &str, chapter_url: &str) -> Result<PageSet> {
        self.pages.refresh(manga_url, chapter_url)
    }

    // -------------------------------------------------------------------------
    // Chapter lists
    // -------------------------------------------------------------------------

    /// Chapter urls of a title in navigation order.
    ///
    /// # Errors
    ///
    /// See [`ChapterListCache::chapter_urls`].
    pub fn chapter_list(&self, manga_url: &str) -> Result<Vec<String>> {
        self.chapters.chapter_urls(manga_url)
    }

    /// Full chapter records of a title.
    ///
    /// # Errors
    ///
    /// See [`ChapterListCache::records`].
    pub fn chapter_records(&self, manga_url: &str) -> Result<ChapterRecords> {
        self.chapters.records(manga_url)
    }

    /// Re-fetch and replace the chapter list of a title.
    ///
    /// # Errors
    ///
    /// See [`ChapterListCache::refresh`].
    pub fn refresh_chapter_list(&self, manga_url: &str) -> Result<Vec<String>> {
        self.chapters.refresh(manga_url)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Load the chapter adjacent to `current_chapter_url`.
    ///
    /// # Errors
    ///
    /// See [`ChapterNavigator::navigate`].
    pub fn navigate(
        &self,
        manga_url: &str,
        current_chapter_url: &str,
        direction: Direction,
    ) -> Result<Option<Navigation>> {
        self.navigator
            .navigate(manga_url, current_chapter_url, direction)
    }

    // -------------------------------------------------------------------------
    // Title details
    // -------------------------------------------------------------------------

    /// Details of a title, fetched on first use.
    ///
    /// # Errors
    ///
    /// See [`CacheStore::fetch_or_load_title`].
    pub fn details(&self, manga_url: &str) -> Result<MangaDetails> {
        self.store
            .fetch_or_load_title(manga_url, TitleEntry::Details, || {
                self.source.fetch_manga_details(manga_url)
            })
    }

    /// Re-fetch and replace the details of a title.
    ///
    /// # Errors
    ///
    /// See [`CacheStore::invalidate_and_reload_title`].
    pub fn refresh_details(&self, manga_url: &str) -> Result<MangaDetails> {
        self.store
            .invalidate_and_reload_title(manga_url, TitleEntry::Details, || {
                self.source.fetch_manga_details(manga_url)
            })
    }

    // -------------------------------------------------------------------------
    // Reading state
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// See [`ConfigStore::read`].
    pub fn read_config(&self, manga_url: &str, chapter_url: &str) -> Result<Option<ChapterConfig>> {
        self.configs.read(manga_url, chapter_url)
    }

    /// # Errors
    ///
    /// See [`ConfigStore::write`].
    pub fn write_config(
        &self,
        manga_url: &str,
        chapter_url: &str,
        partial: ChapterConfig,
    ) -> Result<()> {
        self.configs.write(manga_url, chapter_url, partial)
    }

    pub fn delete_config(&self, manga_url: &str, chapter_url: &str) {
        self.configs.delete(manga_url, chapter_url);
    }
}
