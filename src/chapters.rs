//! Chapter list and chapter page caches
//!
//! Both are thin specializations of [`CacheStore`] bound to a
//! [`ChapterSource`]. The chapter list is stored with every field the source
//! reported, but callers navigating it only ever see the projected urls.

use crate::cache::CacheStrategy;
use crate::error::Result;
use crate::layout::{ChapterEntry, TitleEntry};
use crate::model::{ChapterRecords, PageSet};
use crate::source::ChapterSource;
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::CacheStore;
use crate::sync::MutexExt;
use log::trace;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// In-memory chapter lists plus a counter bumped by every refresh and forget.
///
/// A reader only memoizes what it loaded if the counter is unchanged since
/// its lookup, so a list read before a refresh never replaces the refreshed one.
struct Memo {
    lists: LruCache<String, Arc<Vec<String>>>,
    generation: u64,
}

/// Cached, ordered chapter list of each title
pub struct ChapterListCache<S: StorageBackend = JsonStorage> {
    store: Arc<CacheStore<S>>,
    source: Arc<dyn ChapterSource>,
    memo: Option<Mutex<Memo>>,
}

impl<S: StorageBackend> ChapterListCache<S> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidCacheStrategy`](crate::Error::InvalidCacheStrategy)
    /// for a zero-sized LRU.
    pub fn new(
        store: Arc<CacheStore<S>>,
        source: Arc<dyn ChapterSource>,
        strategy: CacheStrategy,
    ) -> Result<Self> {
        strategy.validate()?;

        let memo = match strategy {
            CacheStrategy::None => None,
            CacheStrategy::Lru(size) => NonZeroUsize::new(size).map(|n| {
                Mutex::new(Memo {
                    lists: LruCache::new(n),
                    generation: 0,
                })
            }),
        };

        Ok(Self {
            store,
            source,
            memo,
        })
    }

    /// Chapter urls of `manga_url` in stored order, fetching the list on a miss.
    ///
    /// # Errors
    ///
    /// Any error of [`CacheStore::fetch_or_load_title`].
    pub fn chapter_urls(&self, manga_url: &str) -> Result<Vec<String>> {
        let seen = match self.memoized(manga_url) {
            (Some(hit), _) => {
                trace!("chapter list memo hit for {manga_url}");
                return Ok(hit.as_ref().clone());
            }
            (None, generation) => generation,
        };

        let urls = self.records(manga_url)?.chapter_urls();
        self.memoize(manga_url, &urls, seen);
        Ok(urls)
    }

    /// Full chapter records of `manga_url`, fetching the list on a miss.
    ///
    /// # Errors
    ///
    /// Any error of [`CacheStore::fetch_or_load_title`].
    pub fn records(&self, manga_url: &str) -> Result<ChapterRecords> {
        self.store
            .fetch_or_load_title(manga_url, TitleEntry::ChapterList, || {
                self.source
                    .fetch_chapter_list(manga_url)
                    .map(ChapterRecords::from)
            })
    }

    /// Re-fetch the chapter list and replace the cached one.
    ///
    /// # Errors
    ///
    /// Any error of [`CacheStore::invalidate_and_reload_title`]. On failure the
    /// previously cached list stays in place.
    pub fn refresh(&self, manga_url: &str) -> Result<Vec<String>> {
        self.forget(manga_url);

        let urls = self
            .store
            .invalidate_and_reload_title(manga_url, TitleEntry::ChapterList, || {
                self.source
                    .fetch_chapter_list(manga_url)
                    .map(ChapterRecords::from)
            })?
            .chapter_urls();

        if let Some(memo) = &self.memo {
            // invalidates lookups that started while the reload ran
            let mut memo = memo.lock_recovered();
            memo.generation = memo.generation.wrapping_add(1);
            memo.lists
                .put(manga_url.to_string(), Arc::new(urls.clone()));
        }
        Ok(urls)
    }

    /// Drop the in-memory copy of a title's list, if any
    pub fn forget(&self, manga_url: &str) {
        if let Some(memo) = &self.memo {
            let mut memo = memo.lock_recovered();
            memo.generation = memo.generation.wrapping_add(1);
            memo.lists.pop(manga_url);
        }
    }

    /// Memoized list, if any, and the generation the lookup saw
    fn memoized(&self, manga_url: &str) -> (Option<Arc<Vec<String>>>, u64) {
        let Some(memo) = &self.memo else {
            return (None, 0);
        };
        let mut memo = memo.lock_recovered();
        let generation = memo.generation;
        (memo.lists.get(manga_url).cloned(), generation)
    }

    fn memoize(&self, manga_url: &str, urls: &[String], seen: u64) {
        if let Some(memo) = &self.memo {
            let mut memo = memo.lock_recovered();
            if memo.generation != seen {
                trace!("skipping stale chapter list memo for {manga_url}");
                return;
            }
            memo.lists
                .put(manga_url.to_string(), Arc::new(urls.to_vec()));
        }
    }
}

/// Cached page urls of each chapter
pub struct PageCache<S: StorageBackend = JsonStorage> {
    store: Arc<CacheStore<S>>,
    source: Arc<dyn ChapterSource>,
}

impl<S: StorageBackend> PageCache<S> {
    pub fn new(store: Arc<CacheStore<S>>, source: Arc<dyn ChapterSource>) -> Self {
        Self { store, source }
    }

    /// Page urls of `chapter_url`, fetching them on a miss.
    ///
    /// # Errors
    ///
    /// Any error of [`CacheStore::fetch_or_load`].
    pub fn pages(&self, manga_url: &str, chapter_url: &str) -> Result<PageSet> {
        self.store
            .fetch_or_load(manga_url, chapter_url, ChapterEntry::Pages, || {
                self.source
                    .fetch_chapter_pages(chapter_url)
                    .map(PageSet::from)
            })
    }

    /// Re-fetch the page urls of `chapter_url` and replace the cached ones.
    ///
    /// # Errors
    ///
    /// Any error of [`CacheStore::invalidate_and_reload`].
    pub fn refresh(&self, manga_url: &str, chapter_url: &str) -> Result<PageSet> {
        self.store
            .invalidate_and_reload(manga_url, chapter_url, ChapterEntry::Pages, || {
                self.source
                    .fetch_chapter_pages(chapter_url)
                    .map(PageSet::from)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::layout::CacheLayout;
    use crate::model::{ChapterRecord, MangaDetails};
    use tempfile::{TempDir, tempdir};

    const TITLE: &str = "https://site/manga/abc";

    struct ListSource {
        list: Mutex<Vec<&'static str>>,
    }

    impl ChapterSource for ListSource {
        fn fetch_chapter_pages(&self, _: &str) -> std::result::Result<Vec<String>, SourceError> {
            Ok(Vec::new())
        }

        fn fetch_chapter_list(
            &self,
            _: &str,
        ) -> std::result::Result<Vec<ChapterRecord>, SourceError> {
            Ok(self
                .list
                .lock()
                .unwrap()
                .iter()
                .map(|url| ChapterRecord::new(*url))
                .collect())
        }

        fn fetch_manga_details(&self, _: &str) -> std::result::Result<MangaDetails, SourceError> {
            Ok(MangaDetails::default())
        }
    }

    fn lists(initial: &[&'static str]) -> (TempDir, Arc<ListSource>, ChapterListCache) {
        let dir = tempdir().unwrap();
        let store = Arc::new(CacheStore::new(
            CacheLayout::new(dir.path(), "json"),
            JsonStorage::compact(),
        ));
        let source = Arc::new(ListSource {
            list: Mutex::new(initial.to_vec()),
        });
        let cache =
            ChapterListCache::new(store, source.clone(), CacheStrategy::Lru(4)).unwrap();
        (dir, source, cache)
    }

    #[test]
    fn test_list_read_before_refresh_is_not_memoized() {
        let (_dir, source, cache) = lists(&["c1", "c0"]);

        // a reader looks up the memo and loads the old list from disk
        let (hit, seen) = cache.memoized(TITLE);
        assert!(hit.is_none());
        let old = cache.records(TITLE).unwrap().chapter_urls();

        // a refresh lands before the reader memoizes
        *source.list.lock().unwrap() = vec!["c2", "c1", "c0"];
        let fresh = cache.refresh(TITLE).unwrap();

        cache.memoize(TITLE, &old, seen);
        assert_eq!(cache.chapter_urls(TITLE).unwrap(), fresh);
    }

    #[test]
    fn test_unchanged_generation_memoizes() {
        let (_dir, _source, cache) = lists(&["c1", "c0"]);

        let urls = cache.chapter_urls(TITLE).unwrap();
        let (hit, _) = cache.memoized(TITLE);
        assert_eq!(hit.as_deref(), Some(&urls));
    }
}
