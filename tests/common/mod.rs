//! Common test utilities for mangacache integration tests
//!
//! Provides a scripted chapter source that counts its calls and a fixture
//! owning a temporary cache root.

#![allow(dead_code)]

use mangacache::{
    CacheStrategy, ChapterRecord, ChapterSource, MangaCache, MangaDetails, SourceError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const MANGA: &str = "https://example.org/manga/abc";
pub const OTHER_MANGA: &str = "https://example.org/manga/xyz";

/// Chapter urls of [`MANGA`], newest first as the site lists them
pub fn chapter_urls() -> Vec<String> {
    (0..3)
        .map(|i| format!("{MANGA}/chapter-{i}"))
        .collect()
}

pub fn chapter(i: usize) -> String {
    format!("{MANGA}/chapter-{i}")
}

pub fn pages_of(chapter_url: &str) -> Vec<String> {
    (1..=3).map(|p| format!("{chapter_url}/page-{p}.jpg")).collect()
}

// =============================================================================
// Fake Source
// =============================================================================

#[derive(Default)]
pub struct Calls {
    pub pages: AtomicUsize,
    pub chapter_list: AtomicUsize,
    pub details: AtomicUsize,
}

/// In-memory chapter source with call counters and a kill switch
#[derive(Clone)]
pub struct FakeSource {
    pub calls: Arc<Calls>,
    pub offline: Arc<AtomicBool>,
    pub lists: Arc<Mutex<HashMap<String, Vec<ChapterRecord>>>>,
    pub delay: Duration,
}

impl FakeSource {
    pub fn new() -> Self {
        let mut lists = HashMap::new();
        lists.insert(
            MANGA.to_string(),
            chapter_urls()
                .into_iter()
                .enumerate()
                .map(|(i, url)| ChapterRecord::new(url).with_field("chapterTitle", format!("Chapter {i}")))
                .collect(),
        );

        Self {
            calls: Arc::new(Calls::default()),
            offline: Arc::new(AtomicBool::new(false)),
            lists: Arc::new(Mutex::new(lists)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_list(&self, manga_url: &str, urls: &[&str]) {
        self.lists.lock().unwrap().insert(
            manga_url.to_string(),
            urls.iter().map(|u| ChapterRecord::new(*u)).collect(),
        );
    }

    pub fn page_calls(&self) -> usize {
        self.calls.pages.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.calls.chapter_list.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.calls.details.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), SourceError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err("network unreachable".into());
        }
        Ok(())
    }
}

impl ChapterSource for FakeSource {
    fn fetch_chapter_pages(&self, chapter_url: &str) -> Result<Vec<String>, SourceError> {
        self.calls.pages.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(pages_of(chapter_url))
    }

    fn fetch_chapter_list(&self, manga_url: &str) -> Result<Vec<ChapterRecord>, SourceError> {
        self.calls.chapter_list.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(manga_url)
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_manga_details(&self, manga_url: &str) -> Result<MangaDetails, SourceError> {
        self.calls.details.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(MangaDetails {
            author: Some(format!("author of {manga_url}")),
            status: Some("ongoing".into()),
            desc: Some("A story.".into()),
            ..MangaDetails::default()
        })
    }
}

// =============================================================================
// Test Fixture
// =============================================================================

/// Route `log` output through the test harness (`RUST_LOG=mangacache=debug`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test fixture that owns a temporary cache root
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub source: FakeSource,
    pub cache: MangaCache,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_source(FakeSource::new(), CacheStrategy::None)
    }

    pub fn with_strategy(strategy: CacheStrategy) -> Self {
        Self::with_source(FakeSource::new(), strategy)
    }

    pub fn with_source(source: FakeSource, strategy: CacheStrategy) -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cache = MangaCache::builder("test-reader")
            .cache_dir(temp_dir.path())
            .chapter_list_cache(strategy)
            .build(source.clone())
            .expect("Failed to create cache");

        Self {
            temp_dir,
            source,
            cache,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}
