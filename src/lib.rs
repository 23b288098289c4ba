//! # mangacache
//!
//! File-backed cache and chapter navigation for manga readers.
//!
//! ## Features
//!
//! - **Stable Cache Keys**: Title and chapter urls map to short SHA-256 based directory names
//! - **Get-or-Fetch**: Chapter pages, chapter lists and title details are fetched once and served from disk
//! - **Single-Flight**: Concurrent misses on the same entry invoke the source once
//! - **Reading State**: Per-chapter JSON objects updated by shallow merge
//! - **Navigation**: Step forward or backward through a title's cached chapter list
//!
//! ## Layout
//!
//! ```text
//! <root>/<titleKey>/chapterList.json
//! <root>/<titleKey>/details.json
//! <root>/<titleKey>/<chapterKey>/chapterPages/data.json
//! <root>/<titleKey>/<chapterKey>/configs/config.json
//! ```
//!
//! There is no eviction: entries live until they are refreshed or the cache
//! directory is cleared from outside.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mangacache::{ChapterConfig, Direction, MangaCache};
//! # use mangacache::{ChapterRecord, ChapterSource, MangaDetails, SourceError};
//! # struct Site;
//! # impl ChapterSource for Site {
//! #     fn fetch_chapter_pages(&self, _: &str) -> Result<Vec<String>, SourceError> { Ok(vec![]) }
//! #     fn fetch_chapter_list(&self, _: &str) -> Result<Vec<ChapterRecord>, SourceError> { Ok(vec![]) }
//! #     fn fetch_manga_details(&self, _: &str) -> Result<MangaDetails, SourceError> { Ok(MangaDetails::default()) }
//! # }
//!
//! # fn example() -> mangacache::Result<()> {
//! let cache = MangaCache::builder("my-reader")
//!     .cache_dir("~/.cache/my-reader")
//!     .build(Site)?;
//!
//! let manga = "https://example.org/manga/abc";
//! let chapter = "https://example.org/manga/abc/chapter-1";
//!
//! let pages = cache.pages(manga, chapter)?;
//! cache.write_config(manga, chapter, ChapterConfig::new().with("offsetY", 240.0))?;
//!
//! if let Some(next) = cache.navigate(manga, chapter, Direction::Forward)? {
//!     println!("{} has {} pages", next.chapter_url, next.pages.len());
//! }
//! # let _ = pages;
//! # Ok(())
//! # }
//! ```

mod cache;
mod chapter_config;
mod chapters;
mod error;
mod manager;
mod navigator;
mod source;
mod store;
mod sync;

pub mod config;
pub mod keys;
pub mod layout;
pub mod model;
pub mod storage;

pub use cache::CacheStrategy;
pub use chapter_config::ConfigStore;
pub use chapters::{ChapterListCache, PageCache};
pub use config::{CacheConfig, CacheConfigBuilder};
pub use error::{Error, Result, SourceError};
pub use keys::{CacheKey, derive_key};
pub use layout::{CacheLayout, ChapterEntry, EntryPath, TitleEntry};
pub use manager::{MangaCache, MangaCacheBuilder};
pub use model::{ChapterConfig, ChapterRecord, ChapterRecords, Entry, MangaDetails, OFFSET_Y, PageSet};
pub use navigator::{ChapterNavigator, Direction, Navigation};
pub use source::ChapterSource;
pub use storage::{JsonStorage, StorageBackend};
pub use store::CacheStore;
