//! Adjacent-chapter navigation over a cached chapter list
//!
//! The source lists chapters newest first, and the cached list keeps that
//! order. Moving [`Direction::Forward`] in reading order therefore steps
//! toward the front of the list (index − 1) and [`Direction::Backward`]
//! steps toward the back (index + 1).
//!
//! Navigation keeps no state between calls.

use crate::chapters::{ChapterListCache, PageCache};
use crate::error::{Error, Result};
use crate::model::PageSet;
use crate::storage::{JsonStorage, StorageBackend};
use log::debug;
use std::sync::Arc;

/// Direction of travel relative to reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Next chapter to read (index − 1 in the stored list)
    Forward,
    /// Previously released chapter (index + 1 in the stored list)
    Backward,
}

/// Result of a successful navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub chapter_url: String,
    pub pages: PageSet,
}

pub struct ChapterNavigator<S: StorageBackend = JsonStorage> {
    chapters: Arc<ChapterListCache<S>>,
    pages: Arc<PageCache<S>>,
}

impl<S: StorageBackend> ChapterNavigator<S> {
    pub fn new(chapters: Arc<ChapterListCache<S>>, pages: Arc<PageCache<S>>) -> Self {
        Self { chapters, pages }
    }

    /// Move from `current_chapter_url` in `direction` and load the target's pages.
    ///
    /// Returns `Ok(None)` when `current_chapter_url` is empty.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the target falls outside the chapter list
    /// - any error resolving the chapter list or the target's pages
    pub fn navigate(
        &self,
        manga_url: &str,
        current_chapter_url: &str,
        direction: Direction,
    ) -> Result<Option<Navigation>> {
        let Some(chapter_url) = self.adjacent(manga_url, current_chapter_url, direction)? else {
            return Ok(None);
        };

        let pages = self.pages.pages(manga_url, &chapter_url)?;
        Ok(Some(Navigation { chapter_url, pages }))
    }

    /// Url of the chapter next to `current_chapter_url`, without loading pages.
    ///
    /// A current chapter missing from the list counts as index −1, so
    /// `Backward` from an unknown chapter lands on the first list entry and
    /// `Forward` reports [`Error::NotFound`].
    ///
    /// # Errors
    ///
    /// Same as [`navigate`](Self::navigate), minus page loading.
    pub fn adjacent(
        &self,
        manga_url: &str,
        current_chapter_url: &str,
        direction: Direction,
    ) -> Result<Option<String>> {
        if current_chapter_url.is_empty() {
            return Ok(None);
        }

        let chapter_urls = self.chapters.chapter_urls(manga_url)?;
        let current = chapter_urls
            .iter()
            .position(|url| url == current_chapter_url);

        // an unknown current chapter sits just before the front of the list
        let target = match (direction, current) {
            (Direction::Forward, Some(index)) => index.checked_sub(1),
            (Direction::Forward, None) => None,
            (Direction::Backward, Some(index)) => index.checked_add(1),
            (Direction::Backward, None) => Some(0),
        };

        let target_url = target
            .and_then(|index| chapter_urls.get(index))
            .ok_or_else(|| {
                debug!("no chapter {direction:?} of {current_chapter_url} in {manga_url}");
                Error::NotFound(format!(
                    "no chapter {direction:?} of '{current_chapter_url}'"
                ))
            })?;

        Ok(Some(target_url.clone()))
    }
}
