//! Remote chapter source
//!
//! The cache never talks to the network itself. The site client implements
//! [`ChapterSource`] and is called only on a cache miss or an explicit refresh.

use crate::error::SourceError;
use crate::model::{ChapterRecord, MangaDetails};
use std::sync::Arc;

/// Client for the remote site a title is read from
pub trait ChapterSource: Send + Sync {
    /// Page-image urls of one chapter, in reading order
    fn fetch_chapter_pages(&self, chapter_url: &str) -> Result<Vec<String>, SourceError>;

    /// Chapter index of a title, in the order the site lists it
    fn fetch_chapter_list(&self, manga_url: &str) -> Result<Vec<ChapterRecord>, SourceError>;

    /// Descriptive metadata of a title
    fn fetch_manga_details(&self, manga_url: &str) -> Result<MangaDetails, SourceError>;
}

impl<T: ChapterSource + ?Sized> ChapterSource for Arc<T> {
    fn fetch_chapter_pages(&self, chapter_url: &str) -> Result<Vec<String>, SourceError> {
        (**self).fetch_chapter_pages(chapter_url)
    }

    fn fetch_chapter_list(&self, manga_url: &str) -> Result<Vec<ChapterRecord>, SourceError> {
        (**self).fetch_chapter_list(manga_url)
    }

    fn fetch_manga_details(&self, manga_url: &str) -> Result<MangaDetails, SourceError> {
        (**self).fetch_manga_details(manga_url)
    }
}
