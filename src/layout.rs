//! On-disk layout of the cache tree
//!
//! ```text
//! <root>/<titleKey>/chapterList.json
//! <root>/<titleKey>/details.json
//! <root>/<titleKey>/<chapterKey>/chapterPages/data.json
//! <root>/<titleKey>/<chapterKey>/configs/config.json
//! ```
//!
//! Every path is a pure function of the identifiers it is built from. Nothing
//! here touches the filesystem.

use crate::keys::derive_key;
use std::path::{Path, PathBuf};

/// Entries stored directly under a title directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleEntry {
    ChapterList,
    Details,
}

impl TitleEntry {
    fn file_stem(self) -> &'static str {
        match self {
            TitleEntry::ChapterList => "chapterList",
            TitleEntry::Details => "details",
        }
    }
}

/// Entries stored under a chapter directory, each in its own subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterEntry {
    Pages,
    Config,
}

impl ChapterEntry {
    fn subdir(self) -> &'static str {
        match self {
            ChapterEntry::Pages => "chapterPages",
            ChapterEntry::Config => "configs",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            ChapterEntry::Pages => "data",
            ChapterEntry::Config => "config",
        }
    }
}

/// Location of one entry: the directory that must exist and the file inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath {
    dir: PathBuf,
    file: PathBuf,
}

impl EntryPath {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Maps identifiers to entry paths under a cache root
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
    extension: String,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding everything cached for one title
    pub fn title_dir(&self, title_id: &str) -> PathBuf {
        self.root.join(derive_key(title_id))
    }

    /// `<root>/<titleKey>/<stem>.<ext>`
    pub fn title_entry(&self, title_id: &str, entry: TitleEntry) -> EntryPath {
        let dir = self.title_dir(title_id);
        let file = dir.join(self.file_name(entry.file_stem()));
        EntryPath { dir, file }
    }

    /// `<root>/<titleKey>/<itemKey>/<subdir>/<stem>.<ext>`
    pub fn chapter_entry(&self, title_id: &str, item_id: &str, entry: ChapterEntry) -> EntryPath {
        let dir = self
            .title_dir(title_id)
            .join(derive_key(item_id))
            .join(entry.subdir());
        let file = dir.join(self.file_name(entry.file_stem()));
        EntryPath { dir, file }
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}
