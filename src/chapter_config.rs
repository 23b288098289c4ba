//! Per-chapter reading state
//!
//! Each `(title, chapter)` pair owns one small JSON object at
//! `<root>/<titleKey>/<chapterKey>/configs/config.json`. Writes are partial:
//! the stored object is read, the given fields are laid over it one level
//! deep, and the result is written back. Writes are not locked, so two
//! concurrent merges into the same chapter race and the last one wins.

use crate::error::Result;
use crate::layout::{ChapterEntry, EntryPath};
use crate::model::{ChapterConfig, OFFSET_Y};
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::CacheStore;
use log::debug;
use std::sync::Arc;

pub struct ConfigStore<S: StorageBackend = JsonStorage> {
    store: Arc<CacheStore<S>>,
}

impl<S: StorageBackend> ConfigStore<S> {
    pub fn new(store: Arc<CacheStore<S>>) -> Self {
        Self { store }
    }

    fn entry(&self, title_id: &str, item_id: &str) -> EntryPath {
        self.store
            .layout()
            .chapter_entry(title_id, item_id, ChapterEntry::Config)
    }

    /// Stored reading state, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// - [`Error::DirectoryCreate`](crate::Error::DirectoryCreate) if the config directory cannot be created
    /// - [`Error::Parse`](crate::Error::Parse) if the stored file is unreadable
    pub fn read(&self, title_id: &str, item_id: &str) -> Result<Option<ChapterConfig>> {
        self.store.read_entry(&self.entry(title_id, item_id))
    }

    /// Merge `partial` over the stored reading state.
    ///
    /// An unreadable stored config is treated as empty and replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEntry`](crate::Error::InvalidEntry) if the merged config violates the schema
    /// - IO errors from creating the directory or writing the file
    pub fn write(&self, title_id: &str, item_id: &str, partial: ChapterConfig) -> Result<()> {
        let mut merged = match self.read(title_id, item_id) {
            Ok(existing) => existing.unwrap_or_default(),
            Err(e) => {
                debug!("discarding unreadable chapter config: {e}");
                ChapterConfig::default()
            }
        };
        merged.merge(partial);

        self.store.write_entry(&self.entry(title_id, item_id), &merged)
    }

    /// Save the vertical scroll position of a chapter.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write).
    pub fn write_offset_y(&self, title_id: &str, item_id: &str, offset_y: f64) -> Result<()> {
        self.write(title_id, item_id, ChapterConfig::new().with(OFFSET_Y, offset_y))
    }

    /// Saved scroll position, `0.0` when none was saved or it cannot be read.
    pub fn offset_y(&self, title_id: &str, item_id: &str) -> f64 {
        self.read(title_id, item_id)
            .ok()
            .flatten()
            .and_then(|config| config.offset_y())
            .unwrap_or(0.0)
    }

    /// Remove the stored reading state. Never fails.
    pub fn delete(&self, title_id: &str, item_id: &str) {
        let entry = self.entry(title_id, item_id);
        if let Err(e) = std::fs::remove_file(entry.file()) {
            debug!(
                "ignoring failed delete of {}: {e}",
                entry.file().display()
            );
        }
    }
}
