//! Get-or-fetch cache engine
//!
//! A [`CacheStore`] resolves an entry path, returns what is on disk if the
//! entry exists, and otherwise runs the caller's loader, persists the result
//! and returns it. Concurrent calls for the same entry are single-flighted:
//! the second caller waits for the first and then finds the entry on disk.
//!
//! Corrupt entries are reported as [`Error::Parse`] and left in place. Use
//! [`CacheStore::invalidate_and_reload`] to replace them.

mod flight;

use crate::error::{self, Error, Result, SourceError};
use crate::layout::{CacheLayout, ChapterEntry, EntryPath, TitleEntry};
use crate::model::Entry;
use crate::storage::{JsonStorage, StorageBackend};
use log::{debug, warn};

use self::flight::Flights;

/// File-backed get-or-fetch store
pub struct CacheStore<S: StorageBackend = JsonStorage> {
    layout: CacheLayout,
    storage: S,
    flights: Flights,
}

impl<S: StorageBackend> CacheStore<S> {
    pub fn new(layout: CacheLayout, storage: S) -> Self {
        Self {
            layout,
            storage,
            flights: Flights::new(),
        }
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Return the cached chapter-level entry, or load, persist and return it.
    ///
    /// # Errors
    ///
    /// - [`Error::DirectoryCreate`] if the entry directory cannot be created
    /// - [`Error::Parse`] if the cached file cannot be decoded (it is not modified)
    /// - [`Error::Network`] if the loader fails (nothing is written)
    /// - [`Error::InvalidEntry`] if the loader returns data violating the schema
    pub fn fetch_or_load<T, F>(
        &self,
        title_id: &str,
        item_id: &str,
        entry: ChapterEntry,
        loader: F,
    ) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        let path = self.layout.chapter_entry(title_id, item_id, entry);
        self.fetch_or_load_at(&path, loader)
    }

    /// Title-level counterpart of [`fetch_or_load`](Self::fetch_or_load).
    ///
    /// # Errors
    ///
    /// Same as [`fetch_or_load`](Self::fetch_or_load).
    pub fn fetch_or_load_title<T, F>(&self, title_id: &str, entry: TitleEntry, loader: F) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        let path = self.layout.title_entry(title_id, entry);
        self.fetch_or_load_at(&path, loader)
    }

    /// Fetch a fresh chapter-level entry and replace the cached one.
    ///
    /// The loader runs first; if it fails the cached entry is kept as it was.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_or_load`](Self::fetch_or_load), minus [`Error::Parse`].
    pub fn invalidate_and_reload<T, F>(
        &self,
        title_id: &str,
        item_id: &str,
        entry: ChapterEntry,
        loader: F,
    ) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        let path = self.layout.chapter_entry(title_id, item_id, entry);
        self.reload_at(&path, loader)
    }

    /// Title-level counterpart of [`invalidate_and_reload`](Self::invalidate_and_reload).
    ///
    /// # Errors
    ///
    /// Same as [`invalidate_and_reload`](Self::invalidate_and_reload).
    pub fn invalidate_and_reload_title<T, F>(
        &self,
        title_id: &str,
        entry: TitleEntry,
        loader: F,
    ) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        let path = self.layout.title_entry(title_id, entry);
        self.reload_at(&path, loader)
    }

    /// Remove a cached entry. A missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileDelete`] if the file exists but cannot be removed.
    pub fn invalidate(&self, path: &EntryPath) -> Result<()> {
        self.flights.run(path.file(), || error::remove_file(path.file()))?;
        debug!("invalidated cache entry {}", path.file().display());
        Ok(())
    }

    /// Whether an entry file is present on disk
    pub fn contains(&self, path: &EntryPath) -> bool {
        path.file().is_file()
    }

    /// Ensure the entry directory and decode the entry if it exists.
    pub(crate) fn read_entry<T: Entry>(&self, path: &EntryPath) -> Result<Option<T>> {
        error::create_dir(path.dir())?;

        if !path.file().exists() {
            return Ok(None);
        }

        let value: T = self.storage.read(path.file())?;
        value.validate().map_err(|reason| Error::Parse {
            path: path.file().to_path_buf(),
            reason,
        })?;
        Ok(Some(value))
    }

    /// Validate, ensure the entry directory, and write.
    pub(crate) fn write_entry<T: Entry>(&self, path: &EntryPath, value: &T) -> Result<()> {
        value.validate().map_err(|reason| Error::InvalidEntry {
            reason: format!("{}: {reason}", T::KIND),
        })?;
        error::create_dir(path.dir())?;
        self.storage.write(path.file(), value)
    }

    fn fetch_or_load_at<T, F>(&self, path: &EntryPath, loader: F) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        self.flights.run(path.file(), || {
            if let Some(cached) = self.read_entry::<T>(path)? {
                debug!("{} cache hit: {}", T::KIND, path.file().display());
                return Ok(cached);
            }

            debug!("{} cache miss: {}", T::KIND, path.file().display());
            let fresh = loader().map_err(Error::Network)?;
            self.write_entry(path, &fresh)?;
            Ok(fresh)
        })
    }

    fn reload_at<T, F>(&self, path: &EntryPath, loader: F) -> Result<T>
    where
        T: Entry,
        F: FnOnce() -> std::result::Result<T, SourceError>,
    {
        self.flights.run(path.file(), || {
            error::create_dir(path.dir())?;

            let fresh = match loader() {
                Ok(fresh) => fresh,
                Err(e) => {
                    warn!(
                        "{} reload failed, keeping cached entry {}: {e}",
                        T::KIND,
                        path.file().display()
                    );
                    return Err(Error::Network(e));
                }
            };

            self.write_entry(path, &fresh)?;
            debug!("{} reloaded: {}", T::KIND, path.file().display());
            Ok(fresh)
        })
    }
}
