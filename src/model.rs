//! Schemas for the entries persisted under the cache root

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A value that can be stored as a cache entry.
///
/// `validate` runs after every decode from disk and before every write, so a
/// structurally valid JSON document with the wrong contents is still reported
/// as a typed error instead of flowing into the caller.
pub trait Entry: Serialize + DeserializeOwned {
    /// Human readable name used in log and error messages
    const KIND: &'static str;

    /// Check invariants that the type system cannot express
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// PageSet
// =============================================================================

/// Ordered page-image URLs of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSet(Vec<String>);

impl PageSet {
    pub fn new(pages: Vec<String>) -> Self {
        Self(pages)
    }

    pub fn pages(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for PageSet {
    fn from(pages: Vec<String>) -> Self {
        Self(pages)
    }
}

impl Entry for PageSet {
    const KIND: &'static str = "chapter pages";

    fn validate(&self) -> std::result::Result<(), String> {
        match self.0.iter().position(|url| url.trim().is_empty()) {
            Some(index) => Err(format!("page {index} has an empty url")),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Chapter list
// =============================================================================

/// One chapter as listed by the source.
///
/// Only `chapterUrl` is interpreted; everything else the source reports is
/// kept on disk untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRecord {
    #[serde(rename = "chapterUrl")]
    pub chapter_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChapterRecord {
    pub fn new(chapter_url: impl Into<String>) -> Self {
        Self {
            chapter_url: chapter_url.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Chapter records of one title, in the order the source listed them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterRecords(Vec<ChapterRecord>);

impl ChapterRecords {
    pub fn new(records: Vec<ChapterRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[ChapterRecord] {
        &self.0
    }

    /// Project the chapter urls, keeping their order.
    pub fn chapter_urls(&self) -> Vec<String> {
        self.0.iter().map(|record| record.chapter_url.clone()).collect()
    }
}

impl From<Vec<ChapterRecord>> for ChapterRecords {
    fn from(records: Vec<ChapterRecord>) -> Self {
        Self(records)
    }
}

impl Entry for ChapterRecords {
    const KIND: &'static str = "chapter list";

    fn validate(&self) -> std::result::Result<(), String> {
        match self.0.iter().position(|r| r.chapter_url.trim().is_empty()) {
            Some(index) => Err(format!("chapter {index} has an empty chapterUrl")),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Chapter reading state
// =============================================================================

/// Field holding the vertical scroll position of a chapter.
pub const OFFSET_Y: &str = "offsetY";

/// Open-ended reading state of one chapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterConfig(Map<String, Value>);

impl ChapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Saved scroll offset, if any
    pub fn offset_y(&self) -> Option<f64> {
        self.0.get(OFFSET_Y).and_then(Value::as_f64)
    }

    /// Shallow merge: keys of `partial` replace existing keys wholesale.
    pub fn merge(&mut self, partial: ChapterConfig) {
        for (key, value) in partial.0 {
            self.0.insert(key, value);
        }
    }
}

impl From<Map<String, Value>> for ChapterConfig {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl Entry for ChapterConfig {
    const KIND: &'static str = "chapter config";

    fn validate(&self) -> std::result::Result<(), String> {
        match self.0.get(OFFSET_Y) {
            Some(value) if !value.is_number() => Err(format!("{OFFSET_Y} must be a number")),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Title details
// =============================================================================

/// Descriptive metadata of a title.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MangaDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry for MangaDetails {
    const KIND: &'static str = "manga details";
}
