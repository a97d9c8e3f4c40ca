//! Wire schema for exchanging annotations and bookmarks.
//!
//! Only [`Schema::Blocks`] is implemented:
//!
//! ```text
//! {
//!   "annotations": {
//!     "src/main.rs": { "file": "src/main.rs", "annotations": [ { "line": 4, "contents": "..." } ] }
//!   },
//!   "bookmarks": {
//!     "src/main.rs": { "file": "src/main.rs", "bookmarks": [ { "line": 9 } ] }
//!   }
//! }
//! ```
//!
//! Derived annotation fields (occupied lines, keywords) are never written and
//! are recomputed on load.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Serialization format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    #[default]
    Blocks,
    /// Recognized but not implemented. Every operation with it fails with
    /// [`Error::UnsupportedSchema`].
    Snippet,
}

impl Schema {
    /// Fail unless this schema is implemented.
    pub fn ensure_supported(self) -> Result<()> {
        match self {
            Schema::Blocks => Ok(()),
            Schema::Snippet => Err(Error::UnsupportedSchema { schema: self }),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Blocks => f.write_str("blocks"),
            Schema::Snippet => f.write_str("snippet"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub line: u32,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationFile {
    pub file: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkFile {
    pub file: String,
    #[serde(default)]
    pub bookmarks: Vec<BookmarkEntry>,
}

/// Top-level exchanged document. Keys are file paths; a `BTreeMap` keeps
/// output deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationFile>,
    #[serde(default)]
    pub bookmarks: BTreeMap<String, BookmarkFile>,
}

impl ProjectDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
