//! Markers on source lines.

use crate::{
    schema::{BookmarkEntry, Schema},
    store::{Anchored, LineStore},
    CodeLine, Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bookmark {
    file: String,
    line: CodeLine,
}

impl Bookmark {
    pub fn new(file: impl Into<String>, line: CodeLine) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn to_entry(&self, schema: Schema) -> Result<BookmarkEntry> {
        schema.ensure_supported()?;
        Ok(BookmarkEntry { line: self.line.0 })
    }

    pub fn from_entry(file: &str, entry: BookmarkEntry, schema: Schema) -> Result<Self> {
        schema.ensure_supported()?;
        Ok(Self::new(file, CodeLine(entry.line)))
    }
}

impl Anchored for Bookmark {
    fn file(&self) -> &str {
        &self.file
    }

    fn line(&self) -> CodeLine {
        self.line
    }
}

pub type BookmarkStore = LineStore<Bookmark>;
