//! Project: one codebase with its annotations and bookmarks.
//!
//! Every session operation takes the display row the user acted on and resolves
//! it to a code line through the file's [`OverlayMap`](crate::OverlayMap) before
//! touching a store, so actions key off stable source lines no matter how many
//! annotation blocks render above them.
//!
//! # Usage
//!
//! ```ignore
//! let mut project = Project::open("/path/to/codebase")?;
//! project.toggle_bookmark("src/main.rs", DisplayLine(12));
//!
//! let draft = project.begin_annotation("src/main.rs", DisplayLine(4));
//! project.commit_annotation(&draft, "check this #bug");
//!
//! project.save_json(Path::new(".gloss/project.json"), Schema::Blocks)?;
//! ```

use crate::{
    listing::{self, ListingRow},
    schema::{AnnotationFile, BookmarkFile, ProjectDocument, Schema},
    store::Anchored,
    Annotation, AnnotationStore, Bookmark, BookmarkStore, CodeLine, DisplayLine, Error, Result,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of [`Project::toggle_bookmark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added(CodeLine),
    Removed(CodeLine),
}

/// What [`Project::delete_at`] removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
    Annotation(Annotation),
    Bookmark(Bookmark),
}

/// An annotation being written or edited at a resolved code line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDraft {
    pub file: String,
    pub line: CodeLine,
    /// Existing contents when editing, empty otherwise.
    pub contents: String,
    pub is_edit: bool,
}

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    annotations: AnnotationStore,
    bookmarks: BookmarkStore,
}

impl Project {
    /// Start an empty project over the codebase at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(Error::InvalidRoot { path: root });
        }
        Ok(Self {
            root,
            annotations: AnnotationStore::new(),
            bookmarks: BookmarkStore::new(),
        })
    }

    /// Build a project from an exchanged document.
    ///
    /// Each file's inner `"file"` value names its bucket. Derived annotation
    /// fields are recomputed by the store's add path.
    pub fn from_document(
        root: impl Into<PathBuf>,
        document: ProjectDocument,
        schema: Schema,
    ) -> Result<Self> {
        schema.ensure_supported()?;
        let mut project = Self::open(root)?;

        for file in document.annotations.into_values() {
            for entry in file.annotations {
                project
                    .annotations
                    .add(Annotation::from_entry(&file.file, entry, schema)?);
            }
        }
        for file in document.bookmarks.into_values() {
            for entry in file.bookmarks {
                project
                    .bookmarks
                    .add(Bookmark::from_entry(&file.file, entry, schema)?);
            }
        }

        debug!(
            annotations = project.annotations.len(),
            bookmarks = project.bookmarks.len(),
            "loaded project document"
        );
        Ok(project)
    }

    /// Serialize every bucket, entries in ascending line order.
    pub fn to_document(&self, schema: Schema) -> Result<ProjectDocument> {
        schema.ensure_supported()?;
        let mut document = ProjectDocument::default();

        for (file, annotations) in self.annotations.buckets() {
            let annotations = annotations
                .iter()
                .map(|a| a.to_entry(schema))
                .collect::<Result<_>>()?;
            document.annotations.insert(
                file.to_string(),
                AnnotationFile {
                    file: file.to_string(),
                    annotations,
                },
            );
        }
        for (file, bookmarks) in self.bookmarks.buckets() {
            let bookmarks = bookmarks
                .iter()
                .map(|b| b.to_entry(schema))
                .collect::<Result<_>>()?;
            document.bookmarks.insert(
                file.to_string(),
                BookmarkFile {
                    file: file.to_string(),
                    bookmarks,
                },
            );
        }

        Ok(document)
    }

    /// Read a project JSON file. A missing file yields an empty project.
    pub fn load_json(root: impl Into<PathBuf>, path: &Path, schema: Schema) -> Result<Self> {
        if !path.exists() {
            info!("no project file at {}, starting empty", path.display());
            return Self::open(root);
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_document(root, ProjectDocument::from_json(&json)?, schema)
    }

    /// Write the project as compact JSON, creating parent directories.
    pub fn save_json(&self, path: &Path, schema: Schema) -> Result<()> {
        let json = self.to_document(schema)?.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        debug!("saved project to {}", path.display());
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkStore {
        &mut self.bookmarks
    }

    /// Code line behind a display row of `file`.
    pub fn resolve(&self, file: &str, line: DisplayLine) -> CodeLine {
        self.annotations.to_code(file, line)
    }

    /// Remove the bookmark at the resolved line, or add one if there is none.
    pub fn toggle_bookmark(&mut self, file: &str, line: DisplayLine) -> Toggle {
        let code = self.resolve(file, line);
        let toggle = match self.bookmarks.remove(file, code) {
            Ok(_) => Toggle::Removed(code),
            Err(_) => {
                self.bookmarks.add(Bookmark::new(file, code));
                Toggle::Added(code)
            },
        };
        debug!(file, display = line.0, ?toggle, "toggled bookmark");
        toggle
    }

    /// Delete the annotation at the resolved line, falling back to the bookmark.
    ///
    /// Returns `None`, changing nothing, when the line has neither.
    pub fn delete_at(&mut self, file: &str, line: DisplayLine) -> Option<Deleted> {
        let code = self.resolve(file, line);
        let deleted = self
            .annotations
            .remove(file, code)
            .map(Deleted::Annotation)
            .or_else(|_| self.bookmarks.remove(file, code).map(Deleted::Bookmark))
            .ok();
        debug!(file, line = code.0, removed = deleted.is_some(), "delete at line");
        deleted
    }

    /// Start writing an annotation at a display row, pre-filled when one exists.
    pub fn begin_annotation(&self, file: &str, line: DisplayLine) -> AnnotationDraft {
        let code = self.resolve(file, line);
        match self.annotations.get(file, code) {
            Ok(existing) => AnnotationDraft {
                file: file.to_string(),
                line: code,
                contents: existing.contents().to_string(),
                is_edit: true,
            },
            Err(_) => AnnotationDraft {
                file: file.to_string(),
                line: code,
                contents: String::new(),
                is_edit: false,
            },
        }
    }

    /// Store `contents` for a draft, replacing whatever annotation is on its line.
    ///
    /// Empty contents leave the line without an annotation, so submitting an
    /// emptied edit deletes it. Returns the stored annotation, if any.
    pub fn commit_annotation(
        &mut self,
        draft: &AnnotationDraft,
        contents: &str,
    ) -> Option<Annotation> {
        let replaced = self.annotations.remove(&draft.file, draft.line).is_ok();
        debug!(
            file = %draft.file,
            line = draft.line.0,
            replaced,
            "committing annotation"
        );

        if contents.is_empty() {
            return None;
        }
        let annotation = Annotation::new(draft.file.as_str(), draft.line, contents);
        self.annotations.add(annotation.clone());
        Some(annotation)
    }

    /// Each annotation of `file` with the display row its block starts on.
    pub fn block_placements(&self, file: &str) -> Vec<(DisplayLine, Annotation)> {
        self.annotations
            .overlay(file)
            .placements()
            .into_iter()
            .map(|(row, annotation)| (row, annotation.clone()))
            .collect()
    }

    /// Absolute path of a project-relative file.
    pub fn source_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Bookmark rows for `file`, or for every file when `None`.
    ///
    /// Only the listed files are read from disk.
    pub fn bookmark_listing(&self, file: Option<&str>) -> Result<Vec<ListingRow>> {
        let mut rows = Vec::new();
        for (path, bookmarks) in self.bookmarks.buckets() {
            if file.is_some_and(|f| f != path) {
                continue;
            }
            let source = std::fs::read_to_string(self.source_path(path))?;
            rows.extend(listing::bookmark_rows(path, &source, bookmarks)?);
        }
        Ok(rows)
    }

    /// Annotation rows for `file`, or for every file when `None`, optionally
    /// limited to annotations tagged with `keyword`.
    ///
    /// Only files with at least one listed annotation are read from disk.
    pub fn annotation_listing(
        &self,
        file: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<ListingRow>> {
        let tagged = keyword.map(|keyword| self.annotations.with_keyword(keyword));
        let buckets: Vec<(&str, &[Annotation])> = match &tagged {
            Some(tagged) => tagged
                .chunk_by(|a, b| a.file() == b.file())
                .map(|chunk| (chunk[0].file(), chunk))
                .collect(),
            None => self.annotations.buckets(),
        };

        let mut rows = Vec::new();
        for (path, annotations) in buckets {
            if file.is_some_and(|f| f != path) {
                continue;
            }
            let source = std::fs::read_to_string(self.source_path(path))?;
            rows.extend(listing::annotation_rows(path, &source, annotations)?);
        }
        Ok(rows)
    }
}
