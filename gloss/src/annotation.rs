//! Free-text notes anchored to source lines.

use crate::{
    keywords,
    overlay_map::OverlayMap,
    schema::{AnnotationEntry, Schema},
    store::{Anchored, LineStore},
    CodeLine, DisplayLine, Result,
};

/// A note attached above one code line of one file.
///
/// The occupied line count and keywords are derived from the contents when the
/// annotation is built and cannot be set independently. Editing an annotation
/// means removing it from its store and adding a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    file: String,
    line: CodeLine,
    contents: String,
    lines_occupied: u32,
    keywords: Vec<String>,
}

impl Annotation {
    pub fn new(file: impl Into<String>, line: CodeLine, contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let lines_occupied = count_lines(&contents);
        let keywords = keywords::extract(&contents);
        Self {
            file: file.into(),
            line,
            contents,
            lines_occupied,
            keywords,
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Number of display rows the rendered block takes: one per `\n`, plus one.
    pub fn lines_occupied(&self) -> u32 {
        self.lines_occupied
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Serialized fragment for this annotation.
    pub fn to_entry(&self, schema: Schema) -> Result<AnnotationEntry> {
        schema.ensure_supported()?;
        Ok(AnnotationEntry {
            line: self.line.0,
            contents: self.contents.clone(),
        })
    }

    /// Rebuild an annotation from a serialized fragment, deriving its fields.
    pub fn from_entry(file: &str, entry: AnnotationEntry, schema: Schema) -> Result<Self> {
        schema.ensure_supported()?;
        Ok(Self::new(file, CodeLine(entry.line), entry.contents))
    }
}

impl Anchored for Annotation {
    fn file(&self) -> &str {
        &self.file
    }

    fn line(&self) -> CodeLine {
        self.line
    }
}

fn count_lines(contents: &str) -> u32 {
    let newlines = contents.bytes().filter(|&b| b == b'\n').count();
    u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1)
}

pub type AnnotationStore = LineStore<Annotation>;

impl LineStore<Annotation> {
    /// Coordinate mapping over the current annotations of `file`.
    pub fn overlay(&self, file: &str) -> OverlayMap<'_> {
        OverlayMap::new(self.bucket(file))
    }

    /// Code line behind a display row of `file`.
    pub fn to_code(&self, file: &str, line: DisplayLine) -> CodeLine {
        self.overlay(file).to_code(line)
    }

    /// Display row of a code line of `file`.
    pub fn to_display(&self, file: &str, line: CodeLine) -> DisplayLine {
        self.overlay(file).to_display(line)
    }

    /// Every annotation carrying `keyword`, across all files.
    pub fn with_keyword(&self, keyword: &str) -> Vec<Annotation> {
        self.buckets()
            .into_iter()
            .flat_map(|(_, annotations)| annotations.iter())
            .filter(|a| a.keywords.iter().any(|k| k == keyword))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn derives_fields_from_contents() {
        let contents = "first #todo\nsecond (#needs review)";
        let annotation = Annotation::new("a.rs", CodeLine(2), contents);
        assert_eq!(annotation.lines_occupied(), 2);
        assert_eq!(annotation.keywords(), ["todo", "needs review"]);
        assert_eq!(annotation.file(), "a.rs");
        assert_eq!(annotation.line(), CodeLine(2));
    }

    #[test]
    fn single_line_and_empty_contents_occupy_one_line() {
        assert_eq!(Annotation::new("a.rs", CodeLine(0), "").lines_occupied(), 1);
        assert_eq!(Annotation::new("a.rs", CodeLine(0), "one").lines_occupied(), 1);
        assert_eq!(Annotation::new("a.rs", CodeLine(0), "trailing\n").lines_occupied(), 2);
    }

    #[test]
    fn store_returns_contents_unchanged() {
        let mut store = AnnotationStore::new();
        let contents = "multi\nline\n\nnote";
        store.add(Annotation::new("a.rs", CodeLine(8), contents));

        let stored = store.get("a.rs", CodeLine(8)).unwrap();
        assert_eq!(stored.contents(), contents);
        assert_eq!(stored.lines_occupied(), 4);
    }

    #[test]
    fn edit_is_remove_then_add() {
        let mut store = AnnotationStore::new();
        store.add(Annotation::new("a.rs", CodeLine(1), "old #a"));

        let old = store.remove("a.rs", CodeLine(1)).unwrap();
        store.add(Annotation::new(old.file(), old.line(), "new\n#b"));

        let stored = store.get("a.rs", CodeLine(1)).unwrap();
        assert_eq!(stored.keywords(), ["b"]);
        assert_eq!(stored.lines_occupied(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn entry_round_trip_recomputes_derived_fields() {
        let annotation = Annotation::new("a.rs", CodeLine(5), "x\n#y");
        let entry = annotation.to_entry(Schema::Blocks).unwrap();
        assert_eq!(entry.line, 5);

        let back = Annotation::from_entry("a.rs", entry, Schema::Blocks).unwrap();
        assert_eq!(back, annotation);
    }

    #[test]
    fn entries_reject_snippet_schema() {
        let annotation = Annotation::new("a.rs", CodeLine(5), "x");
        assert!(matches!(
            annotation.to_entry(Schema::Snippet),
            Err(Error::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn finds_annotations_by_keyword() {
        let mut store = AnnotationStore::new();
        store.add(Annotation::new("b.rs", CodeLine(1), "#perf here"));
        store.add(Annotation::new("a.rs", CodeLine(4), "#bug and #perf"));
        store.add(Annotation::new("a.rs", CodeLine(2), "#bug"));

        let perf: Vec<_> = store
            .with_keyword("perf")
            .iter()
            .map(|a| (a.file().to_string(), a.line().0))
            .collect();
        assert_eq!(perf, vec![("a.rs".to_string(), 4), ("b.rs".to_string(), 1)]);
    }
}
