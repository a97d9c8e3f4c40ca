//! Tabular listings of bookmarks and annotations next to the code they mark.
//!
//! Reading the source is left to the caller; these functions only slice the
//! text they are given.

use crate::{store::Anchored, Annotation, Bookmark, Error, Result};

/// One listed entry: where it is, the line it marks, and its note if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub file: String,
    pub line: u32,
    /// Referenced source line with whitespace simplified.
    pub code: String,
    pub annotation: Option<String>,
}

/// Rows for each bookmark of one file, checked against `source`.
pub fn bookmark_rows(file: &str, source: &str, bookmarks: &[Bookmark]) -> Result<Vec<ListingRow>> {
    let lines = SourceLines::new(source);
    bookmarks
        .iter()
        .map(|bookmark| {
            Ok(ListingRow {
                file: file.to_string(),
                line: bookmark.line().0,
                code: lines.simplified(file, bookmark.line().0)?,
                annotation: None,
            })
        })
        .collect()
}

/// Rows for each annotation of one file, checked against `source`.
pub fn annotation_rows(
    file: &str,
    source: &str,
    annotations: &[Annotation],
) -> Result<Vec<ListingRow>> {
    let lines = SourceLines::new(source);
    annotations
        .iter()
        .map(|annotation| {
            Ok(ListingRow {
                file: file.to_string(),
                line: annotation.line().0,
                code: lines.simplified(file, annotation.line().0)?,
                annotation: Some(annotation.contents().to_string()),
            })
        })
        .collect()
}

struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    /// Splits on `\n` only, so a trailing newline yields a final empty line.
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.split('\n').collect(),
        }
    }

    fn simplified(&self, file: &str, line: u32) -> Result<String> {
        let text = self
            .lines
            .get(line as usize)
            .ok_or_else(|| Error::OutOfBounds {
                file: file.to_string(),
                line,
                line_count: self.lines.len(),
            })?;
        Ok(simplify(text))
    }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn simplify(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodeLine;

    const SOURCE: &str = "fn main() {\n    let  x =\t1;\n}\n";

    #[test]
    fn simplifies_whitespace() {
        assert_eq!(simplify("  let  x =\t1;\r"), "let x = 1;");
        assert_eq!(simplify(""), "");
    }

    #[test]
    fn lists_bookmarks_with_code() {
        let bookmarks = [Bookmark::new("main.rs", CodeLine(1))];
        let rows = bookmark_rows("main.rs", SOURCE, &bookmarks).unwrap();
        assert_eq!(
            rows,
            vec![ListingRow {
                file: "main.rs".to_string(),
                line: 1,
                code: "let x = 1;".to_string(),
                annotation: None,
            }]
        );
    }

    #[test]
    fn lists_annotations_with_contents() {
        let annotations = [
            Annotation::new("main.rs", CodeLine(0), "entry point"),
            Annotation::new("main.rs", CodeLine(2), "end"),
        ];
        let rows = annotation_rows("main.rs", SOURCE, &annotations).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "fn main() {");
        assert_eq!(rows[1].annotation.as_deref(), Some("end"));
    }

    #[test]
    fn out_of_bounds_lines_are_errors() {
        let bookmarks = [Bookmark::new("main.rs", CodeLine(4))];
        let err = bookmark_rows("main.rs", SOURCE, &bookmarks).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                line: 4,
                line_count: 4,
                ..
            }
        ));
    }
}
