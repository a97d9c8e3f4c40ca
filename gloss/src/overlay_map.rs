//! OverlayMap: translation between code lines and display rows.
//!
//! Each annotation renders as a block of [`Annotation::lines_occupied`] rows
//! directly above its anchor line, pushing the anchor and everything after it
//! down:
//!
//! ```text
//! Code:               Display:
//! 0: a                0: a
//! 1: b                1: > | first line    <- block for anchor 1
//!                     2: > | second line
//!                     3: b
//! 2: c                4: c
//! ```
//!
//! [`OverlayMap::to_display`] of an anchor line is the first row of its block,
//! which is where a renderer places the block. [`OverlayMap::to_code`] maps
//! every row of a block back to the block's anchor, since annotation rows are
//! not addressable source.
//!
//! Every annotation anchored strictly before a line shifts it by that
//! annotation's full occupied height, so `to_code(to_display(l)) == l` for all
//! code lines.

use crate::{
    coords::CoordinateTransform, store::Anchored, Annotation, CodeLine, DisplayLine,
};

/// Read-only coordinate mapping over one file's annotations.
///
/// The slice must be sorted ascending by anchor, which every
/// [`AnnotationStore`](crate::AnnotationStore) bucket is.
#[derive(Debug, Clone, Copy)]
pub struct OverlayMap<'a> {
    annotations: &'a [Annotation],
}

impl<'a> OverlayMap<'a> {
    pub fn new(annotations: &'a [Annotation]) -> Self {
        debug_assert!(annotations.windows(2).all(|w| w[0].line() <= w[1].line()));
        Self { annotations }
    }

    /// Convert a code line to its display row.
    ///
    /// ```text
    /// // Annotation at line 5 occupying 2 rows:
    /// CodeLine(4) -> DisplayLine(4)
    /// CodeLine(5) -> DisplayLine(5)   (block start)
    /// CodeLine(6) -> DisplayLine(8)
    /// ```
    pub fn to_display(&self, line: CodeLine) -> DisplayLine {
        let mut shift = 0u32;
        for annotation in self.annotations {
            if annotation.line() < line {
                shift = shift.saturating_add(annotation.lines_occupied());
            } else {
                break;
            }
        }
        DisplayLine(line.0.saturating_add(shift))
    }

    /// Convert a display row to the code line it belongs to.
    ///
    /// Rows inside an annotation block, and the anchor row itself, resolve to
    /// the block's anchor line.
    ///
    /// ```text
    /// // Annotation at line 5 occupying 2 rows:
    /// DisplayLine(5) -> CodeLine(5)   (block row)
    /// DisplayLine(6) -> CodeLine(5)   (block row)
    /// DisplayLine(7) -> CodeLine(5)   (anchor)
    /// DisplayLine(8) -> CodeLine(6)
    /// ```
    pub fn to_code(&self, line: DisplayLine) -> CodeLine {
        let mut consumed = 0u32;
        for annotation in self.annotations {
            let candidate = line.0 - consumed;
            let anchor = annotation.line().0;
            let height = annotation.lines_occupied();

            if anchor >= candidate {
                break;
            }
            if candidate < anchor.saturating_add(height) {
                return CodeLine(anchor);
            }
            consumed += height;
        }
        CodeLine(line.0 - consumed)
    }

    /// Whether `line` falls on a rendered annotation row rather than source.
    pub fn is_annotation_row(&self, line: DisplayLine) -> bool {
        let code = self.to_code(line);
        line.0 < self.to_display(code).0.saturating_add(self.height_at(code))
    }

    /// Display row on which the source text of `line` is drawn, below any
    /// blocks anchored to it.
    pub fn source_row(&self, line: CodeLine) -> DisplayLine {
        DisplayLine(self.to_display(line).0.saturating_add(self.height_at(line)))
    }

    /// Total rows of all blocks anchored at `line`.
    fn height_at(&self, line: CodeLine) -> u32 {
        let start = self.annotations.partition_point(|a| a.line() < line);
        self.annotations[start..]
            .iter()
            .take_while(|a| a.line() == line)
            .map(Annotation::lines_occupied)
            .sum()
    }

    /// Number of display rows for a source file of `code_lines` lines.
    pub fn display_len(&self, code_lines: u32) -> u32 {
        let blocks: u32 = self
            .annotations
            .iter()
            .filter(|a| a.line().0 < code_lines)
            .map(Annotation::lines_occupied)
            .sum();
        code_lines.saturating_add(blocks)
    }

    /// Each annotation with the display row its block starts on.
    pub fn placements(&self) -> Vec<(DisplayLine, &'a Annotation)> {
        let mut shift = 0u32;
        self.annotations
            .iter()
            .map(|annotation| {
                let row = DisplayLine(annotation.line().0.saturating_add(shift));
                shift = shift.saturating_add(annotation.lines_occupied());
                (row, annotation)
            })
            .collect()
    }
}

impl CoordinateTransform<CodeLine, DisplayLine> for OverlayMap<'_> {
    fn to_coords(&self, line: CodeLine) -> DisplayLine {
        self.to_display(line)
    }

    fn from_coords(&self, line: DisplayLine) -> CodeLine {
        self.to_code(line)
    }
}
