//! Line coordinate types for the two spaces an annotated file is viewed in.
//!
//! The types are distinct so a display row can never be handed to a store that
//! expects a source line without going through [`OverlayMap`](crate::OverlayMap).

use std::fmt;

/// A line in the file's unannotated source text.
///
/// Code lines are stable for the whole session: annotations and bookmarks are
/// keyed by them, and they do not move when annotation blocks are added or
/// removed above them.
///
/// ```text
/// Code:           Display:
/// 0: fn main() {  0: fn main() {
///                 1: > | check the error path
/// 1:     run();   2:     run();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct CodeLine(pub u32);

/// A line as seen once every annotation block is rendered above its anchor.
///
/// This is the row a user actually clicks on. Convert it with
/// [`OverlayMap::to_code`](crate::OverlayMap::to_code) before touching a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct DisplayLine(pub u32);

impl From<u32> for CodeLine {
    fn from(line: u32) -> Self {
        CodeLine(line)
    }
}

impl From<u32> for DisplayLine {
    fn from(line: u32) -> Self {
        DisplayLine(line)
    }
}

impl fmt::Display for CodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bidirectional conversion between two coordinate spaces.
pub trait CoordinateTransform<From, To> {
    fn to_coords(&self, from: From) -> To;
    fn from_coords(&self, to: To) -> From;
}
