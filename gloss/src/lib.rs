//! Line-anchored annotations and bookmarks overlaid on source files.
//!
//! Source files are never modified. Annotations render as blocks of rows above
//! the line they are anchored to, so a file is viewed in two coordinate spaces:
//!
//! - [`CodeLine`]: the stable numbering of the unannotated source
//! - [`DisplayLine`]: the numbering once annotation blocks are inserted
//!
//! Stores are keyed by code lines. Positions observed in a rendered view are
//! display lines and go through [`OverlayMap::to_code`] first.
//!
//! ```text
//! view row --OverlayMap::to_code--> code line --> AnnotationStore / BookmarkStore
//!                                                        |
//! block row <--OverlayMap::to_display-- anchor line <----+
//! ```

pub mod annotation;
pub mod bookmark;
pub mod config;
pub mod coords;
pub mod error;
pub mod keywords;
pub mod listing;
pub mod overlay_map;
pub mod paths;
pub mod project;
pub mod schema;
pub mod store;

pub use annotation::{Annotation, AnnotationStore};
pub use bookmark::{Bookmark, BookmarkStore};
pub use config::Config;
pub use coords::{CodeLine, CoordinateTransform, DisplayLine};
pub use error::{Error, Result};
pub use overlay_map::OverlayMap;
pub use project::{AnnotationDraft, Deleted, Project, Toggle};
pub use schema::{ProjectDocument, Schema};
pub use store::{Anchored, LineStore};
