use crate::schema::Schema;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the overlay engine and the project layer around it.
///
/// [`Error::NotFound`] is a routine outcome: callers probe for an annotation or
/// bookmark at a line and branch on the result.
#[derive(Debug, Error)]
pub enum Error {
    /// No entry at `line` in the bucket for `file`, or no bucket for `file` at all.
    #[error("nothing found at {file}:{line}")]
    NotFound { file: String, line: u32 },

    /// Serialization requested against a schema variant that is not implemented.
    #[error("unsupported schema: {schema}")]
    UnsupportedSchema { schema: Schema },

    /// An entry references a line past the end of its source file.
    #[error("{file}:{line} is out of bounds (file has {line_count} lines)")]
    OutOfBounds {
        file: String,
        line: u32,
        line_count: usize,
    },

    /// The codebase root of a project does not exist.
    #[error("invalid codebase root: {}", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_found(file: &str, line: u32) -> Self {
        Error::NotFound {
            file: file.to_string(),
            line,
        }
    }

    /// Whether this is the routine "nothing at that line" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
