use crate::session::Session;
use anyhow::Result;
use gloss::{Anchored, Deleted, DisplayLine};
use std::io::Write;

pub fn handle(file: &str, line: u32, session: &mut Session, out: &mut impl Write) -> Result<()> {
    match session.project.delete_at(file, DisplayLine(line)) {
        Some(Deleted::Annotation(annotation)) => {
            writeln!(out, "deleted annotation at {file}:{}", annotation.line())?;
            session.mark_dirty();
        },
        Some(Deleted::Bookmark(bookmark)) => {
            writeln!(out, "deleted bookmark at {file}:{}", bookmark.line())?;
            session.mark_dirty();
        },
        None => writeln!(out, "nothing to delete at {file}:{line}")?,
    }
    Ok(())
}
