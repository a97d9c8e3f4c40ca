use crate::{cli::BookmarkCommand, session::Session};
use anyhow::Result;
use gloss::{DisplayLine, Toggle};
use std::io::Write;

pub fn handle(cmd: BookmarkCommand, session: &mut Session, out: &mut impl Write) -> Result<()> {
    match cmd {
        BookmarkCommand::Toggle { file, line } => {
            match session.project.toggle_bookmark(&file, DisplayLine(line)) {
                Toggle::Added(code) => writeln!(out, "added bookmark at {file}:{code}")?,
                Toggle::Removed(code) => writeln!(out, "removed bookmark at {file}:{code}")?,
            }
            session.mark_dirty();
        },
        BookmarkCommand::List { file } => {
            for row in session.project.bookmark_listing(file.as_deref())? {
                writeln!(out, "{}:{}\t{}", row.file, row.line, row.code)?;
            }
        },
    }
    Ok(())
}
