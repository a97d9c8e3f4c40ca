pub mod annotate;
pub mod bookmark;
pub mod delete;
pub mod keywords;
pub mod resolve;

use crate::{cli::Command, session::Session};
use anyhow::Result;
use std::io::Write;

/// Dispatch one parsed command against the session, writing results to `out`.
pub fn run(command: Command, session: &mut Session, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Bookmark(cmd) => bookmark::handle(cmd, session, out),
        Command::Annotate(cmd) => annotate::handle(cmd, session, out),
        Command::Delete { file, line } => delete::handle(&file, line, session, out),
        Command::Resolve(cmd) => resolve::handle(cmd, session, out),
        Command::Keywords { text } => keywords::handle(&text, out),
    }
}
