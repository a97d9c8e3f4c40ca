use crate::{cli::ResolveCommand, session::Session};
use anyhow::Result;
use gloss::{CodeLine, DisplayLine};
use std::io::Write;

pub fn handle(cmd: ResolveCommand, session: &Session, out: &mut impl Write) -> Result<()> {
    let annotations = session.project.annotations();
    match cmd {
        ResolveCommand::ToCode { file, line } => {
            let code = annotations.to_code(&file, DisplayLine(line));
            writeln!(out, "{code}")?;
        },
        ResolveCommand::ToDisplay { file, line } => {
            let display = annotations.to_display(&file, CodeLine(line));
            writeln!(out, "{display}")?;
        },
    }
    Ok(())
}
