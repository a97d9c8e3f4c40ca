use anyhow::Result;
use std::io::Write;

pub fn handle(text: &str, out: &mut impl Write) -> Result<()> {
    for keyword in gloss::keywords::extract(text) {
        writeln!(out, "{keyword}")?;
    }
    Ok(())
}
