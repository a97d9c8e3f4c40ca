use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Annotate and bookmark source lines without modifying the files.
///
/// Line arguments for actions are display lines, as seen in a view with
/// annotations rendered inline, and are resolved to source lines first.
#[derive(Debug, Parser)]
#[command(name = "gloss", version)]
pub struct Cli {
    /// Root of the codebase being reviewed.
    #[arg(long, env = "GLOSS_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Config file, overriding `.gloss/config.toml`.
    #[arg(long, env = "GLOSS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project file, overriding the configured one.
    #[arg(long, env = "GLOSS_PROJECT")]
    pub project: Option<PathBuf>,

    /// Log file or directory.
    #[arg(long, env = "GLOSS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Toggle or list bookmarks.
    #[command(subcommand)]
    Bookmark(BookmarkCommand),

    /// Write, show, or list annotations.
    #[command(subcommand)]
    Annotate(AnnotateCommand),

    /// Delete the annotation on a line, or its bookmark if it has none.
    Delete { file: String, line: u32 },

    /// Convert a line number between source and display numbering.
    #[command(subcommand)]
    Resolve(ResolveCommand),

    /// Print the #tags found in some text.
    Keywords { text: String },
}

#[derive(Debug, Subcommand)]
pub enum BookmarkCommand {
    Toggle { file: String, line: u32 },
    List { file: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum AnnotateCommand {
    /// Set the annotation on a line. Empty text removes it.
    Set {
        file: String,
        line: u32,
        text: String,
    },
    Show { file: String, line: u32 },
    List {
        file: Option<String>,
        /// Only annotations carrying this tag.
        #[arg(long)]
        keyword: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResolveCommand {
    /// Display line to source line.
    ToCode { file: String, line: u32 },
    /// Source line to display line.
    ToDisplay { file: String, line: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_subcommands() {
        let args = ["gloss", "--root", "/repo", "bookmark", "toggle", "a.rs", "4"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.root, PathBuf::from("/repo"));
        assert!(matches!(
            cli.command,
            Command::Bookmark(BookmarkCommand::Toggle { ref file, line: 4 }) if file == "a.rs"
        ));

        let cli = Cli::try_parse_from(["gloss", "annotate", "list", "--keyword", "bug"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Annotate(AnnotateCommand::List { file: None, keyword: Some(_) })
        ));

        let cli = Cli::try_parse_from(["gloss", "resolve", "to-code", "a.rs", "9"]).unwrap();
        assert!(matches!(cli.command, Command::Resolve(ResolveCommand::ToCode { line: 9, .. })));
    }
}
