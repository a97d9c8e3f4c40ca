use crate::{cli::AnnotateCommand, session::Session};
use anyhow::{bail, Result};
use gloss::{listing::ListingRow, DisplayLine};
use std::io::Write;

pub fn handle(cmd: AnnotateCommand, session: &mut Session, out: &mut impl Write) -> Result<()> {
    match cmd {
        AnnotateCommand::Set { file, line, text } => {
            let draft = session.project.begin_annotation(&file, DisplayLine(line));
            let code = draft.line;
            match session.project.commit_annotation(&draft, &text) {
                Some(annotation) if draft.is_edit => {
                    writeln!(out, "updated annotation at {file}:{code}")?;
                    print_keywords(annotation.keywords(), out)?;
                },
                Some(annotation) => {
                    writeln!(out, "added annotation at {file}:{code}")?;
                    print_keywords(annotation.keywords(), out)?;
                },
                None if draft.is_edit => writeln!(out, "removed annotation at {file}:{code}")?,
                None => {
                    writeln!(out, "nothing to annotate at {file}:{code}")?;
                    return Ok(());
                },
            }
            session.mark_dirty();
        },
        AnnotateCommand::Show { file, line } => {
            let draft = session.project.begin_annotation(&file, DisplayLine(line));
            if !draft.is_edit {
                bail!("no annotation at {file}:{}", draft.line);
            }
            writeln!(out, "{}", draft.contents)?;
        },
        AnnotateCommand::List { file, keyword } => {
            let rows = session
                .project
                .annotation_listing(file.as_deref(), keyword.as_deref())?;
            for row in rows {
                print_row(&row, out)?;
            }
        },
    }
    Ok(())
}

fn print_keywords(keywords: &[String], out: &mut impl Write) -> Result<()> {
    if !keywords.is_empty() {
        writeln!(out, "tags: {}", keywords.join(", "))?;
    }
    Ok(())
}

fn print_row(row: &ListingRow, out: &mut impl Write) -> Result<()> {
    let note = row.annotation.as_deref().unwrap_or_default();
    let first = note.lines().next().unwrap_or_default();
    let more = if note.contains('\n') { " ..." } else { "" };
    writeln!(out, "{}:{}\t{}\t{first}{more}", row.file, row.line, row.code)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, session};
    use gloss::{Annotation, CodeLine};

    fn set(session: &mut Session, line: u32, text: &str) -> String {
        output(|out| {
            let cmd = AnnotateCommand::Set {
                file: "a.rs".into(),
                line,
                text: text.into(),
            };
            handle(cmd, session, out).unwrap();
        })
    }

    #[test]
    fn set_adds_updates_and_removes() {
        let (_dir, mut session) = session();
        assert_eq!(
            set(&mut session, 3, "look #here"),
            "added annotation at a.rs:3\ntags: here\n"
        );
        assert_eq!(set(&mut session, 3, "changed"), "updated annotation at a.rs:3\n");
        assert_eq!(set(&mut session, 3, ""), "removed annotation at a.rs:3\n");
        assert_eq!(set(&mut session, 3, ""), "nothing to annotate at a.rs:3\n");
        assert!(session.project.annotations().is_empty());
    }

    #[test]
    fn empty_set_on_bare_line_leaves_session_clean() {
        let (_dir, mut session) = session();
        assert_eq!(set(&mut session, 2, ""), "nothing to annotate at a.rs:2\n");
        assert!(!session.is_dirty());
        set(&mut session, 2, "note");
        assert!(session.is_dirty());
    }

    #[test]
    fn set_resolves_display_lines() {
        let (_dir, mut session) = session();
        set(&mut session, 0, "two\nrows");
        // Rows 0-1 are the block, row 2 is code line 0, row 3 is code line 1.
        assert_eq!(set(&mut session, 3, "next"), "added annotation at a.rs:1\n");
    }

    #[test]
    fn show_prints_contents_or_fails() {
        let (_dir, mut session) = session();
        set(&mut session, 1, "line one\nline two");

        let text = output(|out| {
            let cmd = AnnotateCommand::Show {
                file: "a.rs".into(),
                line: 1,
            };
            handle(cmd, &mut session, out).unwrap();
        });
        assert_eq!(text, "line one\nline two\n");

        let mut out = Vec::new();
        let cmd = AnnotateCommand::Show {
            file: "a.rs".into(),
            line: 0,
        };
        let err = handle(cmd, &mut session, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "no annotation at a.rs:0");
    }

    #[test]
    fn list_filters_by_keyword() {
        let (dir, mut session) = session();
        std::fs::write(dir.path().join("a.rs"), "fn a() {}\nfn b() {}\n").unwrap();
        set(&mut session, 0, "#bug first\nmore");
        // Code line 1 is at display row 3 below the two-row block.
        set(&mut session, 3, "#perf second");

        let text = output(|out| {
            let cmd = AnnotateCommand::List {
                file: None,
                keyword: Some("bug".into()),
            };
            handle(cmd, &mut session, out).unwrap();
        });
        assert_eq!(text, "a.rs:0\tfn a() {}\t#bug first ...\n");

        let text = output(|out| {
            let cmd = AnnotateCommand::List {
                file: Some("a.rs".into()),
                keyword: None,
            };
            handle(cmd, &mut session, out).unwrap();
        });
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn keyword_filter_checks_every_annotation_on_a_line() {
        let (dir, mut session) = session();
        std::fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();
        let annotations = session.project.annotations_mut();
        annotations.add(Annotation::new("a.rs", CodeLine(0), "plain"));
        annotations.add(Annotation::new("a.rs", CodeLine(0), "#bug second"));

        let list = |session: &mut Session, keyword: &str| {
            output(|out| {
                let cmd = AnnotateCommand::List {
                    file: None,
                    keyword: Some(keyword.into()),
                };
                handle(cmd, session, out).unwrap();
            })
        };
        assert_eq!(list(&mut session, "bug"), "a.rs:0\tfn a() {}\t#bug second\n");
        assert_eq!(list(&mut session, "plain"), "");
    }
}
