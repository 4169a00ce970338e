//! `folio authors`: every author in the archive with their work count.

use crate::archive::Workspace;
use crate::output::{OutputMode, render_mode};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRow {
    pub name: String,
    pub works: usize,
}

/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_authors(output: OutputMode, workspace: &Workspace) -> anyhow::Result<()> {
    let session = workspace.open_session();
    let rows: Vec<AuthorRow> = session
        .catalog()
        .authors()
        .into_iter()
        .map(|(name, works)| AuthorRow { name, works })
        .collect();

    render_mode(output, rows.as_slice(), write_text, write_pretty)
}

fn write_text(rows: &[AuthorRow], w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "name  works")?;
    for row in rows {
        writeln!(w, "{}  {}", row.name, row.works)?;
    }
    Ok(())
}

fn write_pretty(rows: &[AuthorRow], w: &mut dyn Write) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "No authors in the archive.");
    }
    for row in rows {
        let noun = if row.works == 1 { "work" } else { "works" };
        writeln!(w, "{:<32} {} {noun}", row.name, row.works)?;
    }
    Ok(())
}
