//! `folio show`: the detail view of a single work.
//!
//! Works are found by stable id, falling back to the legacy title slug used
//! by older `article.html?id=` links.

use crate::archive::Workspace;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_rule, render_error, render_mode};
use clap::Args;
use folio_core::error::ErrorCode;
use folio_core::model::{Category, Work, WorkType};
use folio_core::preview::article_link;
use folio_core::roman::volume_label;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Work id, or the title slug for entries without one.
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ShowWork {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: WorkType,
    pub date: String,
    pub volume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Manuscript format when `content` is a file reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manuscript: Option<String>,
    pub content: String,
    pub link: String,
}

impl From<&Work> for ShowWork {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id.clone(),
            title: work.title.clone(),
            author: work.author.clone(),
            category: work.category,
            kind: work.kind,
            date: work.date.clone(),
            volume: volume_label(work.volume),
            summary: work.summary.clone(),
            manuscript: work.manuscript_extension().map(|ext| ext.to_ascii_uppercase()),
            content: work.content.clone(),
            link: article_link(&work.id),
        }
    }
}

/// # Errors
///
/// Returns an error if no work matches `args.id` or writing fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, workspace: &Workspace) -> anyhow::Result<()> {
    let session = workspace.open_session();

    let Some(work) = session.find(args.id.trim()) else {
        render_error(
            output,
            &CliError::from_code(format!("work '{}' not found", args.id), ErrorCode::WorkNotFound),
        )?;
        anyhow::bail!("work '{}' not found", args.id);
    };

    render_mode(output, &ShowWork::from(work), write_text, write_pretty)
}

fn write_text(work: &ShowWork, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\t{}", work.id)?;
    writeln!(w, "title\t{}", work.title)?;
    writeln!(w, "author\t{}", work.author)?;
    writeln!(w, "category\t{}", work.category.as_str())?;
    writeln!(w, "type\t{}", work.kind.as_str())?;
    writeln!(w, "date\t{}", work.date)?;
    writeln!(w, "volume\t{}", work.volume)?;
    writeln!(w, "link\t{}", work.link)
}

fn write_pretty(work: &ShowWork, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", work.title)?;
    pretty_rule(w)?;
    pretty_kv(w, "Author", &work.author)?;
    pretty_kv(w, "Category", work.category.display_name())?;
    pretty_kv(w, "Date", &work.date)?;
    pretty_kv(w, "Volume", &work.volume)?;
    pretty_kv(w, "Link", &work.link)?;
    writeln!(w)?;

    if let Some(summary) = &work.summary {
        for line in summary.replace("\\n", "\n").lines() {
            writeln!(w, "  {line}")?;
        }
        writeln!(w)?;
    }

    match &work.manuscript {
        Some(format) => writeln!(w, "Manuscript ({format}): {}", work.content),
        None => {
            let indent = if work.kind == WorkType::Poem { "    " } else { "" };
            for line in work.content.replace("\\n", "\n").lines() {
                writeln!(w, "{indent}{line}")?;
            }
            Ok(())
        }
    }
}
