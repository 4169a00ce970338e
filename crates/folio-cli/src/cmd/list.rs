//! `folio list`: browse the archive section by section.

use crate::archive::{SectionView, ViewArgs, Workspace, section_views};
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};
use folio_core::catalog::LoadWarning;
use folio_core::model::Lens;
use folio_core::preview::PreviewCard;
use folio_core::view::Mode;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct ListOutput<'a> {
    pub lens: Lens,
    pub mode: Mode<'a>,
    pub sections: Vec<SectionView>,
    pub warnings: &'a [LoadWarning],
}

/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_list(args: &ViewArgs, output: OutputMode, workspace: &Workspace) -> anyhow::Result<()> {
    let mut session = workspace.open_session();
    args.apply(&mut session);

    let listing = ListOutput {
        lens: session.view().lens(),
        mode: session.view().mode(),
        sections: section_views(&session),
        warnings: session.warnings(),
    };

    render_mode(output, &listing, write_text, write_pretty)
}

fn write_text(listing: &ListOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "category  id  date  volume  author  title")?;
    for section in listing.sections.iter().filter(|s| s.visible) {
        for card in &section.cards {
            writeln!(
                w,
                "{}  {}  {}  {}  {}",
                section.category.as_str(),
                card.id,
                card.metadata.replace(" • ", "  "),
                card.byline.trim_start_matches("By "),
                card.title
            )?;
        }
        if section.has_more {
            writeln!(
                w,
                "# {} {}/{} more",
                section.category.as_str(),
                section.cards.len(),
                section.total_matches
            )?;
        }
    }
    Ok(())
}

fn write_pretty(listing: &ListOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    match listing.mode {
        Mode::Browse => {}
        Mode::Author(name) => writeln!(w, "Works by authors matching \"{name}\"\n")?,
        Mode::Search(query) => writeln!(w, "Search results for \"{query}\"\n")?,
    }

    let mut shown = 0;
    for section in listing.sections.iter().filter(|s| s.visible) {
        shown += 1;
        pretty_section(
            w,
            &format!(
                "{} ({} of {})",
                section.heading,
                section.cards.len(),
                section.total_matches
            ),
        )?;
        for card in &section.cards {
            write_card(card, w)?;
        }
        if let Some(label) = &section.load_more_label {
            writeln!(w, "[{label}]  --more {}", section.category.as_str())?;
        }
        writeln!(w)?;
    }

    if shown == 0 {
        writeln!(w, "No works to show.")?;
    }
    if !listing.warnings.is_empty() {
        pretty_rule(w)?;
        writeln!(
            w,
            "{} archive entries had problems (see `warnings` in --format json)",
            listing.warnings.len()
        )?;
    }
    Ok(())
}

fn write_card(card: &PreviewCard, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", card.metadata)?;
    writeln!(w, "{}", card.title)?;
    writeln!(w, "{}", card.byline)?;
    let indent = if card.verse { "    " } else { "  " };
    for line in card.body.lines() {
        writeln!(w, "{indent}{line}")?;
    }
    writeln!(w, "  -> {}", card.link)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::catalog::Catalog;
    use folio_core::model::RawWork;
    use folio_core::projection::AuthorMatch;
    use folio_core::session::ArchiveSession;
    use folio_core::view::Pagination;

    fn session() -> ArchiveSession {
        let entries = (1..=7)
            .map(|i| RawWork {
                id: Some(format!("essay-{i}")),
                title: Some(format!("Essay {i}")),
                author: Some("Ines Alder".to_string()),
                category: Some("prose".to_string()),
                date: Some(format!("2021-05-{i:02}")),
                content: Some("Body".to_string()),
                ..RawWork::default()
            })
            .collect();
        ArchiveSession::new(Catalog::load(entries), Pagination::default(), AuthorMatch::default())
    }

    fn render(
        f: fn(&ListOutput<'_>, &mut dyn Write) -> io::Result<()>,
        s: &ArchiveSession,
    ) -> String {
        let listing = ListOutput {
            lens: s.view().lens(),
            mode: s.view().mode(),
            sections: section_views(s),
            warnings: s.warnings(),
        };
        let mut buf = Vec::new();
        f(&listing, &mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn text_rows_and_more_marker() {
        let out = render(write_text, &session());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "category  id  date  volume  author  title");
        assert_eq!(lines[1], "prose  essay-7  2021-05-07  Volume I  Ines Alder  Essay 7");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "# prose 5/7 more");
    }

    #[test]
    fn pretty_shows_view_more_and_hides_empty_sections() {
        let out = render(write_pretty, &session());
        assert!(out.contains("Prose (5 of 7)"));
        assert!(out.contains("[View More Prose]  --more prose"));
        assert!(!out.contains("Poetry"));
    }

    #[test]
    fn pretty_points_at_json_warnings() {
        let entries = vec![
            RawWork {
                id: Some("orphan".to_string()),
                category: Some("prose".to_string()),
                ..RawWork::default()
            },
            RawWork {
                id: Some("kept".to_string()),
                title: Some("Kept".to_string()),
                author: Some("Ines Alder".to_string()),
                category: Some("prose".to_string()),
                date: Some("2021-05-01".to_string()),
                content: Some("Body".to_string()),
                ..RawWork::default()
            },
        ];
        let s = ArchiveSession::new(
            Catalog::load(entries),
            Pagination::default(),
            AuthorMatch::default(),
        );
        assert_eq!(s.warnings().len(), 1);

        let out = render(write_pretty, &s);
        assert!(out.ends_with(
            "1 archive entries had problems (see `warnings` in --format json)\n"
        ));
    }

    #[test]
    fn pretty_reports_empty_search() {
        let mut s = session();
        s.set_search_query("nothing like this");
        let out = render(write_pretty, &s);
        assert!(out.starts_with("Search results for \"nothing like this\""));
        assert!(out.contains("No works to show."));
    }
}
