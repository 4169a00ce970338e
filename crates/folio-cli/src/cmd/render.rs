//! `folio render`: write the archive page as static HTML.
//!
//! The page mirrors the browse view: one section per visible category, a
//! preview card per work, a "View More" button where another page exists,
//! and the theme toggle labelled for the stored preference.

use crate::archive::{SectionView, ViewArgs, Workspace, section_views};
use crate::output::{CliError, OutputMode, pretty_kv, render_error, render_mode};
use clap::Args;
use folio_core::error::ErrorCode;
use folio_core::preview::{PreviewBody, PreviewCard};
use folio_core::store::SqliteStore;
use folio_core::theme::{Theme, ThemePreference};
use maud::{DOCTYPE, Markup, html};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

pub const INDEX_FILE: &str = "index.html";

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory to write index.html into, relative to the project root.
    #[arg(long, default_value = "dist")]
    pub out: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub path: PathBuf,
    pub theme: Theme,
    pub sections: usize,
    pub cards: usize,
}

/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub fn run_render(
    args: &RenderArgs,
    output: OutputMode,
    workspace: &Workspace,
) -> anyhow::Result<()> {
    let mut session = workspace.open_session();
    args.view.apply(&mut session);
    let sections = section_views(&session);
    let theme = stored_theme(workspace);

    let page = render_page(&sections, theme).into_string();

    let dir = if args.out.is_absolute() {
        args.out.clone()
    } else {
        workspace.root.join(&args.out)
    };
    let path = dir.join(INDEX_FILE);
    if let Err(err) = std::fs::create_dir_all(&dir).and_then(|()| std::fs::write(&path, page)) {
        render_error(
            output,
            &CliError::from_code(
                format!("cannot write {}: {err}", path.display()),
                ErrorCode::RenderWriteFailed,
            ),
        )?;
        return Err(err.into());
    }

    let visible: Vec<_> = sections.iter().filter(|s| s.visible).collect();
    let result = RenderOutput {
        path,
        theme,
        sections: visible.len(),
        cards: visible.iter().map(|s| s.cards.len()).sum(),
    };
    info!(path = %result.path.display(), cards = result.cards, "page rendered");
    render_mode(output, &result, write_text, write_pretty)
}

/// The persisted theme, or the default when the preference store is unusable.
fn stored_theme(workspace: &Workspace) -> Theme {
    SqliteStore::open(&workspace.preferences_path())
        .and_then(|store| ThemePreference::load(&store))
        .map(ThemePreference::theme)
        .unwrap_or_else(|err| {
            warn!(code = %err.code(), "theme preference unavailable: {err}");
            Theme::default()
        })
}

pub fn render_page(sections: &[SectionView], theme: Theme) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Literary Archive" }
                link rel="stylesheet" href="css/style.css";
            }
            body class=[theme.body_class()] {
                header {
                    button id="theme-toggle" type="button" { (theme.toggle_label()) }
                }
                main {
                    @for section in sections.iter().filter(|s| s.visible) {
                        (render_section(section))
                    }
                }
            }
        }
    }
}

fn render_section(section: &SectionView) -> Markup {
    let category = section.category.as_str();
    html! {
        section id=(format!("{category}-section")) {
            h1 { (section.heading) }
            div id=(category) class="article-grid" {
                @for card in &section.cards {
                    (render_card(card))
                }
            }
            @if let Some(label) = &section.load_more_label {
                button class="load-more-btn" type="button" data-category=(category) { (label) }
            }
        }
    }
}

fn render_card(card: &PreviewCard) -> Markup {
    html! {
        article class="article-preview" {
            span class="metadata" { (card.metadata) }
            h2 { (card.title) }
            div class="byline" { (card.byline) }
            @if card.verse {
                div class="poetry-block" { (render_lines(&card.body)) }
            } @else {
                p class="excerpt" { (render_lines(&card.body)) }
            }
            a class="btn-read" href=(card.link) { "Read Full Work" }
        }
    }
}

fn render_lines(body: &PreviewBody) -> Markup {
    let lines = body.lines();
    html! {
        @for (i, line) in lines.iter().enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

fn write_text(out: &RenderOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", out.path.display())
}

fn write_pretty(out: &RenderOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_kv(w, "Wrote", out.path.display().to_string())?;
    pretty_kv(w, "Theme", out.theme.as_str())?;
    pretty_kv(w, "Sections", out.sections.to_string())?;
    pretty_kv(w, "Works", out.cards.to_string())
}
