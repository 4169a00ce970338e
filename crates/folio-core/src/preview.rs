//! Preview cards: the plain data a renderer needs for one work.
//!
//! Renderers (terminal, JSON, HTML) consume [`PreviewCard`]s and never look
//! at raw works, so the preview rules live in one place.

use crate::model::Work;
use crate::roman::volume_label;
use serde::Serialize;

/// Default number of characters of inline content shown in a preview.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Detail page that every card links to.
pub const ARTICLE_PAGE: &str = "article.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewBody {
    /// The work's own summary.
    Summary { lines: Vec<String> },
    /// Content is a manuscript file; only a placeholder is shown.
    Manuscript { format: String, text: String },
    /// Leading slice of inline content.
    Excerpt { lines: Vec<String>, truncated: bool },
}

impl PreviewBody {
    /// Display lines, with escaped `\n` sequences already split.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Summary { lines } | Self::Excerpt { lines, .. } => {
                lines.iter().map(String::as_str).collect()
            }
            Self::Manuscript { text, .. } => vec![text.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCard {
    pub id: String,
    /// `"<date> • Volume <roman>"`.
    pub metadata: String,
    pub title: String,
    /// `"By <author>"`.
    pub byline: String,
    pub body: PreviewBody,
    /// Poems render as a verse block, everything else as an excerpt.
    pub verse: bool,
    /// `article.html?id=<id>`.
    pub link: String,
}

impl PreviewCard {
    #[must_use]
    pub fn from_work(work: &Work, excerpt_chars: usize) -> Self {
        Self {
            id: work.id.clone(),
            metadata: format!("{} • {}", work.date, volume_label(work.volume)),
            title: work.title.clone(),
            byline: format!("By {}", work.author),
            body: preview_body(work, excerpt_chars),
            verse: work.is_poem(),
            link: article_link(&work.id),
        }
    }
}

/// Link to the detail view of the work identified by `id`.
#[must_use]
pub fn article_link(id: &str) -> String {
    format!("{ARTICLE_PAGE}?id={}", encode_query_value(id))
}

fn preview_body(work: &Work, excerpt_chars: usize) -> PreviewBody {
    if let Some(summary) = &work.summary {
        return PreviewBody::Summary {
            lines: split_escaped_newlines(summary),
        };
    }

    if let Some(ext) = work.manuscript_extension() {
        let format = ext.to_ascii_uppercase();
        return PreviewBody::Manuscript {
            text: format!("Manuscript available in {format} format. Click below to view."),
            format,
        };
    }

    let (excerpt, truncated) = leading_chars(&work.content, excerpt_chars.max(1));
    let mut lines = split_escaped_newlines(excerpt);
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    PreviewBody::Excerpt { lines, truncated }
}

/// The first `max` characters of `text` (on a char boundary).
fn leading_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Split on literal `\n` escape sequences and real newlines alike.
fn split_escaped_newlines(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Percent-encode the characters that would break a query-string value.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
