//! Archive plumbing shared by the browsing commands.
//!
//! [`Workspace`] resolves where the archive and the preference database live,
//! [`ViewArgs`] replays the reader's actions onto a session, and
//! [`SectionView`] is the render-ready shape of one category section.

use clap::Args;
use folio_core::config::ProjectConfig;
use folio_core::model::{Category, Lens};
use folio_core::preview::PreviewCard;
use folio_core::session::ArchiveSession;
use folio_core::store::PREFERENCES_DB;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved locations for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: ProjectConfig,
    /// Archive document actually read.
    pub source: PathBuf,
}

impl Workspace {
    /// `source_override` (from `--source`) wins over `[archive].source`.
    pub fn new(root: PathBuf, config: ProjectConfig, source_override: Option<&Path>) -> Self {
        let source = match source_override {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => root.join(path),
            None => config.source_path(&root),
        };
        Self {
            root,
            config,
            source,
        }
    }

    pub fn open_session(&self) -> ArchiveSession {
        debug!(source = %self.source.display(), "opening archive");
        ArchiveSession::open(&self.source, &self.config)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.root.join(PREFERENCES_DB)
    }
}

/// Reader actions shared by `folio list` and `folio render`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Category lens: all, poetry, prose or research.
    #[arg(long, default_value = "all")]
    pub lens: Lens,

    /// Show every work whose author contains NAME.
    #[arg(long, value_name = "NAME", conflicts_with = "search")]
    pub author: Option<String>,

    /// Show every work matching QUERY (title, author, summary, date or volume).
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Press "View More" on a category. Repeat to load several pages.
    #[arg(long = "more", value_name = "CATEGORY")]
    pub more: Vec<Category>,
}

impl ViewArgs {
    /// Replay the actions in the order a reader would take them: lens,
    /// pagination, then author filter or search.
    pub fn apply(&self, session: &mut ArchiveSession) {
        session.set_lens(self.lens);
        for &category in &self.more {
            if !session.load_more(category) {
                debug!(category = category.as_str(), "nothing more to load");
            }
        }
        if let Some(author) = &self.author {
            session.set_author_filter(author);
        }
        if let Some(query) = &self.search {
            session.set_search_query(query);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub category: Category,
    pub heading: &'static str,
    pub visible: bool,
    pub total_matches: usize,
    pub display_limit: usize,
    pub has_more: bool,
    /// `"View More <Category>"` when another page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_more_label: Option<String>,
    pub cards: Vec<PreviewCard>,
}

/// Sections under the session's lens, with previews built.
pub fn section_views(session: &ArchiveSession) -> Vec<SectionView> {
    session
        .sections()
        .iter()
        .map(|p| SectionView {
            category: p.category,
            heading: p.category.display_name(),
            visible: p.is_visible,
            total_matches: p.total_matches,
            display_limit: session.view().display_limit(p.category),
            has_more: p.has_more,
            load_more_label: p
                .has_more
                .then(|| format!("View More {}", p.category.display_name())),
            cards: p.works.iter().map(|w| session.preview(w)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::catalog::Catalog;
    use folio_core::model::RawWork;
    use folio_core::projection::AuthorMatch;
    use folio_core::view::Pagination;

    fn session(poems: usize) -> ArchiveSession {
        let entries = (0..poems)
            .map(|i| RawWork {
                id: Some(format!("p{i}")),
                title: Some(format!("Poem {i}")),
                author: Some(if i % 2 == 0 { "Ada Finch" } else { "Bram Oake" }.to_string()),
                category: Some("poetry".to_string()),
                kind: Some("poem".to_string()),
                date: Some(format!("2024-01-{:02}", i + 1)),
                content: Some("line one\\nline two".to_string()),
                ..RawWork::default()
            })
            .collect();
        ArchiveSession::new(Catalog::load(entries), Pagination::default(), AuthorMatch::default())
    }

    #[test]
    fn source_override_resolves_against_root() {
        let ws = Workspace::new(
            PathBuf::from("/srv/folio"),
            ProjectConfig::default(),
            Some(Path::new("other.json")),
        );
        assert_eq!(ws.source, PathBuf::from("/srv/folio/other.json"));
        assert_eq!(
            ws.preferences_path(),
            PathBuf::from("/srv/folio/.folio/preferences.db")
        );

        let ws = Workspace::new(PathBuf::from("/srv/folio"), ProjectConfig::default(), None);
        assert_eq!(ws.source, PathBuf::from("/srv/folio/data/content.json"));
    }

    #[test]
    fn more_clicks_apply_before_filters() {
        let mut s = session(12);
        let args = ViewArgs {
            more: vec![Category::Poetry],
            ..ViewArgs::default()
        };
        args.apply(&mut s);
        assert_eq!(s.view().display_limit(Category::Poetry), 10);

        let args = ViewArgs {
            more: vec![Category::Poetry],
            author: Some("ada".to_string()),
            ..ViewArgs::default()
        };
        let mut s = session(12);
        args.apply(&mut s);
        assert_eq!(s.project(Category::Poetry).works.len(), 6);
        assert_eq!(s.view().display_limit(Category::Poetry), 5);
    }

    #[test]
    fn sections_carry_load_more_affordance() {
        let s = session(7);
        let sections = section_views(&s);
        assert_eq!(sections.len(), 3);

        let poetry = &sections[0];
        assert_eq!(poetry.heading, "Poetry");
        assert_eq!(poetry.cards.len(), 5);
        assert_eq!(poetry.load_more_label.as_deref(), Some("View More Poetry"));
        assert!(!sections[1].visible);
        assert!(sections[1].load_more_label.is_none());
    }
}
