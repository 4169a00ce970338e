//! The single controller owning catalog and view state.
//!
//! Every user action goes through an [`ArchiveSession`] method, which updates
//! the view state and leaves projection to the pure functions in
//! [`crate::projection`].

use crate::catalog::{Catalog, LoadReport, LoadWarning};
use crate::config::ProjectConfig;
use crate::model::{Category, Lens, Work};
use crate::preview::{DEFAULT_EXCERPT_CHARS, PreviewCard};
use crate::projection::{AuthorMatch, Projection, project, project_view};
use crate::view::{Pagination, ViewState};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ArchiveSession {
    catalog: Catalog,
    warnings: Vec<LoadWarning>,
    view: ViewState,
    author_match: AuthorMatch,
    excerpt_chars: usize,
}

impl Default for ArchiveSession {
    fn default() -> Self {
        Self::new(LoadReport::default(), Pagination::default(), AuthorMatch::default())
    }
}

impl ArchiveSession {
    #[must_use]
    pub fn new(report: LoadReport, pagination: Pagination, author_match: AuthorMatch) -> Self {
        Self {
            catalog: report.catalog,
            warnings: report.warnings,
            view: ViewState::new(pagination),
            author_match,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }

    /// Open the archive at `source` with the settings of `config`.
    ///
    /// A source that cannot be loaded is logged and yields an empty archive;
    /// the session stays usable.
    #[must_use]
    pub fn open(source: &Path, config: &ProjectConfig) -> Self {
        let report = Catalog::from_path(source).unwrap_or_else(|err| {
            warn!(
                code = %err.code(),
                source = %source.display(),
                "{}, continuing with an empty catalog: {err}",
                err.code().message()
            );
            LoadReport::default()
        });
        let mut session = Self::new(
            report,
            config.browse.pagination(),
            config.search.author_match,
        );
        session.excerpt_chars = config.preview.excerpt_limit();
        session
    }

    /// Replace the catalog wholesale. View state is kept.
    pub fn reload(&mut self, report: LoadReport) {
        debug!(works = report.catalog.len(), "catalog replaced");
        self.catalog = report.catalog;
        self.warnings = report.warnings;
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Problems found while loading the current catalog.
    #[must_use]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn author_match(&self) -> AuthorMatch {
        self.author_match
    }

    pub const fn set_lens(&mut self, lens: Lens) {
        self.view.set_lens(lens);
    }

    pub fn set_author_filter(&mut self, name: &str) {
        self.view.set_author_filter(name);
    }

    pub fn clear_author_filter(&mut self) {
        self.view.clear_author_filter();
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.view.set_search_query(query);
    }

    /// Show one more page of `category`. No-op when everything is shown or
    /// when a filter or search is active. Returns whether anything changed.
    pub fn load_more(&mut self, category: Category) -> bool {
        let (has_more, available) = {
            let current = self.project(category);
            (current.has_more, current.total_matches)
        };
        has_more && self.view.load_more(category, available)
    }

    #[must_use]
    pub fn project(&self, category: Category) -> Projection<'_> {
        project(&self.catalog, &self.view, category, self.author_match)
    }

    /// Projections for every category under the active lens.
    #[must_use]
    pub fn sections(&self) -> Vec<Projection<'_>> {
        project_view(&self.catalog, &self.view, self.author_match)
    }

    #[must_use]
    pub fn preview(&self, work: &Work) -> PreviewCard {
        PreviewCard::from_work(work, self.excerpt_chars)
    }

    /// Work for a detail view, by stable id or legacy slug.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Work> {
        self.catalog.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawWork;

    fn entries(count: usize) -> Vec<RawWork> {
        (0..count)
            .map(|i| RawWork {
                id: Some(format!("r{i}")),
                title: Some(format!("Study {i}")),
                author: Some("Lee Marsh".to_string()),
                category: Some("research".to_string()),
                date: Some(format!("2023-03-{:02}", i + 1)),
                content: Some("Findings".to_string()),
                ..RawWork::default()
            })
            .collect()
    }

    fn session(count: usize) -> ArchiveSession {
        ArchiveSession::new(
            Catalog::load(entries(count)),
            Pagination::default(),
            AuthorMatch::default(),
        )
    }

    #[test]
    fn load_more_grows_until_all_shown() {
        let mut s = session(12);
        assert!(s.load_more(Category::Research));
        assert!(s.load_more(Category::Research));
        assert_eq!(s.view().display_limit(Category::Research), 15);
        let p = s.project(Category::Research);
        assert_eq!(p.works.len(), 12);
        assert!(!p.has_more);

        assert!(!s.load_more(Category::Research));
        assert_eq!(s.view().display_limit(Category::Research), 15);
    }

    #[test]
    fn load_more_is_inert_while_searching() {
        let mut s = session(12);
        s.set_search_query("study");
        assert!(!s.load_more(Category::Research));
        s.set_search_query("");
        assert_eq!(s.view().display_limit(Category::Research), 5);
    }

    #[test]
    fn missing_source_yields_empty_usable_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut s =
            ArchiveSession::open(&dir.path().join("absent.json"), &ProjectConfig::default());
        assert!(s.catalog().is_empty());
        assert_eq!(s.author_match(), AuthorMatch::Insensitive);
        assert!(!s.load_more(Category::Poetry));
        assert!(s.sections().iter().all(|p| !p.is_visible));
    }

    #[test]
    fn reload_replaces_catalog_and_keeps_view() {
        let mut s = session(3);
        s.set_lens(Lens::Research);
        s.reload(Catalog::load(entries(8)));
        assert_eq!(s.catalog().len(), 8);
        assert_eq!(s.view().lens(), Lens::Research);
    }

    #[test]
    fn find_uses_catalog_lookup() {
        let s = session(2);
        assert_eq!(s.find("study-1").map(|w| w.id.as_str()), Some("r1"));
        let card = s.preview(s.find("r0").expect("present"));
        assert_eq!(card.link, "article.html?id=r0");
    }
}
