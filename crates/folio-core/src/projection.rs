//! Projection Engine: catalog + view state → what each category shows.
//!
//! Projections are pure and recomputed on demand. They borrow works from the
//! catalog and are never stored.

use crate::catalog::Catalog;
use crate::model::{Category, Work};
use crate::roman::volume_search_labels;
use crate::view::{Mode, ViewState};
use serde::{Deserialize, Serialize};

/// Case policy for author-filter substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorMatch {
    #[default]
    Insensitive,
    Sensitive,
}

/// The ordered, capped view of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection<'a> {
    pub category: Category,
    /// Works to display, in catalog order.
    pub works: Vec<&'a Work>,
    /// Matches before truncation.
    pub total_matches: usize,
    /// Only ever true in browse mode.
    pub has_more: bool,
    /// A section with no matches is hidden by the renderer.
    pub is_visible: bool,
    /// Whether the display limit was applied (browse mode).
    pub paginated: bool,
}

/// Project one category of `catalog` under `view`.
#[must_use]
pub fn project<'a>(
    catalog: &'a Catalog,
    view: &ViewState,
    category: Category,
    author_match: AuthorMatch,
) -> Projection<'a> {
    let mode = view.mode();
    let lowered_query = match mode {
        Mode::Search(query) => Some(query.to_lowercase()),
        Mode::Browse | Mode::Author(_) => None,
    };

    let matches: Vec<&Work> = catalog
        .in_category(category)
        .filter(|work| match mode {
            Mode::Browse => true,
            Mode::Author(filter) => matches_author(work, filter, author_match),
            Mode::Search(_) => lowered_query
                .as_deref()
                .is_some_and(|query| matches_search(work, query)),
        })
        .collect();

    let total_matches = matches.len();
    let paginated = mode.is_browse();
    let works: Vec<&Work> = if paginated {
        matches
            .into_iter()
            .take(view.display_limit(category))
            .collect()
    } else {
        matches
    };

    Projection {
        category,
        has_more: paginated && total_matches > works.len(),
        is_visible: total_matches > 0,
        total_matches,
        paginated,
        works,
    }
}

/// Project every category covered by the active lens, in section order.
#[must_use]
pub fn project_view<'a>(
    catalog: &'a Catalog,
    view: &ViewState,
    author_match: AuthorMatch,
) -> Vec<Projection<'a>> {
    view.lens()
        .categories()
        .map(|category| project(catalog, view, category, author_match))
        .collect()
}

/// Author field contains `filter` as a substring.
#[must_use]
pub fn matches_author(work: &Work, filter: &str, policy: AuthorMatch) -> bool {
    match policy {
        AuthorMatch::Sensitive => work.author.contains(filter),
        AuthorMatch::Insensitive => work
            .author
            .to_lowercase()
            .contains(&filter.to_lowercase()),
    }
}

/// Full-text match for an already lower-cased, trimmed query.
///
/// Substring match over title, author, summary and the raw date string, or an
/// exact match against one of the work's volume labels (`"x"`, `"10"`,
/// `"vol x"`, `"volume 10"`, ...).
#[must_use]
pub fn matches_search(work: &Work, lowered_query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(lowered_query);

    contains(&work.title)
        || contains(&work.author)
        || work.summary.as_deref().is_some_and(contains)
        || contains(&work.date)
        || volume_search_labels(work.display_volume())
            .iter()
            .any(|label| label == lowered_query)
}
