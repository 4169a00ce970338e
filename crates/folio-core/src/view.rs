//! View State: the small mutable record of what the reader is looking at.
//!
//! Author filtering and searching are mutually exclusive presentation modes.
//! Activating one clears the other. Display limits only matter in browse
//! mode; they reset whenever the author filter changes and survive a search,
//! so clearing a search returns to exactly the paginated view it replaced.

use crate::model::{Category, Lens};
use serde::Serialize;

/// Default number of works shown per category before any "load more".
pub const DEFAULT_INITIAL_LIMIT: usize = 5;
/// Default number of works added by each "load more".
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Initial limit and step for per-category pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub initial_limit: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            initial_limit: DEFAULT_INITIAL_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Which rendering path the projection takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Mode<'a> {
    /// Default browsing: paginated, no filtering beyond the category.
    Browse,
    /// Works whose author contains the filter string; unpaginated.
    Author(&'a str),
    /// Works matching the search query; unpaginated.
    Search(&'a str),
}

impl Mode<'_> {
    #[must_use]
    pub const fn is_browse(&self) -> bool {
        matches!(self, Self::Browse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pagination: Pagination,
    limits: [usize; 3],
    lens: Lens,
    author: Option<String>,
    query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Pagination::default())
    }
}

impl ViewState {
    #[must_use]
    pub fn new(pagination: Pagination) -> Self {
        let pagination = Pagination {
            initial_limit: pagination.initial_limit.max(1),
            page_size: pagination.page_size.max(1),
        };
        Self {
            pagination,
            limits: [pagination.initial_limit; 3],
            lens: Lens::All,
            author: None,
            query: String::new(),
        }
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    #[must_use]
    pub const fn lens(&self) -> Lens {
        self.lens
    }

    #[must_use]
    pub fn author_filter(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Raw search text as entered; see [`ViewState::mode`] for its effect.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// Current display limit of `category` (browse mode only).
    #[must_use]
    pub const fn display_limit(&self, category: Category) -> usize {
        self.limits[category.index()]
    }

    #[must_use]
    pub fn mode(&self) -> Mode<'_> {
        if let Some(author) = self.author.as_deref() {
            return Mode::Author(author);
        }
        let query = self.query.trim();
        if query.is_empty() {
            Mode::Browse
        } else {
            Mode::Search(query)
        }
    }

    pub const fn set_lens(&mut self, lens: Lens) {
        self.lens = lens;
    }

    /// Filter by author; clears any search and resets pagination.
    ///
    /// A blank name clears the filter instead.
    pub fn set_author_filter(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.clear_author_filter();
            return;
        }
        self.author = Some(name.to_string());
        self.query.clear();
        self.reset_limits();
    }

    pub fn clear_author_filter(&mut self) {
        self.author = None;
        self.reset_limits();
    }

    /// Set the search text. A blank query means "no search".
    ///
    /// A non-empty query replaces an active author filter, which (as any
    /// author filter change) resets pagination. Otherwise limits are kept.
    pub fn set_search_query(&mut self, query: &str) {
        if !query.trim().is_empty() && self.author.take().is_some() {
            self.reset_limits();
        }
        self.query = query.to_string();
    }

    /// Raise the display limit of `category` by one page, if `available`
    /// matches exceed what is shown. Returns whether the limit changed.
    pub fn load_more(&mut self, category: Category, available: usize) -> bool {
        let limit = &mut self.limits[category.index()];
        if *limit >= available {
            return false;
        }
        *limit += self.pagination.page_size;
        true
    }

    fn reset_limits(&mut self) {
        self.limits = [self.pagination.initial_limit; 3];
    }
}
