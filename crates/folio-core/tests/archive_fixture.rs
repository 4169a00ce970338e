//! Catalog + session behaviour over a realistic archive document.
//!
//! The fixture holds 12 poems (two by Mara Quill, volumes 1 and 2), four
//! prose works (one legacy entry without an id, one manuscript, one with an
//! unparsable date), two research works (volumes 10 and 2), plus one entry
//! without an author and one with an unknown category.

use folio_core::catalog::{Catalog, WarningReason};
use folio_core::model::{Category, Lens};
use folio_core::preview::PreviewBody;
use folio_core::projection::AuthorMatch;
use folio_core::session::ArchiveSession;
use folio_core::view::{Mode, Pagination};

const ARCHIVE: &str = include_str!("fixtures/archive.json");

fn session() -> ArchiveSession {
    let report = Catalog::from_json(ARCHIVE).expect("fixture is a JSON array");
    ArchiveSession::new(report, Pagination::default(), AuthorMatch::default())
}

fn ids(session: &ArchiveSession, category: Category) -> Vec<String> {
    session
        .project(category)
        .works
        .iter()
        .map(|w| w.id.clone())
        .collect()
}

#[test]
fn malformed_entries_are_reported_not_fatal() {
    let s = session();
    assert_eq!(s.catalog().len(), 18);

    let reasons: Vec<_> = s.warnings().iter().map(|w| w.reason.clone()).collect();
    assert!(reasons.contains(&WarningReason::MissingField("author")));
    assert!(reasons.contains(&WarningReason::UnknownCategory("cinema".to_string())));
    assert!(reasons.contains(&WarningReason::UnparsableDate("the year of the flood".to_string())));
    assert_eq!(s.warnings().iter().filter(|w| w.reason.is_skip()).count(), 2);
}

#[test]
fn prose_is_ordered_newest_first_with_undated_last() {
    let s = session();
    assert_eq!(
        ids(&s, Category::Prose),
        vec!["the-long-night", "prose-ledger", "prose-almanac", "undated"]
    );
}

#[test]
fn poetry_paginates_in_pages_of_five() {
    let mut s = session();
    let first = s.project(Category::Poetry);
    assert_eq!(first.works.len(), 5);
    assert_eq!(first.works[0].id, "poem-12");
    assert!(first.has_more);

    assert!(s.load_more(Category::Poetry));
    assert!(s.load_more(Category::Poetry));
    assert_eq!(s.view().display_limit(Category::Poetry), 15);

    let all = s.project(Category::Poetry);
    assert_eq!(all.works.len(), 12);
    assert!(!all.has_more);

    assert!(!s.load_more(Category::Poetry));
    assert_eq!(s.view().display_limit(Category::Poetry), 15);
}

#[test]
fn author_filter_overrides_prior_pagination() {
    let mut s = session();
    s.load_more(Category::Poetry);
    s.load_more(Category::Poetry);
    s.set_author_filter("Mara Quill");

    assert_eq!(ids(&s, Category::Poetry), vec!["poem-09", "poem-04"]);
    assert!(!s.project(Category::Poetry).has_more);
    assert!(!s.project(Category::Prose).is_visible);

    s.clear_author_filter();
    assert_eq!(s.view().display_limit(Category::Poetry), 5);
    assert_eq!(s.project(Category::Poetry).works.len(), 5);
}

#[test]
fn author_filter_is_case_insensitive_by_default() {
    let mut s = session();
    s.set_author_filter("ines");
    assert_eq!(ids(&s, Category::Prose), vec!["the-long-night", "prose-ledger"]);
}

#[test]
fn search_spans_dates_and_volume_labels() {
    let mut s = session();

    s.set_search_query("2025");
    assert_eq!(ids(&s, Category::Prose), vec!["the-long-night"]);
    assert_eq!(ids(&s, Category::Research), vec!["research-tides"]);
    assert!(!s.project(Category::Poetry).is_visible);

    s.set_search_query("Vol II");
    assert_eq!(s.project(Category::Poetry).works.len(), 6);
    assert_eq!(ids(&s, Category::Research), vec!["research-lamps"]);

    s.set_search_query("x");
    assert_eq!(ids(&s, Category::Research), vec!["research-tides"]);
    assert!(!s.project(Category::Poetry).is_visible);

    s.set_search_query("estuary");
    assert_eq!(ids(&s, Category::Research), vec!["research-tides"]);
}

#[test]
fn clearing_search_restores_the_paginated_view() {
    let mut s = session();
    s.load_more(Category::Poetry);
    let before: Vec<_> = s.sections().iter().map(|p| ids_of(p)).collect();

    s.set_search_query("harbor");
    assert!(matches!(s.view().mode(), Mode::Search(_)));
    assert_eq!(s.project(Category::Poetry).works.len(), 12);

    s.set_search_query("");
    let after: Vec<_> = s.sections().iter().map(|p| ids_of(p)).collect();
    assert_eq!(before, after);
    assert_eq!(s.view().display_limit(Category::Poetry), 10);
}

#[test]
fn lens_limits_sections_without_touching_limits() {
    let mut s = session();
    s.load_more(Category::Poetry);
    s.set_lens(Lens::Research);
    let sections = s.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].category, Category::Research);
    assert_eq!(s.view().display_limit(Category::Poetry), 10);
}

#[test]
fn previews_follow_the_render_contract() {
    let s = session();

    let legacy = s.find("the-long-night").expect("slug id");
    let card = s.preview(legacy);
    assert_eq!(card.link, "article.html?id=the-long-night");
    assert_eq!(card.metadata, "2025-06-01 • Volume I");
    assert_eq!(card.body.lines(), vec!["A ferry stalls in fog.", "Nobody minds."]);
    assert!(!card.verse);

    let almanac = s.preview(s.find("prose-almanac").expect("present"));
    assert!(matches!(almanac.body, PreviewBody::Manuscript { ref format, .. } if format == "PDF"));

    let poem = s.preview(s.find("poem-12").expect("present"));
    assert!(poem.verse);
    assert_eq!(poem.metadata, "2024-12-15 • Volume II");
    assert_eq!(poem.body.lines().len(), 2);

    let tides = s.preview(s.find("research-tides").expect("present"));
    assert_eq!(tides.metadata, "2025-03-02 • Volume X");
}

fn ids_of(p: &folio_core::projection::Projection<'_>) -> Vec<String> {
    p.works.iter().map(|w| w.id.clone()).collect()
}
