use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fmt, str::FromStr};

/// The three fixed partitions of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Poetry,
    Prose,
    Research,
}

impl Category {
    /// Every category, in section order.
    pub const ALL: [Self; 3] = [Self::Poetry, Self::Prose, Self::Research];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poetry => "poetry",
            Self::Prose => "prose",
            Self::Research => "research",
        }
    }

    /// Capitalized name used in headings and "View More" affordances.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Poetry => "Poetry",
            Self::Prose => "Prose",
            Self::Research => "Research",
        }
    }

    /// Position in [`Category::ALL`], used to index per-category state.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Poetry => 0,
            Self::Prose => 1,
            Self::Research => 2,
        }
    }
}

/// The active category lens over the whole view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lens {
    #[default]
    All,
    Poetry,
    Prose,
    Research,
}

impl Lens {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Poetry => "poetry",
            Self::Prose => "prose",
            Self::Research => "research",
        }
    }

    /// Whether the lens shows sections of `category`.
    #[must_use]
    pub const fn includes(self, category: Category) -> bool {
        matches!(
            (self, category),
            (Self::All, _)
                | (Self::Poetry, Category::Poetry)
                | (Self::Prose, Category::Prose)
                | (Self::Research, Category::Research)
        )
    }

    /// Categories covered by the lens, in section order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.includes(*c))
    }
}

impl From<Category> for Lens {
    fn from(category: Category) -> Self {
        match category {
            Category::Poetry => Self::Poetry,
            Category::Prose => Self::Prose,
            Category::Research => Self::Research,
        }
    }
}

/// Presentation kind of a work. Anything that is not a poem renders as prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Poem,
    #[default]
    Other,
}

impl WorkType {
    /// Map the free-form `type` field of the source document.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(normalize).as_deref() {
            Some("poem") => Self::Poem,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poem => "poem",
            Self::Other => "other",
        }
    }
}

/// File extensions that mark `content` as a reference to a manuscript file.
pub const MANUSCRIPT_EXTENSIONS: &[&str] = &["pdf", "epub", "docx"];

/// A single archived item, immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Work {
    /// Stable identifier, or the title slug when the source entry has none.
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: WorkType,
    /// Date exactly as written in the source document.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub content: String,
    /// Parsed form of `date`; `None` when the string is not a recognised date.
    #[serde(skip)]
    pub published: Option<DateTime<Utc>>,
}

impl Work {
    /// Volume used for display and search; absent volumes count as volume 1.
    #[must_use]
    pub fn display_volume(&self) -> u32 {
        self.volume.unwrap_or(1)
    }

    /// Legacy title slug (`"The Long Night"` → `"the-long-night"`).
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// Lower-cased extension when `content` references a manuscript file.
    #[must_use]
    pub fn manuscript_extension(&self) -> Option<String> {
        let content = self.content.trim();
        if content.contains(char::is_whitespace) {
            return None;
        }
        let ext = Path::new(content).extension()?.to_str()?.to_ascii_lowercase();
        MANUSCRIPT_EXTENSIONS
            .contains(&ext.as_str())
            .then_some(ext)
    }

    #[must_use]
    pub const fn is_poem(&self) -> bool {
        matches!(self.kind, WorkType::Poem)
    }
}

/// One entry of the source document before validation.
///
/// Every field is optional so that a single bad entry can be reported and
/// skipped without rejecting the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawWork {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub volume: Option<serde_json::Value>,
    pub summary: Option<String>,
    pub content: Option<String>,
}

/// Replace whitespace runs with `-` and lowercase.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Parse the ISO-ish date strings found in archive documents.
///
/// Accepts RFC 3339 timestamps, naive date-times, plain dates, and the
/// year-month / year-only shorthands (which resolve to the first day).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    // "2024-06" and "2024"
    let padded = match raw.len() {
        4 if raw.chars().all(|c| c.is_ascii_digit()) => format!("{raw}-01-01"),
        7 => format!("{raw}-01"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "poetry" => Ok(Self::Poetry),
            "prose" => Ok(Self::Prose),
            "research" => Ok(Self::Research),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Lens {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "poetry" => Ok(Self::Poetry),
            "prose" => Ok(Self::Prose),
            "research" => Ok(Self::Research),
            _ => Err(ParseEnumError {
                expected: "lens",
                got: s.to_string(),
            }),
        }
    }
}
