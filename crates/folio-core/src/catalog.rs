//! Catalog Store: the immutable, chronologically ordered work list.
//!
//! A catalog is built once from the archive document and never mutated;
//! reloading builds a fresh catalog and replaces the old one wholesale.
//!
//! Loading is lenient at the entry level. Entries that are missing a required
//! field, name an unknown category, or repeat an id are skipped and reported
//! as [`LoadWarning`]s; the rest of the document still loads. Only a document
//! that is not a JSON array at all fails with [`LoadError`].

use crate::error::LoadError;
use crate::model::{Category, RawWork, Work, WorkType, parse_date, slugify};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// The loaded archive, sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    works: Vec<Work>,
}

/// A catalog together with the problems found while building it.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub warnings: Vec<LoadWarning>,
}

/// A problem with one entry of the archive document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    /// Position of the entry in the source array.
    pub index: usize,
    /// Id of the entry when one could be determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: WarningReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum WarningReason {
    /// Entry could not be decoded as a work object.
    Malformed(String),
    /// A required field is absent or blank.
    MissingField(&'static str),
    UnknownCategory(String),
    DuplicateId(String),
    /// Kept under a numbered id because its title slug was already taken.
    DerivedIdTaken { slug: String, assigned: String },
    /// Kept, but sorts as the oldest entry.
    UnparsableDate(String),
    /// Kept, treated as volume 1.
    InvalidVolume(String),
}

impl WarningReason {
    /// Whether the entry was dropped from the catalog.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_)
                | Self::MissingField(_)
                | Self::UnknownCategory(_)
                | Self::DuplicateId(_)
        )
    }
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed entry: {detail}"),
            Self::MissingField(field) => write!(f, "missing required field '{field}'"),
            Self::UnknownCategory(value) => write!(f, "unknown category '{value}'"),
            Self::DuplicateId(id) => write!(f, "duplicate id '{id}'"),
            Self::DerivedIdTaken { slug, assigned } => {
                write!(f, "title slug '{slug}' already in use, using id '{assigned}'")
            }
            Self::UnparsableDate(value) => write!(f, "unparsable date '{value}', sorted as oldest"),
            Self::InvalidVolume(value) => write!(f, "invalid volume {value}, using volume 1"),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "entry {} ({id}): {}", self.index, self.reason),
            None => write!(f, "entry {}: {}", self.index, self.reason),
        }
    }
}

impl Catalog {
    /// Build a catalog from decoded entries.
    #[must_use]
    pub fn load(raw: Vec<RawWork>) -> LoadReport {
        let entries = raw.into_iter().map(Ok).collect();
        Self::build(entries)
    }

    /// Parse an archive document (a JSON array of work objects).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] for invalid JSON and
    /// [`LoadError::NotAnArray`] when the top-level value is not an array.
    pub fn from_json(text: &str) -> Result<LoadReport, LoadError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Array(items) = value else {
            return Err(LoadError::NotAnArray {
                found: json_kind(&value),
            });
        };

        let entries = items
            .into_iter()
            .map(|item| serde_json::from_value::<RawWork>(item).map_err(|e| e.to_string()))
            .collect();
        Ok(Self::build(entries))
    }

    /// Read and parse an archive document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Catalog::from_json`].
    pub fn from_path(path: &Path) -> Result<LoadReport, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read archive source");
        Self::from_json(&text)
    }

    fn build(entries: Vec<Result<RawWork, String>>) -> LoadReport {
        let mut works = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        let mut seen_ids = HashSet::new();
        let explicit_ids: HashSet<String> = entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok().and_then(explicit_id))
            .collect();

        for (index, entry) in entries.into_iter().enumerate() {
            let raw = match entry {
                Ok(raw) => raw,
                Err(detail) => {
                    warnings.push(LoadWarning {
                        index,
                        id: None,
                        reason: WarningReason::Malformed(detail),
                    });
                    continue;
                }
            };

            let derived = explicit_id(&raw).is_none();
            match validate(index, raw, &mut warnings) {
                Ok(mut work) => {
                    let taken = |id: &str| seen_ids.contains(id) || explicit_ids.contains(id);
                    if derived && taken(&work.id) {
                        let assigned = numbered_id(&work.id, taken);
                        warnings.push(LoadWarning {
                            index,
                            id: Some(assigned.clone()),
                            reason: WarningReason::DerivedIdTaken {
                                slug: std::mem::replace(&mut work.id, assigned.clone()),
                                assigned,
                            },
                        });
                    }
                    if seen_ids.insert(work.id.clone()) {
                        works.push(work);
                    } else {
                        warnings.push(LoadWarning {
                            index,
                            id: Some(work.id.clone()),
                            reason: WarningReason::DuplicateId(work.id),
                        });
                    }
                }
                Err(warning) => warnings.push(warning),
            }
        }

        works.sort_by(newest_first);

        for warning in &warnings {
            warn!("archive {warning}");
        }
        info!(
            works = works.len(),
            skipped = warnings.iter().filter(|w| w.reason.is_skip()).count(),
            "catalog loaded"
        );

        LoadReport {
            catalog: Self { works },
            warnings,
        }
    }

    /// All works, newest first.
    #[must_use]
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.works.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Works of one category in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Work> {
        self.works.iter().filter(move |w| w.category == category)
    }

    /// Look up a work by stable id, falling back to the legacy title slug.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Work> {
        self.works
            .iter()
            .find(|w| w.id == id)
            .or_else(|| self.works.iter().find(|w| w.slug() == id))
    }

    /// Distinct author names with their number of works, sorted by name.
    #[must_use]
    pub fn authors(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for work in &self.works {
            *counts.entry(work.author.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect()
    }
}

/// Descending by parsed date; unparsable dates sort after every parsable one.
/// Used with a stable sort, so ties keep document order.
fn newest_first(a: &Work, b: &Work) -> Ordering {
    match (a.published, b.published) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The entry's own id, when it has a non-blank one.
fn explicit_id(raw: &RawWork) -> Option<String> {
    raw.id.clone().filter(|id| !id.trim().is_empty())
}

/// First free `<base>-<n>`, counting from 2.
fn numbered_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, WarningReason> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WarningReason::MissingField(field)),
    }
}

fn validate(
    index: usize,
    raw: RawWork,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Work, LoadWarning> {
    let title = raw.title.clone().filter(|t| !t.trim().is_empty());
    let id = explicit_id(&raw).or_else(|| title.as_deref().map(slugify));
    let skip = |reason| LoadWarning {
        index,
        id: id.clone(),
        reason,
    };

    let title = required(raw.title, "title").map_err(skip)?;
    let author = required(raw.author, "author").map_err(skip)?;
    let category = required(raw.category, "category").map_err(skip)?;
    let date = required(raw.date, "date").map_err(skip)?;
    let content = required(raw.content, "content").map_err(skip)?;
    let category = Category::from_str(&category)
        .map_err(|_| skip(WarningReason::UnknownCategory(category.clone())))?;
    let id = id.unwrap_or_else(|| slugify(&title));

    let published = parse_date(&date);
    if published.is_none() {
        warnings.push(LoadWarning {
            index,
            id: Some(id.clone()),
            reason: WarningReason::UnparsableDate(date.clone()),
        });
    }

    let volume = match raw.volume {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => {
            let parsed = value
                .as_u64()
                .filter(|v| *v >= 1)
                .and_then(|v| u32::try_from(v).ok());
            if parsed.is_none() {
                warnings.push(LoadWarning {
                    index,
                    id: Some(id.clone()),
                    reason: WarningReason::InvalidVolume(value.to_string()),
                });
            }
            parsed
        }
    };

    Ok(Work {
        id,
        title,
        author,
        category,
        kind: WorkType::from_raw(raw.kind.as_deref()),
        date,
        volume,
        summary: raw.summary.filter(|s| !s.trim().is_empty()),
        content,
        published,
    })
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
