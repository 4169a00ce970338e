use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripts and agents driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SourceUnreadable,
    SourceNotJson,
    SourceNotArray,
    WorkNotFound,
    PreferenceStoreFailed,
    RenderWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SourceUnreadable => "E2001",
            Self::SourceNotJson => "E2002",
            Self::SourceNotArray => "E2003",
            Self::WorkNotFound => "E3001",
            Self::PreferenceStoreFailed => "E4001",
            Self::RenderWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SourceUnreadable => "Archive source could not be read",
            Self::SourceNotJson => "Archive source is not valid JSON",
            Self::SourceNotArray => "Archive source is not a JSON array",
            Self::WorkNotFound => "Work not found",
            Self::PreferenceStoreFailed => "Preference store failure",
            Self::RenderWriteFailed => "Rendered output could not be written",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in folio.toml and retry."),
            Self::SourceUnreadable => {
                Some("Check [archive].source in folio.toml or pass --source <PATH>.")
            }
            Self::SourceNotJson | Self::SourceNotArray => {
                Some("The archive document must be a JSON array of work objects.")
            }
            Self::WorkNotFound => {
                Some("Use the stable id or the title slug shown by `folio list`.")
            }
            Self::PreferenceStoreFailed => {
                Some("Check write permissions for .folio/preferences.db.")
            }
            Self::RenderWriteFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure to obtain a work list from the archive document as a whole.
///
/// Problems with individual entries never surface here; they are reported as
/// [`crate::catalog::LoadWarning`]s alongside the catalog.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read archive source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("archive source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("archive source must be a JSON array of works, found {found}")]
    NotAnArray { found: &'static str },
}

impl LoadError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::SourceUnreadable,
            Self::Json(_) => ErrorCode::SourceNotJson,
            Self::NotAnArray { .. } => ErrorCode::SourceNotArray,
        }
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Errors from the durable key-value preference store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to prepare preference store directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference store query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::PreferenceStoreFailed
    }
}
