use crate::preview::DEFAULT_EXCERPT_CHARS;
use crate::projection::AuthorMatch;
use crate::view::{DEFAULT_INITIAL_LIMIT, DEFAULT_PAGE_SIZE, Pagination};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Name of the project configuration file at the project root.
pub const PROJECT_CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Archive document, relative to the project root unless absolute.
    #[serde(default = "default_source")]
    pub source: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "default_initial_limit")]
    pub initial_limit: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            initial_limit: default_initial_limit(),
            page_size: default_page_size(),
        }
    }
}

impl BrowseConfig {
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination {
            initial_limit: self.initial_limit,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub author_match: AuthorMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl PreviewConfig {
    /// Excerpt length in characters, never below one.
    #[must_use]
    pub fn excerpt_limit(&self) -> usize {
        self.excerpt_chars.max(1)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

impl ProjectConfig {
    /// Archive source resolved against `project_root`.
    #[must_use]
    pub fn source_path(&self, project_root: &Path) -> PathBuf {
        if self.archive.source.is_absolute() {
            self.archive.source.clone()
        } else {
            project_root.join(&self.archive.source)
        }
    }
}

/// Load `folio.toml` from `project_root`, or defaults when it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/folio/config.toml`, or defaults when it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("folio/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve project config, user config and the output mode in one pass.
///
/// # Errors
///
/// Returns an error if either configuration file is unreadable or invalid.
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
) -> String {
    fn output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some("pretty"),
            "text" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("data/content.json")
}

const fn default_initial_limit() -> usize {
    DEFAULT_INITIAL_LIMIT
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_excerpt_chars() -> usize {
    DEFAULT_EXCERPT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.archive.source, PathBuf::from("data/content.json"));
        assert_eq!(cfg.browse.initial_limit, 5);
        assert_eq!(cfg.browse.page_size, 5);
        assert_eq!(cfg.search.author_match, AuthorMatch::Insensitive);
        assert_eq!(cfg.preview.excerpt_chars, 200);
    }

    #[test]
    fn partial_project_config_keeps_other_defaults() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "[browse]\npage_size = 10\n\n[search]\nauthor_match = \"sensitive\"\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.browse.page_size, 10);
        assert_eq!(cfg.browse.initial_limit, 5);
        assert_eq!(cfg.search.author_match, AuthorMatch::Sensitive);
        assert_eq!(
            cfg.browse.pagination(),
            Pagination {
                initial_limit: 5,
                page_size: 10
            }
        );
    }

    #[test]
    fn zero_excerpt_chars_is_raised_to_one() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "[preview]\nexcerpt_chars = 0\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.preview.excerpt_chars, 0);
        assert_eq!(cfg.preview.excerpt_limit(), 1);
    }

    #[test]
    fn invalid_project_config_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "[browse\npage_size = ")
            .expect("write");
        let err = load_project_config(root.path()).expect_err("parse must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn relative_source_resolves_against_root() {
        let cfg = ProjectConfig::default();
        assert_eq!(
            cfg.source_path(Path::new("/srv/archive")),
            PathBuf::from("/srv/archive/data/content.json")
        );
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_wins_over_user_config() {
        let output = resolve_output(false, Some("json".to_string()), Some("pretty".to_string()));
        assert_eq!(output, "pretty");
    }

    #[test]
    fn unknown_names_fall_through_to_the_next_source() {
        let output = resolve_output(false, Some(" JSON ".to_string()), Some("human".to_string()));
        assert_eq!(output, "json");
    }
}
