//! `folio theme`: read or change the persisted light/midnight preference.

use crate::archive::Workspace;
use crate::output::{CliError, OutputMode, pretty_kv, render_error, render_mode};
use clap::{Args, Subcommand};
use folio_core::store::{PreferenceStore, SqliteStore};
use folio_core::theme::{Theme, ThemePreference};
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    #[command(about = "Print the current theme (default)")]
    Show,

    #[command(about = "Switch between light and midnight")]
    Toggle,

    #[command(about = "Choose a theme explicitly")]
    Set {
        /// light or midnight.
        theme: Theme,
    },
}

#[derive(Debug, Serialize)]
pub struct ThemeOutput {
    pub theme: Theme,
    /// Label of the control that switches away from `theme`.
    pub toggle_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_class: Option<&'static str>,
    pub changed: bool,
}

impl ThemeOutput {
    const fn new(theme: Theme, changed: bool) -> Self {
        Self {
            theme,
            toggle_label: theme.toggle_label(),
            body_class: theme.body_class(),
            changed,
        }
    }
}

/// # Errors
///
/// Returns an error if the preference database cannot be opened, read or
/// written.
pub fn run_theme(
    args: &ThemeArgs,
    output: OutputMode,
    workspace: &Workspace,
) -> anyhow::Result<()> {
    let path = workspace.preferences_path();
    let mut store = match SqliteStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            render_error(output, &CliError::from_code(err.to_string(), err.code()))?;
            return Err(err.into());
        }
    };

    let result = apply(args.command.unwrap_or(ThemeCommand::Show), &mut store)?;
    if result.changed {
        info!(theme = %result.theme, "theme preference saved");
    }
    render_mode(output, &result, write_text, write_pretty)
}

fn apply(command: ThemeCommand, store: &mut dyn PreferenceStore) -> anyhow::Result<ThemeOutput> {
    let mut pref = ThemePreference::load(store)?;
    let before = pref.theme();
    let after = match command {
        ThemeCommand::Show => before,
        ThemeCommand::Toggle => pref.toggle(store)?,
        ThemeCommand::Set { theme } => pref.set(store, theme)?,
    };
    Ok(ThemeOutput::new(after, after != before))
}

fn write_text(out: &ThemeOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", out.theme)
}

fn write_pretty(out: &ThemeOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_kv(w, "Theme", out.theme.as_str())?;
    pretty_kv(w, "Toggle", out.toggle_label)
}
