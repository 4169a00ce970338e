#![forbid(unsafe_code)]

mod archive;
mod cmd;
mod output;

use archive::{ViewArgs, Workspace};
use clap::{CommandFactory, Parser, Subcommand};
use folio_core::config::resolve_config;
use folio_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "folio: browse a literary archive of poetry, prose and research",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Archive document to read instead of `[archive].source` in folio.toml.
    #[arg(long, global = true, value_name = "PATH")]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Browse",
        about = "Show the archive section by section",
        long_about = "Show the archive section by section, newest first.\n\n\
                      Sections hold five works at first; each --more adds five to that \
                      category. --author and --search show every match at once.",
        after_help = "EXAMPLES:\n    # Browse everything\n    folio list\n\n    # Two extra pages of poetry\n    folio list --more poetry --more poetry\n\n    # Every work by a matching author\n    folio list --author quill\n\n    # Search titles, authors, summaries, dates and volumes\n    folio list --search \"vol ii\" --format json"
    )]
    List(ViewArgs),

    #[command(
        next_help_heading = "Browse",
        about = "Show one work in full",
        after_help = "EXAMPLES:\n    # By id\n    folio show poem-12\n\n    # By legacy title slug\n    folio show the-long-night"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Browse",
        about = "List authors with their number of works",
        after_help = "EXAMPLES:\n    folio authors --format text"
    )]
    Authors,

    #[command(
        next_help_heading = "Appearance",
        about = "Show or change the light/midnight theme",
        after_help = "EXAMPLES:\n    # Current theme\n    folio theme\n\n    # Flip it\n    folio theme toggle\n\n    # Pick one\n    folio theme set light"
    )]
    Theme(cmd::theme::ThemeArgs),

    #[command(
        next_help_heading = "Publish",
        about = "Write the archive page as static HTML",
        after_help = "EXAMPLES:\n    # Write dist/index.html\n    folio render\n\n    # Only research, into site/\n    folio render --lens research --out site"
    )]
    Render(cmd::render::RenderArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    folio completions zsh > ~/.zfunc/_folio"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "folio=debug,folio_core=debug,info"
        } else {
            "folio=info,folio_core=info,warn"
        })
    });

    let format = env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        cmd::completions::run_completions(args, Cli::command());
        return Ok(());
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            let mode = resolve_output_mode(cli.format, if cli.json { "json" } else { "text" });
            render_error(
                mode,
                &CliError::from_code(format!("{err:#}"), ErrorCode::ConfigParseError),
            )?;
            return Err(err);
        }
    };
    let output = resolve_output_mode(cli.format, &config.resolved_output);
    let workspace = Workspace::new(project_root, config.project, cli.source.as_deref());
    debug!(root = %workspace.root.display(), ?output, "workspace resolved");

    match &cli.command {
        Commands::List(args) => cmd::list::run_list(args, output, &workspace),
        Commands::Show(args) => cmd::show::run_show(args, output, &workspace),
        Commands::Authors => cmd::authors::run_authors(output, &workspace),
        Commands::Theme(args) => cmd::theme::run_theme(args, output, &workspace),
        Commands::Render(args) => cmd::render::run_render(args, output, &workspace),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::model::{Category, Lens};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["folio", "list", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
    }

    #[test]
    fn hidden_json_flag_is_global() {
        let cli = Cli::parse_from(["folio", "authors", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Authors));
    }

    #[test]
    fn list_collects_repeated_more_flags() {
        let cli = Cli::parse_from([
            "folio", "list", "--lens", "poetry", "--more", "poetry", "--more", "Prose",
        ]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.lens, Lens::Poetry);
        assert_eq!(args.more, vec![Category::Poetry, Category::Prose]);
    }

    #[test]
    fn author_and_search_conflict() {
        let result = Cli::try_parse_from(["folio", "list", "--author", "a", "--search", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_lens_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "list", "--lens", "cinema"]).is_err());
    }

    #[test]
    fn theme_subcommand_is_optional() {
        let cli = Cli::parse_from(["folio", "theme"]);
        let Commands::Theme(args) = cli.command else {
            panic!("expected theme");
        };
        assert!(args.command.is_none());

        let cli = Cli::parse_from(["folio", "theme", "set", "light"]);
        let Commands::Theme(args) = cli.command else {
            panic!("expected theme");
        };
        assert_eq!(
            args.command,
            Some(cmd::theme::ThemeCommand::Set {
                theme: folio_core::theme::Theme::Light
            })
        );
    }

    #[test]
    fn render_defaults_to_dist() {
        let cli = Cli::parse_from(["folio", "render", "--source", "other.json"]);
        assert_eq!(cli.source, Some(PathBuf::from("other.json")));
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.out, PathBuf::from("dist"));
        assert_eq!(args.view.lens, Lens::All);
    }
}
