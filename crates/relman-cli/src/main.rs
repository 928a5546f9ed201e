// Rust guideline compliant 2026-02-09

//! relman CLI Application
//!
//! Command-line release manager for Jira projects.

use anyhow::{Context, Result};
use clap::Parser;
use relman_cli::commands::{self, changelog::ChangelogOptions, CommandContext};
use relman_cli::logging::{init_tracing, LogOptions};
use relman_cli::terminal;
use relman_core::{ChangelogFormat, Config};
use relman_jira::{JiraClient, JiraService};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "relman.toml";

#[derive(Parser, Debug)]
#[command(
    name = "relman",
    version,
    about = "relman: release overviews and changelogs for Jira projects",
    long_about = "relman fetches the open issues of a Jira release version, rebuilds the epic / story / sub-task hierarchy and prints it as a tree or as a changelog.",
    after_help = "Examples:\n  relman next-release -p PROJ\n  relman next-release -p PROJ --version 1.4.0 --detailed\n  relman changelog -p PROJ --format slack --include-subtasks\n  relman changelog -p PROJ -o CHANGELOG.md\n  relman list-versions -p PROJ\n  relman impacted-repos -p PROJ\n"
)]
struct Cli {
    /// Jira project key (e.g. PROJ)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show how each issue is placed in the hierarchy
    #[arg(long, global = true)]
    debug: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Show the open issues planned for a version
    NextRelease {
        /// Version name; prompts or picks the next release when omitted
        #[arg(long)]
        version: Option<String>,

        /// Show status, assignee and priority of every issue
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a changelog for a version
    Changelog {
        /// Version name; prompts or picks the next release when omitted
        #[arg(long)]
        version: Option<String>,

        /// Write the changelog to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Changelog format (markdown, md, teams, slack, html, json)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<ChangelogFormat>,

        /// List subtasks under their parents
        #[arg(short = 's', long)]
        include_subtasks: bool,
    },

    /// List every version of the project
    ListVersions,

    /// Group the release's issues by label
    ImpactedRepos {
        /// Version name; prompts or picks the next release when omitted
        #[arg(long)]
        version: Option<String>,
    },
}

fn parse_format(value: &str) -> std::result::Result<ChangelogFormat, String> {
    ChangelogFormat::from_str(value).map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    terminal::set_color_enabled(!cli.no_color && terminal::should_use_color());
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let _guard = init_tracing(&LogOptions {
        level: cli.log_level.clone(),
        debug: cli.debug,
        file: cli.log_file.clone(),
    })?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let project = cli
        .project
        .clone()
        .or_else(|| config.project.clone())
        .context("The --project (-p) flag is required")?;

    let credentials = config.credentials()?;
    let client = JiraClient::new(credentials).context("Failed to create the Jira client")?;
    let base_url = client.base_url().to_string();
    let service = JiraService::new(client, config.max_results);

    let ctx = CommandContext {
        project,
        base_url,
        interactive: terminal::is_interactive(),
        progress: true,
        width: terminal::separator_width(),
    };
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::NextRelease { version, detailed } => {
            commands::next_release::execute(&service, &ctx, version, detailed, &mut stdout)?;
        }
        Commands::Changelog {
            version,
            output,
            format,
            include_subtasks,
        } => {
            let options = ChangelogOptions {
                version,
                output,
                format: format.unwrap_or(config.changelog_format),
                include_subtasks,
            };
            commands::changelog::execute(&service, &ctx, options, &mut stdout)?;
        }
        Commands::ListVersions => {
            commands::list_versions::execute(&service, &ctx, &mut stdout)?;
        }
        Commands::ImpactedRepos { version } => {
            commands::impacted_repos::execute(&service, &ctx, version, &mut stdout)?;
        }
    }

    Ok(())
}
