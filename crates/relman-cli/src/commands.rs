// Rust guideline compliant 2026-02-06

//! Command implementations for the relman CLI.
//!
//! Commands write their report to the given writer and status lines to
//! stderr, so they can run against an in-memory issue source in tests.

pub mod changelog;
pub mod impacted_repos;
pub mod list_versions;
pub mod next_release;

use crate::progress::ProgressReporter;
use crate::select::{select_version, VersionSelector};
use anyhow::Result;
use relman_core::Version;
use relman_jira::{IssueSource, ReleaseIssues};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project key.
    pub project: String,
    /// Tracker base URL, used for issue links.
    pub base_url: String,
    /// Whether prompts may be shown.
    pub interactive: bool,
    /// Whether progress lines are printed.
    pub progress: bool,
    /// Width of separator lines.
    pub width: usize,
}

impl CommandContext {
    /// Creates a context for non-interactive use with default width.
    pub fn new(project: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            base_url: base_url.into(),
            interactive: false,
            progress: false,
            width: 80,
        }
    }

    fn reporter(&self) -> ProgressReporter {
        ProgressReporter::new(&self.project, self.progress)
    }
}

/// Picks the version and fetches its issues.
fn load_release<S>(
    source: &S,
    ctx: &CommandContext,
    version: Option<String>,
) -> Result<(Version, ReleaseIssues)>
where
    S: IssueSource + ?Sized,
{
    let reporter = ctx.reporter();
    reporter.step("looking up versions");
    let selector = VersionSelector::from_flag(version, ctx.interactive);
    let version = select_version(source, &ctx.project, &selector)?;

    reporter.step(&format!("fetching issues of {}", version.name));
    let release = source.release_issues(&ctx.project, &version.name)?;
    reporter.finish_fetch(&release.stats);

    Ok((version, release))
}
