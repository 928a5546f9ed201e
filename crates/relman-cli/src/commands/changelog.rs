// Rust guideline compliant 2026-02-06

//! Implementation of the `relman changelog` command.

use super::{load_release, CommandContext};
use crate::outline::ReleaseOutline;
use crate::render::{create_renderer, Changelog};
use crate::terminal::{print_success, print_warning};
use anyhow::{Context, Result};
use relman_core::{ChangelogFormat, ReleaseHierarchy};
use relman_jira::IssueSource;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Options of the changelog command.
#[derive(Debug, Clone, Default)]
pub struct ChangelogOptions {
    /// Version name, or `None` to prompt or pick the next release.
    pub version: Option<String>,
    /// File to write instead of the output stream.
    pub output: Option<PathBuf>,
    /// Output format.
    pub format: ChangelogFormat,
    /// Whether subtasks are listed.
    pub include_subtasks: bool,
}

/// Executes the changelog command.
///
/// # Errors
///
/// Returns an error if:
/// - The version cannot be selected
/// - The release search fails
/// - The changelog cannot be written
pub fn execute<S>(
    source: &S,
    ctx: &CommandContext,
    options: ChangelogOptions,
    out: &mut dyn Write,
) -> Result<()>
where
    S: IssueSource + ?Sized,
{
    let (version, release) = load_release(source, ctx, options.version)?;
    print_success(&format!(
        "Generating {} changelog for version {}",
        options.format, version.name
    ));
    if release.issues.is_empty() {
        print_warning("No issues found for this version.");
    }

    let hierarchy = ReleaseHierarchy::build(release.issues);
    let outline = ReleaseOutline::new(&hierarchy);
    let changelog = Changelog::new(&version, &outline, &ctx.base_url, options.include_subtasks);
    let rendered = create_renderer(options.format).render(&changelog);

    match options.output {
        Some(path) => {
            fs::write(&path, rendered.as_bytes())
                .with_context(|| format!("Failed to write changelog to {}", path.display()))?;
            print_success(&format!("Changelog saved to {}", path.display()));
        }
        None => {
            writeln!(out, "{}", rendered).context("Failed to write changelog")?;
        }
    }

    Ok(())
}
