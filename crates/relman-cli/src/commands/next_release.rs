// Rust guideline compliant 2026-02-06

//! Implementation of the `relman next-release` command.
//!
//! Prints the open issues of a version as a tree: epics with their children
//! and subtasks, standalone issues grouped by type, then the subtasks whose
//! parent is not part of the release.

use super::{load_release, CommandContext};
use crate::outline::ReleaseOutline;
use crate::render::{render_tree, TreeOptions};
use crate::terminal::{print_info, print_success, print_warning, wrap_text};
use anyhow::{Context, Result};
use relman_core::ReleaseHierarchy;
use relman_jira::IssueSource;
use std::io::Write;

/// Executes the next-release command.
///
/// # Arguments
///
/// * `source` - Issue source to query
/// * `ctx` - Shared command settings
/// * `version` - Version name, or `None` to prompt or pick the next release
/// * `detailed` - Whether to add status, assignee and priority lines
/// * `out` - Destination of the report
///
/// # Errors
///
/// Returns an error if:
/// - The version cannot be selected
/// - The release search fails
/// - The report cannot be written
pub fn execute<S>(
    source: &S,
    ctx: &CommandContext,
    version: Option<String>,
    detailed: bool,
    out: &mut dyn Write,
) -> Result<()>
where
    S: IssueSource + ?Sized,
{
    let (version, release) = load_release(source, ctx, version)?;

    print_success(&format!(
        "Selected release: {} (date: {})",
        version.name,
        version.release_date.as_deref().unwrap_or("not set")
    ));
    if !version.description.is_empty() {
        print_info(&wrap_text(&version.description, ctx.width, 2));
    }

    if release.issues.is_empty() {
        print_warning("No issues found for this version.");
        return Ok(());
    }

    let hierarchy = ReleaseHierarchy::build(release.issues);
    let outline = ReleaseOutline::new(&hierarchy);
    let options = TreeOptions {
        detailed,
        width: ctx.width,
    };

    out.write_all(render_tree(&version, &outline, &options).as_bytes())
        .context("Failed to write the release report")?;
    Ok(())
}
