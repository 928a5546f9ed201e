// Rust guideline compliant 2026-02-06

//! Implementation of the `relman impacted-repos` command.
//!
//! Labels name the repositories an issue touches. Subtasks are left out and
//! unlabeled issues are ignored.

use super::{load_release, CommandContext};
use crate::terminal::{print_info, print_success, print_warning};
use anyhow::{Context, Result};
use relman_core::Issue;
use relman_jira::IssueSource;
use std::collections::BTreeMap;
use std::io::Write;

/// Groups non-subtask issues by label, labels in sorted order.
///
/// An issue with several labels appears under each of them.
pub fn group_by_label(issues: &[Issue]) -> BTreeMap<&str, Vec<&Issue>> {
    let mut groups: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();
    for issue in issues.iter().filter(|issue| !issue.is_subtask()) {
        for label in &issue.fields.labels {
            groups.entry(label.as_str()).or_default().push(issue);
        }
    }
    groups
}

/// Formats the label groups.
pub fn format_groups(groups: &BTreeMap<&str, Vec<&Issue>>, width: usize) -> String {
    let rule = "─".repeat(width);
    let mut output = String::from("📂 Impacted repositories (grouped by label):\n");

    for (label, issues) in groups {
        output.push_str(&format!("\n{}\n", rule));
        output.push_str(&format!("🏷️  {} ({} issues)\n", label, issues.len()));
        output.push_str(&format!("{}\n", rule));
        for issue in issues {
            output.push_str(&format!(
                "  - [{}] {} ({})\n",
                issue.key(),
                issue.fields.summary,
                issue.issue_type_name()
            ));
        }
    }

    output
}

/// Executes the impacted-repos command.
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
    out: &mut dyn Write,
) -> Result<()>
where
    S: IssueSource + ?Sized,
{
    let (version, release) = load_release(source, ctx, version)?;
    print_success(&format!("Impacted repositories for version {}", version.name));

    if release.issues.is_empty() {
        print_warning("No issues found for this version.");
        return Ok(());
    }

    let groups = group_by_label(&release.issues);
    if groups.is_empty() {
        print_info("No labeled issues found in this release.");
        return Ok(());
    }

    out.write_all(format_groups(&groups, ctx.width).as_bytes())
        .context("Failed to write repository report")?;
    Ok(())
}
