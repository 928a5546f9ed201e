// Rust guideline compliant 2026-02-06

//! Implementation of the `relman list-versions` command.

use super::CommandContext;
use anyhow::{Context, Result};
use relman_core::Version;
use relman_jira::IssueSource;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};

/// Descriptions longer than this are truncated.
const MAX_DESCRIPTION_LEN: usize = 50;

/// Placeholder for missing dates.
const NOT_AVAILABLE: &str = "N/A";

/// Executes the list-versions command.
///
/// # Errors
///
/// Returns an error if the versions cannot be fetched or written.
pub fn execute<S>(source: &S, ctx: &CommandContext, out: &mut dyn Write) -> Result<()>
where
    S: IssueSource + ?Sized,
{
    let versions = source.versions(&ctx.project)?;
    writeln!(out, "{}", format_versions(&versions)).context("Failed to write version table")?;
    Ok(())
}

/// Formats versions as a table, in tracker order.
pub fn format_versions(versions: &[Version]) -> String {
    if versions.is_empty() {
        return "No versions found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["NAME", "STATE", "RELEASE DATE", "START DATE", "DESCRIPTION"]);

    for version in versions {
        builder.push_record([
            version.name.clone(),
            version.state().to_string(),
            version
                .release_date
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            version
                .start_date
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            truncate_description(&version.description),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

/// Cuts descriptions over 50 characters to 47 characters plus `...`.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LEN {
        return description.to_string();
    }
    let kept: String = description.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
    format!("{}...", kept)
}
