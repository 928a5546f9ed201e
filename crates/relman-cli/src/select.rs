// Rust guideline compliant 2026-02-06

//! Version selection shared by the release commands.

use anyhow::{bail, Context, Result};
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use relman_core::Version;
use relman_jira::IssueSource;
use tracing::debug;

/// Number of versions shown at once in the picker.
pub const PAGE_SIZE: usize = 15;

/// How the release version is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Exact version name given on the command line.
    Named(String),
    /// Pick from a list on the terminal.
    Prompt,
    /// Next unreleased version.
    NextRelease,
}

impl VersionSelector {
    /// Chooses the selector from the `--version` flag and terminal state.
    pub fn from_flag(version: Option<String>, interactive: bool) -> Self {
        match version {
            Some(name) => VersionSelector::Named(name),
            None if interactive => VersionSelector::Prompt,
            None => VersionSelector::NextRelease,
        }
    }
}

/// Resolves the selector to a version of the project.
///
/// # Errors
///
/// Returns an error if:
/// - The versions cannot be fetched
/// - The named version does not exist
/// - The project has no unreleased version
/// - The prompt is cancelled
pub fn select_version<S>(source: &S, project: &str, selector: &VersionSelector) -> Result<Version>
where
    S: IssueSource + ?Sized,
{
    debug!(project, ?selector, "selecting version");
    match selector {
        VersionSelector::Named(name) => Ok(source.version_by_name(project, name)?),
        VersionSelector::NextRelease => Ok(source.next_release(project)?),
        VersionSelector::Prompt => {
            let versions = source.versions(project)?;
            prompt_version(versions)
        }
    }
}

/// Shows the versions in a picker on stderr.
fn prompt_version(mut versions: Vec<Version>) -> Result<Version> {
    let labels: Vec<String> = versions.iter().map(Version::selection_label).collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a version")
        .items(&labels)
        .default(0)
        .max_length(PAGE_SIZE)
        .interact_on_opt(&Term::stderr())
        .context("Version selection failed")?;

    match choice {
        Some(index) if index < versions.len() => Ok(versions.swap_remove(index)),
        _ => bail!("Version selection cancelled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_flag() {
        assert_eq!(
            VersionSelector::from_flag(Some("1.0".to_string()), true),
            VersionSelector::Named("1.0".to_string())
        );
        assert_eq!(
            VersionSelector::from_flag(None, true),
            VersionSelector::Prompt
        );
        assert_eq!(
            VersionSelector::from_flag(None, false),
            VersionSelector::NextRelease
        );
    }
}
