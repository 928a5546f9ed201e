// Rust guideline compliant 2026-02-09

//! Release queries against the tracker.
//!
//! The release search returns the version's open, non-subtask issues. The
//! subtasks of those issues and the open stories of in-release epics are not
//! always tagged with the version, so they are fetched in follow-up calls and
//! appended to the snapshot. Only the first page of each search is read.

use crate::{JiraClient, JiraError, Result};
use rayon::prelude::*;
use relman_core::{Issue, IssueRef, Project, SearchResults, Version};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Fields requested for every issue, enough to classify and render it.
const ISSUE_FIELDS: &str = "summary,status,assignee,priority,issuetype,parent,subtasks,epic,labels";

/// Counters describing how a release snapshot was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Issues returned by the release search.
    pub found: usize,
    /// Open subtasks fetched individually.
    pub subtasks: usize,
    /// Open stories fetched through their epic link.
    pub epic_stories: usize,
}

/// Flat issue snapshot of one release.
#[derive(Debug, Clone, Default)]
pub struct ReleaseIssues {
    /// Issues in fetch order.
    pub issues: Vec<Issue>,
    /// How the snapshot was assembled.
    pub stats: FetchStats,
}

/// Supplier of versions and release issues.
///
/// Implemented by [`JiraService`]; commands depend on this trait so they can
/// run against any source.
pub trait IssueSource {
    /// Returns every version of the project, in tracker order.
    ///
    /// # Errors
    ///
    /// Returns an error if the versions cannot be fetched.
    fn versions(&self, project: &str) -> Result<Vec<Version>>;

    /// Returns the open issues bound to a version.
    ///
    /// # Errors
    ///
    /// Returns an error if the release search fails. Follow-up lookups that
    /// fail are skipped.
    fn release_issues(&self, project: &str, version: &str) -> Result<ReleaseIssues>;

    /// Returns the project's version with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::VersionNotFound`] if no version matches.
    fn version_by_name(&self, project: &str, name: &str) -> Result<Version> {
        let versions = self.versions(project)?;
        find_version(&versions, name)
            .cloned()
            .ok_or_else(|| JiraError::VersionNotFound {
                project: project.to_string(),
                version: name.to_string(),
            })
    }

    /// Returns the next version to be released.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::NoUnreleasedVersion`] if every version is
    /// released or archived.
    fn next_release(&self, project: &str) -> Result<Version> {
        let versions = self.versions(project)?;
        next_release_version(&versions)
            .cloned()
            .ok_or_else(|| JiraError::NoUnreleasedVersion(project.to_string()))
    }
}

/// Finds a version by exact name.
pub fn find_version<'a>(versions: &'a [Version], name: &str) -> Option<&'a Version> {
    versions.iter().find(|version| version.name == name)
}

/// Picks the next version to be released.
///
/// Among unreleased, unarchived versions, dated versions come first in date
/// order, then undated ones; ties are broken by name. The result does not
/// depend on input order.
pub fn next_release_version(versions: &[Version]) -> Option<&Version> {
    versions
        .iter()
        .filter(|version| !version.released && !version.archived)
        .min_by(|a, b| release_order(a, b))
}

fn release_order(a: &Version, b: &Version) -> Ordering {
    let by_date = match (&a.release_date, &b.release_date) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.name.cmp(&b.name))
}

/// Quotes a value for use inside a JQL string literal.
pub fn quote_jql(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// JQL selecting the open, non-subtask issues of a version.
pub fn release_jql(project: &str, version: &str) -> String {
    format!(
        "project = {} AND fixVersion = {} AND statusCategory != Done AND issuetype not in (Sub-task, Sub-bug)",
        quote_jql(project),
        quote_jql(version)
    )
}

/// JQL selecting the open stories linked to any of the given epics.
pub fn epic_stories_jql(project: &str, epic_keys: &[&str]) -> String {
    let keys: Vec<String> = epic_keys.iter().map(|key| quote_jql(key)).collect();
    format!(
        "project = {} AND statusCategory != Done AND \"Epic Link\" in ({})",
        quote_jql(project),
        keys.join(",")
    )
}

/// Issue source backed by the Jira REST API.
pub struct JiraService {
    client: JiraClient,
    max_results: u32,
}

impl JiraService {
    /// Creates a service reading at most `max_results` issues per search.
    pub fn new(client: JiraClient, max_results: u32) -> Self {
        Self {
            client,
            max_results,
        }
    }

    /// Fetches a single issue by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be fetched or decoded.
    pub fn get_issue(&self, key: &str) -> Result<Issue> {
        self.client.get_json(
            &format!("/rest/api/3/issue/{}", key),
            &[("fields", ISSUE_FIELDS)],
        )
    }

    /// Runs a JQL search and returns its first page.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub fn search(&self, jql: &str) -> Result<SearchResults> {
        debug!(jql, "searching");
        let max_results = self.max_results.to_string();
        self.client.get_json(
            "/rest/api/3/search/jql",
            &[
                ("jql", jql),
                ("startAt", "0"),
                ("maxResults", max_results.as_str()),
                ("fields", ISSUE_FIELDS),
            ],
        )
    }

    /// Fetches the referenced subtasks that are not yet in the snapshot.
    ///
    /// Lookups run in parallel; results keep reference order. Failed lookups
    /// and completed subtasks are skipped.
    fn fetch_subtasks(
        &self,
        refs: &[IssueRef],
        seen: &mut HashSet<String>,
        issues: &mut Vec<Issue>,
    ) -> usize {
        let mut pending: Vec<&str> = Vec::new();
        for subtask in refs {
            if !seen.contains(&subtask.key) && !pending.contains(&subtask.key.as_str()) {
                pending.push(&subtask.key);
            }
        }

        let fetched: Vec<(&str, Result<Issue>)> = pending
            .par_iter()
            .map(|key| (*key, self.get_issue(key)))
            .collect();

        let mut added = 0;
        for (key, result) in fetched {
            match result {
                Ok(subtask) if subtask.is_completed() => {
                    debug!(key, "skipping completed subtask");
                }
                Ok(subtask) => {
                    seen.insert(subtask.key.clone());
                    issues.push(subtask);
                    added += 1;
                }
                Err(err) => warn!(key, error = %err, "skipping subtask that could not be fetched"),
            }
        }
        added
    }
}

impl IssueSource for JiraService {
    fn versions(&self, project: &str) -> Result<Vec<Version>> {
        let project_data: Project = self.client.get_json(
            &format!("/rest/api/3/project/{}", project),
            &[("expand", "versions")],
        )?;

        if project_data.versions.is_empty() {
            return Err(JiraError::NoVersions(project.to_string()));
        }

        Ok(project_data.versions)
    }

    fn release_issues(&self, project: &str, version: &str) -> Result<ReleaseIssues> {
        let results = self.search(&release_jql(project, version))?;
        let mut stats = FetchStats {
            found: results.issues.len(),
            ..FetchStats::default()
        };
        info!(project, version, found = stats.found, total = results.total, "release search");

        let mut seen: HashSet<String> = HashSet::new();
        let mut epic_keys: Vec<String> = Vec::new();
        let mut issues: Vec<Issue> = Vec::with_capacity(results.issues.len());
        for issue in results.issues {
            if issue.is_epic() && !epic_keys.contains(&issue.key) {
                epic_keys.push(issue.key.clone());
            }
            seen.insert(issue.key.clone());
            issues.push(issue);
        }

        let refs: Vec<IssueRef> = issues
            .iter()
            .flat_map(|issue| issue.fields.subtasks.iter().cloned())
            .collect();
        stats.subtasks += self.fetch_subtasks(&refs, &mut seen, &mut issues);

        if !epic_keys.is_empty() {
            let keys: Vec<&str> = epic_keys.iter().map(String::as_str).collect();
            match self.search(&epic_stories_jql(project, &keys)) {
                Ok(stories) => {
                    let mut story_refs: Vec<IssueRef> = Vec::new();
                    for story in stories.issues {
                        if seen.insert(story.key.clone()) {
                            story_refs.extend(story.fields.subtasks.iter().cloned());
                            issues.push(story);
                            stats.epic_stories += 1;
                        }
                    }
                    stats.subtasks += self.fetch_subtasks(&story_refs, &mut seen, &mut issues);
                }
                Err(err) => warn!(error = %err, "skipping epic stories lookup"),
            }
        }

        info!(
            subtasks = stats.subtasks,
            epic_stories = stats.epic_stories,
            "release snapshot assembled"
        );
        Ok(ReleaseIssues { issues, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str, date: Option<&str>, released: bool, archived: bool) -> Version {
        Version {
            name: name.to_string(),
            release_date: date.map(str::to_string),
            released,
            archived,
            ..Version::default()
        }
    }

    #[test]
    fn test_next_release_prefers_earliest_date() {
        let versions = vec![
            version("2.0", Some("2026-12-01"), false, false),
            version("1.9", Some("2026-11-01"), false, false),
            version("1.8", Some("2026-10-01"), true, false),
        ];
        assert_eq!(next_release_version(&versions).map(|v| v.name.as_str()), Some("1.9"));
    }

    #[test]
    fn test_next_release_falls_back_to_name() {
        let versions = vec![
            version("b-release", None, false, false),
            version("a-release", Some("2027-01-01"), false, false),
        ];
        assert_eq!(
            next_release_version(&versions).map(|v| v.name.as_str()),
            Some("a-release")
        );
    }

    #[test]
    fn test_next_release_dated_before_undated() {
        let versions = vec![
            version("0.9", None, false, false),
            version("2.0", Some("2027-12-28"), false, false),
            version("1.0", None, false, false),
            version("3.0", Some("2027-10-26"), false, false),
        ];
        assert_eq!(next_release_version(&versions).map(|v| v.name.as_str()), Some("3.0"));
    }

    #[test]
    fn test_next_release_independent_of_input_order() {
        let mut versions: Vec<Version> = (0..200)
            .map(|n| {
                let date = (n % 2 == 0).then(|| format!("2027-{:02}-01", 12 - (n / 2) % 12));
                version(&format!("v{:04}", n), date.as_deref(), false, false)
            })
            .collect();

        let forward = next_release_version(&versions).map(|v| v.name.clone());
        versions.reverse();
        let backward = next_release_version(&versions).map(|v| v.name.clone());

        assert_eq!(forward, backward);
        assert_eq!(
            versions
                .iter()
                .find(|v| Some(&v.name) == forward.as_ref())
                .and_then(|v| v.release_date.as_deref()),
            Some("2027-01-01")
        );
    }

    #[test]
    fn test_next_release_undated_by_name() {
        let versions = vec![
            version("b-release", None, false, false),
            version("a-release", None, false, false),
        ];
        assert_eq!(
            next_release_version(&versions).map(|v| v.name.as_str()),
            Some("a-release")
        );
    }

    #[test]
    fn test_next_release_ignores_released_and_archived() {
        let versions = vec![
            version("1.0", None, true, false),
            version("1.1", None, false, true),
        ];
        assert!(next_release_version(&versions).is_none());
    }

    #[test]
    fn test_find_version_exact_name() {
        let versions = vec![version("1.0", None, false, false)];
        assert!(find_version(&versions, "1.0").is_some());
        assert!(find_version(&versions, "1.0.0").is_none());
    }

    #[test]
    fn test_release_jql() {
        assert_eq!(
            release_jql("PROJ", "1.2"),
            "project = \"PROJ\" AND fixVersion = \"1.2\" AND statusCategory != Done AND issuetype not in (Sub-task, Sub-bug)"
        );
    }

    #[test]
    fn test_quote_jql_escapes() {
        assert_eq!(quote_jql("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_jql("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_epic_stories_jql() {
        assert_eq!(
            epic_stories_jql("PROJ", &["PROJ-1", "PROJ-2"]),
            "project = \"PROJ\" AND statusCategory != Done AND \"Epic Link\" in (\"PROJ-1\",\"PROJ-2\")"
        );
    }
}
