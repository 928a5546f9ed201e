// Rust guideline compliant 2026-02-06

//! In-memory issue source and release fixture shared by the CLI tests.

#![allow(dead_code)]

use relman_core::{Issue, Version};
use relman_jira::{FetchStats, IssueSource, JiraError, ReleaseIssues};
use std::cell::RefCell;

pub const BASE_URL: &str = "https://jira.test";

/// Issue source answering from memory and recording release lookups.
pub struct FakeSource {
    pub versions: Vec<Version>,
    pub issues: Vec<Issue>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new(versions: Vec<Version>, issues: Vec<Issue>) -> Self {
        Self {
            versions,
            issues,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl IssueSource for FakeSource {
    fn versions(&self, project: &str) -> relman_jira::Result<Vec<Version>> {
        if self.versions.is_empty() {
            return Err(JiraError::NoVersions(project.to_string()));
        }
        Ok(self.versions.clone())
    }

    fn release_issues(&self, _project: &str, version: &str) -> relman_jira::Result<ReleaseIssues> {
        self.requested.borrow_mut().push(version.to_string());
        Ok(ReleaseIssues {
            issues: self.issues.clone(),
            stats: FetchStats {
                found: self.issues.len(),
                ..FetchStats::default()
            },
        })
    }
}

pub fn version(name: &str, date: Option<&str>, released: bool) -> Version {
    let mut version = Version::new(name);
    version.release_date = date.map(str::to_string);
    version.released = released;
    version
}

pub fn project_versions() -> Vec<Version> {
    let mut next = version("3.0", None, false);
    next.description = "Platform upgrade with the new search backend and dashboards".to_string();
    vec![
        version("1.0", Some("2026-01-10"), true),
        version("2.0", Some("2026-11-02"), false),
        next,
    ]
}

fn labeled(mut issue: Issue, labels: &[&str]) -> Issue {
    issue.fields.labels = labels.iter().map(|label| label.to_string()).collect();
    issue
}

/// Two epics (one with a story and its subtask), three standalone issues of
/// different types, and one subtask whose parent is not in the release.
pub fn release_issues() -> Vec<Issue> {
    vec![
        Issue::new("PROJ-1", "Epic").with_summary("Checkout revamp"),
        labeled(
            Issue::new("PROJ-2", "Story")
                .with_summary("Card form")
                .with_epic("PROJ-1"),
            &["web"],
        ),
        Issue::subtask("PROJ-3", "PROJ-2").with_summary("Validate CVC"),
        labeled(
            Issue::new("PROJ-4", "Bug").with_summary("Crash on login"),
            &["mobile-app"],
        ),
        Issue::new("PROJ-5", "Spike").with_summary("Research"),
        labeled(
            Issue::subtask("PROJ-6", "PROJ-77").with_summary("Stray subtask"),
            &["web"],
        ),
        labeled(
            Issue::new("PROJ-7", "Task").with_summary("Cleanup"),
            &["mobile-app", "api"],
        ),
        Issue::new("PROJ-10", "Epic").with_summary("Search"),
    ]
}
