// Rust guideline compliant 2026-02-06

//! Core data models for relman.
//!
//! These mirror the JSON shapes returned by the tracker's REST API. Every
//! field except the issue key falls back to its default when the tracker
//! omits it, so a sparse `fields` selection still deserializes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Project with its release versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project key (e.g. `PROJ`).
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Release versions of the project.
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// Lifecycle state of a release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionState {
    /// Planned, not yet shipped.
    Unreleased,
    /// Shipped.
    Released,
    /// Hidden from planning views.
    Archived,
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VersionState::Unreleased => "Unreleased",
            VersionState::Released => "Released",
            VersionState::Archived => "Archived",
        };
        f.write_str(label)
    }
}

/// A release version (`fixVersion`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
    /// Version name, used in JQL.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Whether the version is archived.
    #[serde(default)]
    pub archived: bool,
    /// Whether the version is released.
    #[serde(default)]
    pub released: bool,
    /// Planned or actual release date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Start date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl Version {
    /// Creates an unreleased version with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the lifecycle state. Archived takes precedence over released.
    pub fn state(&self) -> VersionState {
        if self.archived {
            VersionState::Archived
        } else if self.released {
            VersionState::Released
        } else {
            VersionState::Unreleased
        }
    }

    /// Label shown in the interactive version picker.
    pub fn selection_label(&self) -> String {
        format!(
            "{} ({}, date: {})",
            self.name,
            self.state(),
            self.release_date.as_deref().unwrap_or("N/A")
        )
    }
}

/// Results page of a JQL search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Issues on this page.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Total number of matches reported by the tracker.
    #[serde(default)]
    pub total: usize,
    /// Page size used by the tracker.
    #[serde(default)]
    pub max_results: usize,
    /// Offset of this page.
    #[serde(default)]
    pub start_at: usize,
}

/// A tracker issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
    /// Stable issue key (e.g. `PROJ-123`).
    pub key: String,
    /// REST URL of the issue.
    #[serde(default, rename = "self")]
    pub self_url: String,
    /// Issue fields.
    #[serde(default)]
    pub fields: IssueFields,
}

/// Fields of an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Plain string or Atlassian Document Format object.
    #[serde(default)]
    pub description: serde_json::Value,
    /// Workflow status.
    #[serde(default)]
    pub status: Status,
    /// Priority, when set.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Issue type.
    #[serde(default, rename = "issuetype")]
    pub issue_type: IssueType,
    /// Assignee, when set.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Reporter, when set.
    #[serde(default)]
    pub reporter: Option<User>,
    /// Generic parent reference (subtasks, hierarchy-enabled types).
    #[serde(default)]
    pub parent: Option<IssueRef>,
    /// Dedicated epic link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<EpicLink>,
    /// References to subtasks.
    #[serde(default)]
    pub subtasks: Vec<IssueRef>,
    /// Labels (used as repository names).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Status name (e.g. "In Progress").
    #[serde(default)]
    pub name: String,
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
    /// Coarse category of the status.
    #[serde(default)]
    pub status_category: StatusCategory,
}

/// Status category: `new`, `indeterminate` or `done`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCategory {
    /// Category key.
    #[serde(default)]
    pub key: String,
    /// Category display name.
    #[serde(default)]
    pub name: String,
}

/// Issue priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    /// Priority name.
    #[serde(default)]
    pub name: String,
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
}

/// Issue type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueType {
    /// Free-text type name (e.g. "Story", "Sub-task").
    #[serde(default)]
    pub name: String,
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
    /// Whether issues of this type always nest under a parent.
    #[serde(default)]
    pub subtask: bool,
}

/// A tracker user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    #[serde(default)]
    pub account_id: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Email address, when visible.
    #[serde(default)]
    pub email_address: String,
}

/// Reference to another issue by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRef {
    /// Tracker identifier.
    #[serde(default)]
    pub id: String,
    /// Issue key.
    #[serde(default)]
    pub key: String,
}

impl IssueRef {
    /// Creates a reference to the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            key: key.into(),
        }
    }
}

/// Link to an epic through the dedicated epic field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpicLink {
    /// Epic key.
    #[serde(default)]
    pub key: String,
    /// Epic summary.
    #[serde(default)]
    pub summary: String,
}

impl Issue {
    /// Creates an issue with the given key and type name and empty fields.
    ///
    /// # Arguments
    ///
    /// * `key` - The issue key
    /// * `issue_type` - The verbatim type name
    pub fn new(key: impl Into<String>, issue_type: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            key: key.into(),
            self_url: String::new(),
            fields: IssueFields {
                issue_type: IssueType {
                    name: issue_type.into(),
                    ..IssueType::default()
                },
                ..IssueFields::default()
            },
        }
    }

    /// Creates a subtask of the given parent.
    pub fn subtask(key: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(key, "Sub-task")
            .into_subtask()
            .with_parent(parent)
    }

    /// Marks the issue type as a subtask type.
    #[must_use]
    pub fn into_subtask(mut self) -> Self {
        self.fields.issue_type.subtask = true;
        self
    }

    /// Sets the generic parent reference.
    #[must_use]
    pub fn with_parent(mut self, key: impl Into<String>) -> Self {
        self.fields.parent = Some(IssueRef::new(key));
        self
    }

    /// Sets the dedicated epic link.
    #[must_use]
    pub fn with_epic(mut self, key: impl Into<String>) -> Self {
        self.fields.epic = Some(EpicLink {
            key: key.into(),
            summary: String::new(),
        });
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.fields.summary = summary.into();
        self
    }

    /// Sets the status name and category key.
    #[must_use]
    pub fn with_status(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.fields.status.name = name.into();
        self.fields.status.status_category.key = category.into();
        self
    }

    /// Returns the issue key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the verbatim issue type name.
    pub fn issue_type_name(&self) -> &str {
        &self.fields.issue_type.name
    }

    /// Returns whether this issue must nest under a parent.
    pub fn is_subtask(&self) -> bool {
        self.fields.issue_type.subtask
    }

    /// Returns the generic parent reference.
    pub fn parent_ref(&self) -> Option<&IssueRef> {
        self.fields.parent.as_ref()
    }

    /// Returns the dedicated epic link.
    pub fn epic_ref(&self) -> Option<&EpicLink> {
        self.fields.epic.as_ref()
    }

    /// Returns whether this issue is an epic.
    ///
    /// The type name comparison is case-insensitive; the standalone grouping
    /// in [`crate::ReleaseHierarchy`] keeps the verbatim name instead.
    pub fn is_epic(&self) -> bool {
        !self.is_subtask() && self.issue_type_name().eq_ignore_ascii_case("epic")
    }

    /// Returns whether the issue's status category is `done`.
    pub fn is_completed(&self) -> bool {
        self.fields.status.status_category.key == "done"
    }

    /// Returns the assignee display name, or "Unassigned".
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|user| user.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Extracts the description as plain text.
    ///
    /// Plain string descriptions are returned as-is. For Atlassian Document
    /// Format objects the text nodes of each top-level block are collected,
    /// each followed by a single space.
    pub fn description_text(&self) -> String {
        use serde_json::Value;

        match &self.fields.description {
            Value::String(text) => text.clone(),
            Value::Object(doc) => {
                let Some(Value::Array(blocks)) = doc.get("content") else {
                    return String::new();
                };
                let mut text = String::new();
                for block in blocks {
                    let Some(Value::Array(nodes)) = block.get("content") else {
                        continue;
                    };
                    for node in nodes {
                        if let Some(Value::String(t)) = node.get("text") {
                            text.push_str(t);
                            text.push(' ');
                        }
                    }
                }
                text
            }
            _ => String::new(),
        }
    }
}
