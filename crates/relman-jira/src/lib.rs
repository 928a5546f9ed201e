// Rust guideline compliant 2026-02-09

//! Issue source backed by the Jira REST API.
//!
//! This crate fetches release versions and the issues bound to a version,
//! including the subtasks and epic stories the release search leaves out,
//! and hands them to the hierarchy builder as a flat snapshot.

pub mod client;
pub mod error;
pub mod service;

pub use client::{browse_url, JiraClient};
pub use error::{JiraError, Result};
pub use service::{
    epic_stories_jql, find_version, next_release_version, quote_jql, release_jql, FetchStats,
    IssueSource, JiraService, ReleaseIssues,
};
