// Rust guideline compliant 2026-02-06

//! Progress reporting for the tracker round-trips of a command.

use relman_jira::FetchStats;

/// Reports fetch steps on stderr.
pub struct ProgressReporter {
    label: String,
    enabled: bool,
}

impl ProgressReporter {
    /// Creates a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `label` - Label prefixed to every message, usually the project key
    /// * `enabled` - Whether messages are printed at all
    pub fn new(label: &str, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            enabled,
        }
    }

    /// Reports the start of a step.
    pub fn step(&self, message: &str) {
        if self.enabled {
            eprintln!("{}: {}...", self.label, message);
        }
    }

    /// Reports how a release snapshot was assembled.
    pub fn finish_fetch(&self, stats: &FetchStats) {
        if self.enabled {
            eprintln!("{}: {}", self.label, describe_fetch(stats));
        }
    }
}

/// Summarizes fetch counters in one line.
pub fn describe_fetch(stats: &FetchStats) -> String {
    let mut message = format!("{} issues found", stats.found);
    if stats.subtasks > 0 {
        message.push_str(&format!(", {} subtasks added", stats.subtasks));
    }
    if stats.epic_stories > 0 {
        message.push_str(&format!(", {} epic stories added", stats.epic_stories));
    }
    message
}
