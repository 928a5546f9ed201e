// Rust guideline compliant 2026-02-06

//! Tests for the debug events emitted while building a hierarchy.
//!
//! Events are captured with a thread-local fmt subscriber writing into a
//! shared buffer.

use relman_core::{Issue, ReleaseHierarchy};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Builds the hierarchy under a capturing subscriber and returns the log.
fn build_logged(issues: Vec<Issue>, max_level: Level) -> (ReleaseHierarchy, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let hierarchy = tracing::subscriber::with_default(subscriber, || {
        ReleaseHierarchy::build(issues)
    });

    (hierarchy, buffer.contents())
}

fn release_issues() -> Vec<Issue> {
    vec![
        Issue::new("EPIC-1", "Epic"),
        Issue::new("STORY-1", "Story").with_epic("EPIC-1"),
        Issue::subtask("SUB-1", "STORY-1"),
        Issue::new("STORY-2", "Story").with_parent("EPIC-1"),
        Issue::new("STORY-3", "Story").with_epic("EPIC-99"),
        Issue::new("SUB-9", "Sub-task").into_subtask(),
        Issue::new("BUG-1", "Bug"),
    ]
}

#[test]
fn test_every_decision_is_logged() {
    let (hierarchy, log) = build_logged(release_issues(), Level::DEBUG);

    assert!(log.contains("epic detected"), "log was:\n{}", log);
    assert!(log.contains("subtask filed under parent"));
    assert!(log.contains("subtask without parent dropped"));
    assert!(log.contains("epic resolved via epic link"));
    assert!(log.contains("epic resolved via parent"));
    assert!(log.contains("epic not in release, filing as standalone"));
    assert!(log.contains("standalone issue"));
    assert!(log.contains("hierarchy built"));

    assert_eq!(hierarchy.children_of("EPIC-1").len(), 2);
    assert_eq!(hierarchy.standalone_issues()["Story"].len(), 1);
}

#[test]
fn test_log_lines_name_the_issue() {
    let (_, log) = build_logged(release_issues(), Level::DEBUG);

    let dropped = log
        .lines()
        .find(|line| line.contains("subtask without parent dropped"))
        .unwrap();
    assert!(dropped.contains("SUB-9"));

    let outside = log
        .lines()
        .find(|line| line.contains("epic not in release"))
        .unwrap();
    assert!(outside.contains("STORY-3"));
    assert!(outside.contains("EPIC-99"));
}

#[test]
fn test_quiet_above_debug_level() {
    let (quiet, log) = build_logged(release_issues(), Level::INFO);
    let (verbose, _) = build_logged(release_issues(), Level::DEBUG);

    assert!(log.is_empty(), "unexpected output:\n{}", log);
    assert_eq!(
        quiet.standalone_issues().len(),
        verbose.standalone_issues().len()
    );
    assert_eq!(quiet.subtask_map().len(), verbose.subtask_map().len());
}
