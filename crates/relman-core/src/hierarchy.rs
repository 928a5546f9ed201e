// Rust guideline compliant 2026-02-06

//! Release hierarchy reconstruction.
//!
//! Turns the flat issue collection of a release into epics, epic children,
//! standalone issues grouped by type, and subtasks grouped by parent key.
//! Construction runs as two sequential stages over an owned input:
//! [`identify`] files subtasks and epics and defers everything else, then
//! [`resolve`] attaches each deferred issue to an epic of this release or
//! files it as standalone.
//!
//! Orphaned subtasks (whose parent is not part of the classified release)
//! are not stored here; consumers derive them by walking the hierarchy and
//! collecting the subtasks they did not visit.

use crate::Issue;
use std::collections::HashMap;
use tracing::debug;

/// How a non-subtask issue was attached to an epic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Via the dedicated epic link field.
    EpicLink(&'a str),
    /// Via the generic parent field, which points at a known epic.
    Parent(&'a str),
}

impl<'a> Resolution<'a> {
    /// Returns the candidate epic key.
    pub fn epic_key(&self) -> &'a str {
        match self {
            Resolution::EpicLink(key) | Resolution::Parent(key) => key,
        }
    }
}

/// Determines the candidate epic of a non-subtask issue.
///
/// A non-empty epic link always wins. Otherwise a non-empty parent key is
/// used only when it names one of the `epics` of this release, so a story
/// whose parent is another story is not mistaken for an epic child.
///
/// The returned candidate from the epic link may still be absent from
/// `epics`; callers must check membership before attaching.
///
/// # Arguments
///
/// * `issue` - The issue to resolve
/// * `epics` - Epics identified in this release, keyed by issue key
///
/// # Returns
///
/// The candidate epic and the field it came from, or `None`.
pub fn resolve_epic<'a>(
    issue: &'a Issue,
    epics: &HashMap<String, Issue>,
) -> Option<Resolution<'a>> {
    if let Some(epic) = issue.epic_ref().filter(|epic| !epic.key.is_empty()) {
        return Some(Resolution::EpicLink(&epic.key));
    }

    issue
        .parent_ref()
        .filter(|parent| !parent.key.is_empty() && epics.contains_key(&parent.key))
        .map(|parent| Resolution::Parent(&parent.key))
}

/// Hierarchical view of the issues in one release.
///
/// Built once per invocation and read by exactly one renderer. Every list
/// preserves input order; iteration order of the map keys is unspecified.
#[derive(Debug, Clone, Default)]
pub struct ReleaseHierarchy {
    epics: HashMap<String, Issue>,
    epic_children: HashMap<String, Vec<Issue>>,
    standalone_issues: HashMap<String, Vec<Issue>>,
    subtask_map: HashMap<String, Vec<Issue>>,
}

/// Output of the first stage: atomic classes plus the deferred issues.
#[derive(Debug, Default)]
struct Identified {
    epics: HashMap<String, Issue>,
    subtask_map: HashMap<String, Vec<Issue>>,
    deferred: Vec<Issue>,
}

impl ReleaseHierarchy {
    /// Builds the hierarchy from a flat issue collection.
    ///
    /// Never fails. Subtasks without a parent reference are dropped; an epic
    /// key seen twice keeps the later issue.
    ///
    /// # Arguments
    ///
    /// * `issues` - The release's issues, in source order
    ///
    /// # Returns
    ///
    /// The classified hierarchy.
    pub fn build(issues: Vec<Issue>) -> Self {
        let hierarchy = resolve(identify(issues));

        debug!(
            epics = hierarchy.epics.len(),
            epic_children = hierarchy.epic_children.values().map(Vec::len).sum::<usize>(),
            standalone = hierarchy.standalone_issues.values().map(Vec::len).sum::<usize>(),
            subtasks = hierarchy.subtask_map.values().map(Vec::len).sum::<usize>(),
            "hierarchy built"
        );

        hierarchy
    }

    /// Epics of the release, keyed by issue key.
    pub fn epics(&self) -> &HashMap<String, Issue> {
        &self.epics
    }

    /// Non-subtask issues attached to each epic, keyed by epic key.
    pub fn epic_children(&self) -> &HashMap<String, Vec<Issue>> {
        &self.epic_children
    }

    /// Non-subtask issues without an epic in this release, keyed by the
    /// verbatim issue type name.
    pub fn standalone_issues(&self) -> &HashMap<String, Vec<Issue>> {
        &self.standalone_issues
    }

    /// Subtasks keyed by their parent's key. The parent may be absent from
    /// the release.
    pub fn subtask_map(&self) -> &HashMap<String, Vec<Issue>> {
        &self.subtask_map
    }

    /// Children of the given epic, empty when it has none.
    pub fn children_of(&self, epic_key: &str) -> &[Issue] {
        self.epic_children
            .get(epic_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Subtasks of the given parent, empty when it has none.
    pub fn subtasks_of(&self, parent_key: &str) -> &[Issue] {
        self.subtask_map
            .get(parent_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns whether all four mappings are empty.
    pub fn is_empty(&self) -> bool {
        self.epics.is_empty()
            && self.epic_children.is_empty()
            && self.standalone_issues.is_empty()
            && self.subtask_map.is_empty()
    }
}

/// First stage: files subtasks by parent and epics by key, defers the rest.
fn identify(issues: Vec<Issue>) -> Identified {
    let mut identified = Identified::default();

    for issue in issues {
        if issue.is_subtask() {
            match issue.parent_ref().map(|parent| parent.key.clone()) {
                Some(parent_key) => {
                    debug!(key = %issue.key, parent = %parent_key, "subtask filed under parent");
                    identified
                        .subtask_map
                        .entry(parent_key)
                        .or_default()
                        .push(issue);
                }
                None => debug!(key = %issue.key, "subtask without parent dropped"),
            }
        } else if issue.is_epic() {
            debug!(key = %issue.key, "epic detected");
            identified.epics.insert(issue.key.clone(), issue);
        } else {
            identified.deferred.push(issue);
        }
    }

    identified
}

/// Second stage: attaches deferred issues to epics or files them as standalone.
fn resolve(identified: Identified) -> ReleaseHierarchy {
    let Identified {
        epics,
        subtask_map,
        deferred,
    } = identified;

    let mut epic_children: HashMap<String, Vec<Issue>> = HashMap::new();
    let mut standalone_issues: HashMap<String, Vec<Issue>> = HashMap::new();

    for issue in deferred {
        let target = match resolve_epic(&issue, &epics) {
            Some(resolution) if epics.contains_key(resolution.epic_key()) => {
                match resolution {
                    Resolution::EpicLink(epic) => {
                        debug!(key = %issue.key, epic, "epic resolved via epic link")
                    }
                    Resolution::Parent(epic) => {
                        debug!(key = %issue.key, epic, "epic resolved via parent")
                    }
                }
                Some(resolution.epic_key().to_string())
            }
            Some(resolution) => {
                debug!(
                    key = %issue.key,
                    epic = resolution.epic_key(),
                    "epic not in release, filing as standalone"
                );
                None
            }
            None => None,
        };

        match target {
            Some(epic_key) => epic_children.entry(epic_key).or_default().push(issue),
            None => {
                debug!(key = %issue.key, issue_type = issue.issue_type_name(), "standalone issue");
                standalone_issues
                    .entry(issue.issue_type_name().to_string())
                    .or_default()
                    .push(issue);
            }
        }
    }

    ReleaseHierarchy {
        epics,
        epic_children,
        standalone_issues,
        subtask_map,
    }
}
