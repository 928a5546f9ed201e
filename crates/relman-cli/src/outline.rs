// Rust guideline compliant 2026-02-06

//! Presentation order of a release hierarchy.
//!
//! The hierarchy maps carry no ordering across keys. The outline fixes one:
//! epics by natural key order, standalone groups by preferred type order,
//! and the subtasks whose parent was never shown collected at the end.

use relman_core::{Issue, ReleaseHierarchy};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Standalone types shown first, in this order.
pub const PREFERRED_TYPE_ORDER: [&str; 4] = ["Story", "Task", "Improvement", "Bug"];

/// An issue together with the subtasks filed under it.
#[derive(Debug, Clone, Copy)]
pub struct OutlineItem<'a> {
    /// The issue.
    pub issue: &'a Issue,
    /// Its subtasks, in input order.
    pub subtasks: &'a [Issue],
}

/// An epic with its children and the subtasks attached to it directly.
#[derive(Debug, Clone)]
pub struct EpicSection<'a> {
    /// The epic.
    pub epic: &'a Issue,
    /// Child issues, in input order.
    pub children: Vec<OutlineItem<'a>>,
    /// Subtasks whose parent is the epic itself.
    pub subtasks: &'a [Issue],
}

/// Standalone issues sharing one type name.
#[derive(Debug, Clone)]
pub struct TypeGroup<'a> {
    /// Verbatim type name.
    pub issue_type: &'a str,
    /// Issues of this type, in input order.
    pub items: Vec<OutlineItem<'a>>,
}

/// Counters over an outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutlineTotals {
    /// Number of epics.
    pub epics: usize,
    /// Issues nested under an epic.
    pub epic_children: usize,
    /// Issues not nested under any epic.
    pub standalone: usize,
    /// Subtasks shown under a visible parent.
    pub subtasks: usize,
    /// Subtasks whose parent is not part of the outline.
    pub orphaned: usize,
}

/// Ordered walk of a [`ReleaseHierarchy`].
#[derive(Debug, Clone)]
pub struct ReleaseOutline<'a> {
    /// Epic sections, by natural key order.
    pub epics: Vec<EpicSection<'a>>,
    /// Standalone groups, preferred types first.
    pub groups: Vec<TypeGroup<'a>>,
    /// Subtasks whose parent is not an epic, epic child, or standalone issue.
    pub orphaned: Vec<&'a Issue>,
}

impl<'a> ReleaseOutline<'a> {
    /// Walks the hierarchy once and fixes the presentation order.
    pub fn new(hierarchy: &'a ReleaseHierarchy) -> Self {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let item = |issue: &'a Issue, visited: &mut HashSet<&'a str>| {
            visited.insert(issue.key());
            OutlineItem {
                issue,
                subtasks: hierarchy.subtasks_of(issue.key()),
            }
        };

        let mut epic_keys: Vec<&'a String> = hierarchy.epics().keys().collect();
        epic_keys.sort_by(|a, b| natural_key_cmp(a, b));

        let mut epics = Vec::with_capacity(epic_keys.len());
        for key in epic_keys {
            let Some(epic) = hierarchy.epics().get(key) else {
                continue;
            };
            visited.insert(epic.key());
            let children = hierarchy
                .children_of(key)
                .iter()
                .map(|child| item(child, &mut visited))
                .collect();
            epics.push(EpicSection {
                epic,
                children,
                subtasks: hierarchy.subtasks_of(key),
            });
        }

        let mut type_names: Vec<&'a String> = hierarchy.standalone_issues().keys().collect();
        type_names.sort_by(|a, b| type_order_cmp(a, b));

        let mut groups = Vec::with_capacity(type_names.len());
        for name in type_names {
            let issues = &hierarchy.standalone_issues()[name];
            if issues.is_empty() {
                continue;
            }
            groups.push(TypeGroup {
                issue_type: name,
                items: issues.iter().map(|issue| item(issue, &mut visited)).collect(),
            });
        }

        let mut orphan_parents: Vec<&'a String> = hierarchy
            .subtask_map()
            .keys()
            .filter(|parent| !visited.contains(parent.as_str()))
            .collect();
        orphan_parents.sort_by(|a, b| natural_key_cmp(a, b));

        let orphaned = orphan_parents
            .into_iter()
            .flat_map(|parent| hierarchy.subtasks_of(parent).iter())
            .collect();

        Self {
            epics,
            groups,
            orphaned,
        }
    }

    /// Returns whether the outline shows nothing.
    pub fn is_empty(&self) -> bool {
        self.epics.is_empty() && self.groups.is_empty() && self.orphaned.is_empty()
    }

    /// Counts the issues in each part of the outline.
    pub fn totals(&self) -> OutlineTotals {
        let mut totals = OutlineTotals {
            epics: self.epics.len(),
            orphaned: self.orphaned.len(),
            ..OutlineTotals::default()
        };

        for section in &self.epics {
            totals.epic_children += section.children.len();
            totals.subtasks += section.subtasks.len();
            totals.subtasks += section
                .children
                .iter()
                .map(|child| child.subtasks.len())
                .sum::<usize>();
        }

        for group in &self.groups {
            totals.standalone += group.items.len();
            totals.subtasks += group
                .items
                .iter()
                .map(|item| item.subtasks.len())
                .sum::<usize>();
        }

        totals
    }
}

/// Splits `PROJ-12` into `("PROJ", Some(12))`.
fn split_key(key: &str) -> (&str, Option<u64>) {
    match key.rsplit_once('-') {
        Some((prefix, number)) => match number.parse() {
            Ok(number) => (prefix, Some(number)),
            Err(_) => (key, None),
        },
        None => (key, None),
    }
}

/// Orders issue keys by project prefix, then by numeric suffix.
///
/// `PROJ-9` sorts before `PROJ-10`. Keys without a numeric suffix fall back
/// to plain string order.
pub fn natural_key_cmp(a: &str, b: &str) -> Ordering {
    match (split_key(a), split_key(b)) {
        ((prefix_a, Some(n_a)), (prefix_b, Some(n_b))) => prefix_a
            .cmp(prefix_b)
            .then(n_a.cmp(&n_b))
            .then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Orders type names: preferred types first, the rest alphabetically.
fn type_order_cmp(a: &str, b: &str) -> Ordering {
    let rank = |name: &str| {
        PREFERRED_TYPE_ORDER
            .iter()
            .position(|preferred| *preferred == name)
            .unwrap_or(PREFERRED_TYPE_ORDER.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|issue| issue.key().to_string()).collect()
    }

    #[test]
    fn test_natural_key_order() {
        let mut keys = vec!["PROJ-10", "PROJ-9", "ABC-100", "PROJ-1"];
        keys.sort_by(|a, b| natural_key_cmp(a, b));
        assert_eq!(keys, vec!["ABC-100", "PROJ-1", "PROJ-9", "PROJ-10"]);
    }

    #[test]
    fn test_natural_key_without_number() {
        assert_eq!(natural_key_cmp("misc", "PROJ-1"), "misc".cmp("PROJ-1"));
    }

    #[test]
    fn test_type_order() {
        let mut names = vec!["Spike", "Bug", "Chore", "Story", "Improvement", "Task"];
        names.sort_by(|a, b| type_order_cmp(a, b));
        assert_eq!(
            names,
            vec!["Story", "Task", "Improvement", "Bug", "Chore", "Spike"]
        );
    }

    #[test]
    fn test_outline_orders_epics_and_groups() {
        let hierarchy = ReleaseHierarchy::build(vec![
            Issue::new("PROJ-10", "Epic"),
            Issue::new("PROJ-2", "Epic"),
            Issue::new("PROJ-3", "Bug"),
            Issue::new("PROJ-4", "Story"),
            Issue::new("PROJ-5", "Story").with_epic("PROJ-10"),
        ]);

        let outline = ReleaseOutline::new(&hierarchy);

        let epic_keys: Vec<&str> = outline.epics.iter().map(|s| s.epic.key()).collect();
        assert_eq!(epic_keys, vec!["PROJ-2", "PROJ-10"]);
        assert_eq!(outline.epics[1].children[0].issue.key(), "PROJ-5");

        let types: Vec<&str> = outline.groups.iter().map(|g| g.issue_type).collect();
        assert_eq!(types, vec!["Story", "Bug"]);
    }

    #[test]
    fn test_orphans_are_unvisited_subtasks() {
        let hierarchy = ReleaseHierarchy::build(vec![
            Issue::new("PROJ-1", "Task"),
            Issue::subtask("PROJ-2", "PROJ-1"),
            Issue::subtask("PROJ-3", "PROJ-99"),
            Issue::subtask("PROJ-4", "PROJ-50"),
            Issue::subtask("PROJ-5", "PROJ-99"),
        ]);

        let outline = ReleaseOutline::new(&hierarchy);

        assert_eq!(keys(&outline.orphaned), vec!["PROJ-4", "PROJ-3", "PROJ-5"]);
        assert_eq!(
            outline.totals(),
            OutlineTotals {
                epics: 0,
                epic_children: 0,
                standalone: 1,
                subtasks: 1,
                orphaned: 3,
            }
        );
    }

    #[test]
    fn test_epic_subtasks_are_not_orphans() {
        let hierarchy = ReleaseHierarchy::build(vec![
            Issue::new("PROJ-1", "Epic"),
            Issue::subtask("PROJ-2", "PROJ-1"),
        ]);

        let outline = ReleaseOutline::new(&hierarchy);

        assert!(outline.orphaned.is_empty());
        assert_eq!(outline.epics[0].subtasks.len(), 1);
        assert_eq!(outline.totals().subtasks, 1);
    }

    #[test]
    fn test_empty_outline() {
        let hierarchy = ReleaseHierarchy::default();
        let outline = ReleaseOutline::new(&hierarchy);
        assert!(outline.is_empty());
        assert_eq!(outline.totals(), OutlineTotals::default());
    }
}
