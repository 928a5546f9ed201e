// Rust guideline compliant 2026-02-06

//! Console tree of a release.

use super::status_icon;
use crate::outline::ReleaseOutline;
use relman_core::{Issue, Version};

/// Options of the console tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeOptions {
    /// Adds status, assignee and priority lines.
    pub detailed: bool,
    /// Width of the separator lines.
    pub width: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            detailed: false,
            width: 80,
        }
    }
}

/// Renders the outline as an indented tree with status icons.
pub fn render_tree(version: &Version, outline: &ReleaseOutline<'_>, options: &TreeOptions) -> String {
    let heavy = "━".repeat(options.width);
    let light = "─".repeat(options.width);
    let mut output = String::new();

    output.push_str(&format!("{}\n", heavy));
    output.push_str(&format!("  ISSUES PLANNED FOR VERSION '{}'\n", version.name));
    output.push_str("  (Completed issues excluded)\n");
    output.push_str(&format!("{}\n\n", heavy));

    if !outline.epics.is_empty() {
        push_section(&mut output, "EPIC", outline.epics.len(), &light);
        for section in &outline.epics {
            push_issue(&mut output, section.epic, 0, options.detailed);
            for child in &section.children {
                push_issue(&mut output, child.issue, 1, options.detailed);
                for subtask in child.subtasks {
                    push_issue(&mut output, subtask, 2, options.detailed);
                }
            }
            for subtask in section.subtasks {
                push_issue(&mut output, subtask, 1, options.detailed);
            }
            output.push('\n');
        }
    }

    for group in &outline.groups {
        push_section(
            &mut output,
            &group.issue_type.to_uppercase(),
            group.items.len(),
            &light,
        );
        for item in &group.items {
            push_issue(&mut output, item.issue, 0, options.detailed);
            for subtask in item.subtasks {
                push_issue(&mut output, subtask, 1, options.detailed);
            }
            output.push('\n');
        }
    }

    if !outline.orphaned.is_empty() {
        output.push_str(&format!(
            "📌 ADDITIONAL SUB-TASKS ({})\n",
            outline.orphaned.len()
        ));
        output.push_str("  (In the release, but the parent is not in the release or is completed)\n");
        output.push_str(&format!("{}\n", light));
        for subtask in &outline.orphaned {
            push_issue(&mut output, subtask, 0, options.detailed);
            output.push('\n');
        }
    }

    let totals = outline.totals();
    let subtasks = totals.subtasks + totals.orphaned;
    output.push_str(&format!("{}\n", heavy));
    if totals.epics > 0 {
        output.push_str(&format!(
            "  TOTAL: {} epics with {} child issues, {} standalone issues, {} subtasks\n",
            totals.epics, totals.epic_children, totals.standalone, subtasks
        ));
    } else {
        output.push_str(&format!(
            "  TOTAL: {} issues, {} subtasks\n",
            totals.standalone, subtasks
        ));
    }
    output.push_str(&format!("{}\n", heavy));

    output
}

fn push_section(output: &mut String, title: &str, count: usize, rule: &str) {
    output.push_str(&format!("📌 {} ({})\n", title, count));
    output.push_str(&format!("{}\n", rule));
}

/// Writes one issue line plus its detail line(s) at the given depth (0-2).
fn push_issue(output: &mut String, issue: &Issue, depth: usize, detailed: bool) {
    let (indent, branch, detail_indent) = match depth {
        0 => ("", "", "   "),
        1 => ("  ", "├─ ", "│  "),
        _ => ("    ", "│  ├─ ", "    │  "),
    };
    let status = &issue.fields.status.name;

    output.push_str(&format!(
        "{}{}{} [{}] {}\n",
        indent,
        branch,
        status_icon(status),
        issue.key(),
        issue.fields.summary
    ));

    if detailed {
        output.push_str(&format!(
            "{}    Status: {} | Assignee: {}\n",
            detail_indent,
            status,
            issue.assignee_name()
        ));
        if let Some(priority) = &issue.fields.priority {
            output.push_str(&format!("{}    Priority: {}\n", detail_indent, priority.name));
        }
    } else {
        output.push_str(&format!(
            "{}    {} - {}\n",
            detail_indent,
            status,
            issue.assignee_name()
        ));
    }
}
