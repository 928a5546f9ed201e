// Rust guideline compliant 2026-02-06

//! Changelog renderers.
//!
//! Markdown, Teams, Slack and HTML share one walk over the outline and differ
//! only in their [`Markup`]. JSON serializes the same walk.

use super::{escape_html, escape_slack, type_emoji};
use crate::outline::{OutlineItem, OutlineTotals, ReleaseOutline};
use chrono::Local;
use relman_core::{ChangelogFormat, Issue, Version};
use serde::Serialize;
use serde_json::json;

const EPICS_HEADING: &str = "🎯 Epics";
const ORPHANS_HEADING: &str = "📎 Additional Sub-tasks";
const ORPHANS_NOTE: &str = "Issues in this version whose parent is not in the release or is completed";

/// Returns the version's release date, or today's date when it has none.
pub fn release_date(version: &Version) -> String {
    match version.release_date.as_deref() {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => Local::now().format("%Y-%m-%d").to_string(),
    }
}

/// Everything a renderer needs to produce a changelog.
pub struct Changelog<'a> {
    /// The released version.
    pub version: &'a Version,
    /// Presentation order of the release's issues.
    pub outline: &'a ReleaseOutline<'a>,
    /// Tracker base URL used for issue links.
    pub base_url: &'a str,
    /// Whether subtasks and orphaned subtasks are listed.
    pub include_subtasks: bool,
    /// Date printed in the header.
    pub release_date: String,
}

impl<'a> Changelog<'a> {
    /// Creates a changelog dated with [`release_date`].
    pub fn new(
        version: &'a Version,
        outline: &'a ReleaseOutline<'a>,
        base_url: &'a str,
        include_subtasks: bool,
    ) -> Self {
        Self {
            version,
            outline,
            base_url,
            include_subtasks,
            release_date: release_date(version),
        }
    }

    fn browse_url(&self, key: &str) -> String {
        relman_jira::browse_url(self.base_url, key)
    }

    fn link(&self, issue: &'a Issue) -> Link<'a> {
        Link {
            key: issue.key(),
            url: self.browse_url(issue.key()),
            summary: &issue.fields.summary,
        }
    }

    fn entry(&self, item: &OutlineItem<'a>) -> Entry<'a> {
        let subtasks = if self.include_subtasks {
            item.subtasks.iter().map(|subtask| self.link(subtask)).collect()
        } else {
            Vec::new()
        };
        Entry {
            link: self.link(item.issue),
            strong: true,
            subtasks,
        }
    }

    fn plain_entry(&self, issue: &'a Issue) -> Entry<'a> {
        Entry {
            link: self.link(issue),
            strong: false,
            subtasks: Vec::new(),
        }
    }
}

/// Changelog output format.
pub trait ChangelogRenderer {
    /// Renders the complete changelog document.
    fn render(&self, changelog: &Changelog<'_>) -> String;
}

/// Factory function to create the renderer of a format.
pub fn create_renderer(format: ChangelogFormat) -> Box<dyn ChangelogRenderer> {
    match format {
        ChangelogFormat::Markdown => Box::new(MarkdownRenderer),
        ChangelogFormat::Teams => Box::new(TeamsRenderer),
        ChangelogFormat::Slack => Box::new(SlackRenderer),
        ChangelogFormat::Html => Box::new(HtmlRenderer),
        ChangelogFormat::Json => Box::new(JsonRenderer),
    }
}

struct Link<'a> {
    key: &'a str,
    url: String,
    summary: &'a str,
}

struct Entry<'a> {
    link: Link<'a>,
    strong: bool,
    subtasks: Vec<Link<'a>>,
}

/// Syntax of a text changelog format.
trait Markup {
    fn title(&self, out: &mut String, changelog: &Changelog<'_>);
    fn heading(&self, out: &mut String, text: &str);
    fn epic(&self, out: &mut String, link: &Link<'_>);
    fn note(&self, out: &mut String, text: &str);
    fn list(&self, out: &mut String, entries: &[Entry<'_>]);
}

fn render_markup<M: Markup>(markup: &M, changelog: &Changelog<'_>) -> String {
    let outline = changelog.outline;
    let mut out = String::new();

    markup.title(&mut out, changelog);

    if !outline.epics.is_empty() {
        markup.heading(&mut out, EPICS_HEADING);
        for section in &outline.epics {
            markup.epic(&mut out, &changelog.link(section.epic));

            let mut entries: Vec<Entry<'_>> = section
                .children
                .iter()
                .map(|child| changelog.entry(child))
                .collect();
            if changelog.include_subtasks {
                entries.extend(section.subtasks.iter().map(|s| changelog.plain_entry(s)));
            }
            if !entries.is_empty() {
                markup.list(&mut out, &entries);
            }
        }
    }

    for group in &outline.groups {
        markup.heading(
            &mut out,
            &format!("{} {}", type_emoji(group.issue_type), group.issue_type),
        );
        let entries: Vec<Entry<'_>> = group.items.iter().map(|item| changelog.entry(item)).collect();
        markup.list(&mut out, &entries);
    }

    if changelog.include_subtasks && !outline.orphaned.is_empty() {
        markup.heading(&mut out, ORPHANS_HEADING);
        markup.note(&mut out, ORPHANS_NOTE);
        let entries: Vec<Entry<'_>> = outline
            .orphaned
            .iter()
            .copied()
            .map(|subtask| changelog.plain_entry(subtask))
            .collect();
        markup.list(&mut out, &entries);
    }

    out
}

/// GitHub-flavoured Markdown.
pub struct MarkdownRenderer;

impl Markup for MarkdownRenderer {
    fn title(&self, out: &mut String, changelog: &Changelog<'_>) {
        out.push_str(&format!(
            "# 📋 Changelog - Version {}\n\n",
            changelog.version.name
        ));
        out.push_str(&format!("**Release date**: {}\n\n", changelog.release_date));
        if !changelog.version.description.is_empty() {
            out.push_str(&format!(
                "**Description**: {}\n\n",
                changelog.version.description
            ));
        }
        out.push_str("---\n\n");
    }

    fn heading(&self, out: &mut String, text: &str) {
        out.push_str(&format!("## {}\n\n", text));
    }

    fn epic(&self, out: &mut String, link: &Link<'_>) {
        out.push_str(&format!(
            "### **[{}]({})** {}\n\n",
            link.key, link.url, link.summary
        ));
    }

    fn note(&self, out: &mut String, text: &str) {
        out.push_str(&format!("*({})*\n\n", text));
    }

    fn list(&self, out: &mut String, entries: &[Entry<'_>]) {
        for entry in entries {
            let Link { key, url, summary } = &entry.link;
            if entry.strong {
                out.push_str(&format!("- **[{}]({})**: {}\n", key, url, summary));
            } else {
                out.push_str(&format!("- [{}]({}): {}\n", key, url, summary));
            }
            for subtask in &entry.subtasks {
                out.push_str(&format!(
                    "  - [{}]({}): {}\n",
                    subtask.key, subtask.url, subtask.summary
                ));
            }
        }
        out.push('\n');
    }
}

impl ChangelogRenderer for MarkdownRenderer {
    fn render(&self, changelog: &Changelog<'_>) -> String {
        render_markup(self, changelog)
    }
}

/// Markdown subset accepted by Microsoft Teams messages.
pub struct TeamsRenderer;

impl Markup for TeamsRenderer {
    fn title(&self, out: &mut String, changelog: &Changelog<'_>) {
        out.push_str(&format!(
            "**📋 Changelog - Version {}**\n\n",
            changelog.version.name
        ));
        out.push_str(&format!("**Release date**: {}\n\n", changelog.release_date));
        if !changelog.version.description.is_empty() {
            out.push_str(&format!(
                "**Description**: {}\n\n",
                changelog.version.description
            ));
        }
        out.push_str("---\n\n");
    }

    fn heading(&self, out: &mut String, text: &str) {
        out.push_str(&format!("**{}**\n\n", text));
    }

    fn epic(&self, out: &mut String, link: &Link<'_>) {
        out.push_str(&format!(
            "**[{}]({})** {}\n\n",
            link.key, link.url, link.summary
        ));
    }

    fn note(&self, out: &mut String, text: &str) {
        out.push_str(&format!("*({})*\n\n", text));
    }

    fn list(&self, out: &mut String, entries: &[Entry<'_>]) {
        for entry in entries {
            let Link { key, url, summary } = &entry.link;
            if entry.strong {
                out.push_str(&format!("* **[{}]({})**: {}\n", key, url, summary));
            } else {
                out.push_str(&format!("* [{}]({}): {}\n", key, url, summary));
            }
            for subtask in &entry.subtasks {
                out.push_str(&format!(
                    "  * [{}]({}): {}\n",
                    subtask.key, subtask.url, subtask.summary
                ));
            }
        }
        out.push('\n');
    }
}

impl ChangelogRenderer for TeamsRenderer {
    fn render(&self, changelog: &Changelog<'_>) -> String {
        render_markup(self, changelog)
    }
}

/// Slack mrkdwn, ready to paste into a message.
pub struct SlackRenderer;

impl Markup for SlackRenderer {
    fn title(&self, out: &mut String, changelog: &Changelog<'_>) {
        out.push_str(&format!(
            "*📋 Changelog - Version {}*\n\n",
            escape_slack(&changelog.version.name)
        ));
        out.push_str(&format!("*Release date*: {}\n\n", changelog.release_date));
        if !changelog.version.description.is_empty() {
            out.push_str(&format!(
                "*Description*: {}\n\n",
                escape_slack(&changelog.version.description)
            ));
        }
    }

    fn heading(&self, out: &mut String, text: &str) {
        out.push_str(&format!("*{}*\n\n", escape_slack(text)));
    }

    fn epic(&self, out: &mut String, link: &Link<'_>) {
        out.push_str(&format!(
            "*<{}|{}>* {}\n\n",
            link.url,
            link.key,
            escape_slack(link.summary)
        ));
    }

    fn note(&self, out: &mut String, text: &str) {
        out.push_str(&format!("_({})_\n\n", escape_slack(text)));
    }

    fn list(&self, out: &mut String, entries: &[Entry<'_>]) {
        for entry in entries {
            let Link { key, url, summary } = &entry.link;
            if entry.strong {
                out.push_str(&format!("• *<{}|{}>*: {}\n", url, key, escape_slack(summary)));
            } else {
                out.push_str(&format!("• <{}|{}>: {}\n", url, key, escape_slack(summary)));
            }
            for subtask in &entry.subtasks {
                out.push_str(&format!(
                    "    ◦ <{}|{}>: {}\n",
                    subtask.url,
                    subtask.key,
                    escape_slack(subtask.summary)
                ));
            }
        }
        out.push('\n');
    }
}

impl ChangelogRenderer for SlackRenderer {
    fn render(&self, changelog: &Changelog<'_>) -> String {
        render_markup(self, changelog)
    }
}

/// Self-contained HTML fragment.
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn anchor(link: &Link<'_>) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&link.url),
            escape_html(link.key)
        )
    }
}

impl Markup for HtmlRenderer {
    fn title(&self, out: &mut String, changelog: &Changelog<'_>) {
        out.push_str(&format!(
            "<h1>📋 Changelog - Version {}</h1>\n",
            escape_html(&changelog.version.name)
        ));
        out.push_str(&format!(
            "<p><strong>Release date</strong>: {}</p>\n",
            escape_html(&changelog.release_date)
        ));
        if !changelog.version.description.is_empty() {
            out.push_str(&format!(
                "<p><strong>Description</strong>: {}</p>\n",
                escape_html(&changelog.version.description)
            ));
        }
        out.push_str("<hr>\n");
    }

    fn heading(&self, out: &mut String, text: &str) {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(text)));
    }

    fn epic(&self, out: &mut String, link: &Link<'_>) {
        out.push_str(&format!(
            "<h3>{} {}</h3>\n",
            Self::anchor(link),
            escape_html(link.summary)
        ));
    }

    fn note(&self, out: &mut String, text: &str) {
        out.push_str(&format!("<p><em>({})</em></p>\n", escape_html(text)));
    }

    fn list(&self, out: &mut String, entries: &[Entry<'_>]) {
        out.push_str("<ul>\n");
        for entry in entries {
            let anchor = Self::anchor(&entry.link);
            let summary = escape_html(entry.link.summary);
            if entry.strong {
                out.push_str(&format!("<li><strong>{}</strong>: {}", anchor, summary));
            } else {
                out.push_str(&format!("<li>{}: {}", anchor, summary));
            }
            if !entry.subtasks.is_empty() {
                out.push_str("\n<ul>\n");
                for subtask in &entry.subtasks {
                    out.push_str(&format!(
                        "<li>{}: {}</li>\n",
                        Self::anchor(subtask),
                        escape_html(subtask.summary)
                    ));
                }
                out.push_str("</ul>\n");
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }
}

impl ChangelogRenderer for HtmlRenderer {
    fn render(&self, changelog: &Changelog<'_>) -> String {
        render_markup(self, changelog)
    }
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    key: &'a str,
    summary: &'a str,
    issue_type: &'a str,
    status: &'a str,
    assignee: &'a str,
    url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct JsonEpic<'a> {
    #[serde(flatten)]
    epic: JsonIssue<'a>,
    children: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    issue_type: &'a str,
    issues: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct JsonChangelog<'a> {
    version: &'a str,
    release_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    epics: Vec<JsonEpic<'a>>,
    groups: Vec<JsonGroup<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    orphaned_subtasks: Vec<JsonIssue<'a>>,
    totals: OutlineTotals,
}

/// Pretty-printed JSON document of the outline.
pub struct JsonRenderer;

impl JsonRenderer {
    fn issue<'a>(
        changelog: &Changelog<'a>,
        issue: &'a Issue,
        subtasks: &'a [Issue],
    ) -> JsonIssue<'a> {
        let subtasks = if changelog.include_subtasks {
            subtasks
                .iter()
                .map(|subtask| Self::issue(changelog, subtask, &[]))
                .collect()
        } else {
            Vec::new()
        };
        JsonIssue {
            key: issue.key(),
            summary: &issue.fields.summary,
            issue_type: issue.issue_type_name(),
            status: &issue.fields.status.name,
            assignee: issue.assignee_name(),
            url: changelog.browse_url(issue.key()),
            subtasks,
        }
    }
}

impl ChangelogRenderer for JsonRenderer {
    fn render(&self, changelog: &Changelog<'_>) -> String {
        let outline = changelog.outline;
        let description = changelog.version.description.as_str();

        let document = JsonChangelog {
            version: &changelog.version.name,
            release_date: &changelog.release_date,
            description: (!description.is_empty()).then_some(description),
            epics: outline
                .epics
                .iter()
                .map(|section| JsonEpic {
                    epic: Self::issue(changelog, section.epic, section.subtasks),
                    children: section
                        .children
                        .iter()
                        .map(|child| Self::issue(changelog, child.issue, child.subtasks))
                        .collect(),
                })
                .collect(),
            groups: outline
                .groups
                .iter()
                .map(|group| JsonGroup {
                    issue_type: group.issue_type,
                    issues: group
                        .items
                        .iter()
                        .map(|item| Self::issue(changelog, item.issue, item.subtasks))
                        .collect(),
                })
                .collect(),
            orphaned_subtasks: if changelog.include_subtasks {
                outline
                    .orphaned
                    .iter()
                    .copied()
                    .map(|subtask| Self::issue(changelog, subtask, &[]))
                    .collect()
            } else {
                Vec::new()
            },
            totals: outline.totals(),
        };

        serde_json::to_string_pretty(&document)
            .unwrap_or_else(|err| json!({ "error": err.to_string() }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relman_core::ReleaseHierarchy;

    #[test]
    fn test_release_date_prefers_version_date() {
        let mut version = Version::new("1.0");
        version.release_date = Some("2026-03-01".to_string());
        assert_eq!(release_date(&version), "2026-03-01");
    }

    #[test]
    fn test_release_date_defaults_to_today() {
        let mut version = Version::new("1.0");
        version.release_date = Some(String::new());
        assert_eq!(
            release_date(&version),
            Local::now().format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_subtasks_hidden_by_default() {
        let hierarchy = ReleaseHierarchy::build(vec![
            Issue::new("PROJ-1", "Task").with_summary("Parent"),
            Issue::subtask("PROJ-2", "PROJ-1").with_summary("Child"),
            Issue::subtask("PROJ-3", "PROJ-9").with_summary("Stray"),
        ]);
        let outline = ReleaseOutline::new(&hierarchy);
        let version = Version::new("1.0");
        let changelog = Changelog::new(&version, &outline, "https://jira.test", false);

        let output = MarkdownRenderer.render(&changelog);

        assert!(output.contains("- **[PROJ-1](https://jira.test/browse/PROJ-1)**: Parent\n"));
        assert!(!output.contains("PROJ-2"));
        assert!(!output.contains(ORPHANS_HEADING));
    }

    #[test]
    fn test_create_renderer_matches_format() {
        let hierarchy = ReleaseHierarchy::build(vec![Issue::new("PROJ-1", "Bug")]);
        let outline = ReleaseOutline::new(&hierarchy);
        let version = Version::new("1.0");
        let changelog = Changelog::new(&version, &outline, "https://jira.test", false);

        let html = create_renderer(ChangelogFormat::Html).render(&changelog);
        assert!(html.starts_with("<h1>"));

        let slack = create_renderer(ChangelogFormat::Slack).render(&changelog);
        assert!(slack.contains("<https://jira.test/browse/PROJ-1|PROJ-1>"));
    }
}
