// Rust guideline compliant 2026-02-06

//! Rendering of release outlines.
//!
//! The console tree is the `next-release` report; the changelog renderers
//! turn the same outline into Markdown, Teams, Slack, HTML or JSON.

mod changelog;
mod tree;

pub use changelog::{
    create_renderer, release_date, Changelog, ChangelogRenderer, HtmlRenderer, JsonRenderer,
    MarkdownRenderer, SlackRenderer, TeamsRenderer,
};
pub use tree::{render_tree, TreeOptions};

/// Picks an icon from a status name.
///
/// Matching is case-insensitive and by substring, checked in order: done,
/// progress, review, open, blocked.
pub fn status_icon(status: &str) -> &'static str {
    let status = status.to_lowercase();
    let has = |needle: &str| status.contains(needle);

    if has("done") || has("closed") || has("resolved") {
        "✅"
    } else if has("progress") {
        "🔄"
    } else if has("review") {
        "👀"
    } else if has("todo") || has("open") {
        "📋"
    } else if has("blocked") {
        "🚫"
    } else {
        "•"
    }
}

/// Returns the changelog emoji of a standalone type.
pub fn type_emoji(issue_type: &str) -> &'static str {
    match issue_type {
        "Story" => "✨",
        "Task" => "📝",
        "Improvement" => "🔧",
        "Bug" => "🐛",
        _ => "•",
    }
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes the three characters Slack mrkdwn reserves.
pub fn escape_slack(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icons() {
        assert_eq!(status_icon("Done"), "✅");
        assert_eq!(status_icon("Resolved"), "✅");
        assert_eq!(status_icon("In Progress"), "🔄");
        assert_eq!(status_icon("Code Review"), "👀");
        assert_eq!(status_icon("To Do"), "•");
        assert_eq!(status_icon("TODO"), "📋");
        assert_eq!(status_icon("Reopened"), "📋");
        assert_eq!(status_icon("Blocked"), "🚫");
        assert_eq!(status_icon("Backlog"), "•");
    }

    #[test]
    fn test_type_emoji_is_case_sensitive() {
        assert_eq!(type_emoji("Bug"), "🐛");
        assert_eq!(type_emoji("bug"), "•");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_slack() {
        assert_eq!(escape_slack("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }
}
