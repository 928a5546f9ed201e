// Rust guideline compliant 2026-02-06

//! Configuration management for relman.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment variable holding the tracker base URL.
pub const ENV_JIRA_URL: &str = "JIRA_URL";
/// Environment variable holding the tracker user name.
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";
/// Environment variable holding the tracker API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable holding the default project key.
pub const ENV_PROJECT: &str = "RELMAN_PROJECT";
/// Environment variable holding the search page size.
pub const ENV_MAX_RESULTS: &str = "RELMAN_MAX_RESULTS";
/// Environment variable holding the default changelog format.
pub const ENV_CHANGELOG_FORMAT: &str = "RELMAN_CHANGELOG_FORMAT";

/// Largest page size the search endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Output format of the `changelog` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogFormat {
    /// GitHub-flavoured Markdown.
    #[default]
    #[serde(alias = "md")]
    Markdown,
    /// Markdown subset understood by Microsoft Teams.
    Teams,
    /// Slack mrkdwn.
    Slack,
    /// HTML fragment.
    Html,
    /// JSON dump of the release outline.
    Json,
}

impl FromStr for ChangelogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ChangelogFormat::Markdown),
            "teams" => Ok(ChangelogFormat::Teams),
            "slack" => Ok(ChangelogFormat::Slack),
            "html" => Ok(ChangelogFormat::Html),
            "json" => Ok(ChangelogFormat::Json),
            _ => Err(Error::InvalidConfig(format!(
                "changelog format must be markdown, teams, slack, html or json, got {}",
                value
            ))),
        }
    }
}

impl fmt::Display for ChangelogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangelogFormat::Markdown => "markdown",
            ChangelogFormat::Teams => "teams",
            ChangelogFormat::Slack => "slack",
            ChangelogFormat::Html => "html",
            ChangelogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Validated tracker credentials.
#[derive(Clone)]
pub struct Credentials {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// User name for basic auth.
    pub username: String,
    /// API token for basic auth.
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}

/// Configuration for relman behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tracker base URL (e.g. `https://example.atlassian.net`).
    #[serde(default)]
    pub jira_url: Option<String>,

    /// Tracker user name.
    #[serde(default)]
    pub jira_username: Option<String>,

    /// Tracker API token.
    #[serde(default)]
    pub jira_api_token: Option<String>,

    /// Project key used when `--project` is not given.
    #[serde(default)]
    pub project: Option<String>,

    /// Page size for issue searches (1-100).
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Default format of the `changelog` command.
    #[serde(default)]
    pub changelog_format: ChangelogFormat,
}

/// Default search page size.
fn default_max_results() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jira_url: None,
            jira_username: None,
            jira_api_token: None,
            project: None,
            max_results: default_max_results(),
            changelog_format: ChangelogFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. TOML configuration file at `path`, when it exists
    /// 3. Environment variables (`JIRA_*`, `RELMAN_*`)
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            config = toml::from_str(&content).map_err(|e| {
                Error::InvalidConfig(format!("{}: {}", path.display(), e))
            })?;
        }

        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or enumerated value cannot be parsed.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(ENV_JIRA_URL) {
            self.jira_url = Some(val);
        }

        if let Ok(val) = std::env::var(ENV_JIRA_USERNAME) {
            self.jira_username = Some(val);
        }

        if let Ok(val) = std::env::var(ENV_JIRA_API_TOKEN) {
            self.jira_api_token = Some(val);
        }

        if let Ok(val) = std::env::var(ENV_PROJECT) {
            self.project = Some(val);
        }

        if let Ok(val) = std::env::var(ENV_MAX_RESULTS) {
            self.max_results = val.parse().map_err(|_| {
                Error::InvalidConfig(format!("{} must be a number 1-100", ENV_MAX_RESULTS))
            })?;
        }

        if let Ok(val) = std::env::var(ENV_CHANGELOG_FORMAT) {
            self.changelog_format = val.parse()?;
        }

        Ok(())
    }

    /// Trims whitespace, drops empty values and the URL's trailing slash.
    fn normalize(&mut self) {
        for value in [
            &mut self.jira_url,
            &mut self.jira_username,
            &mut self.jira_api_token,
            &mut self.project,
        ] {
            *value = value
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }

        if let Some(url) = self.jira_url.as_mut() {
            while url.ends_with('/') {
                url.pop();
            }
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - max_results is outside 1-100
    /// - jira_url does not use http or https
    fn validate(&self) -> Result<()> {
        if self.max_results == 0 || self.max_results > MAX_PAGE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "max_results must be 1-{}, got {}",
                MAX_PAGE_SIZE, self.max_results
            )));
        }

        if let Some(url) = &self.jira_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(Error::InvalidConfig(format!(
                    "jira_url must start with http:// or https://, got {}",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Returns the tracker credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] naming every unset variable.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.jira_url, &self.jira_username, &self.jira_api_token) {
            (Some(url), Some(username), Some(token)) => Ok(Credentials {
                base_url: url.clone(),
                username: username.clone(),
                api_token: token.clone(),
            }),
            _ => {
                let missing = [
                    (ENV_JIRA_URL, self.jira_url.is_none()),
                    (ENV_JIRA_USERNAME, self.jira_username.is_none()),
                    (ENV_JIRA_API_TOKEN, self.jira_api_token.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name.to_string())
                .collect();
                Err(Error::MissingCredentials(missing))
            }
        }
    }
}
