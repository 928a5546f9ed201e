// Rust guideline compliant 2026-02-09

//! Blocking HTTP client for the Jira REST API.

use crate::{JiraError, Result};
use relman_core::Credentials;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Request timeout for every tracker call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the browser URL of an issue on the tracker at `base_url`.
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", base_url, key)
}

/// Authenticated client for one tracker instance.
///
/// Every request carries basic auth built from the configured user name and
/// API token and asks for JSON.
pub struct JiraClient {
    http: Client,
    credentials: Credentials,
}

impl JiraClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Base URL (without trailing slash), user name and token
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("relman/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, credentials })
    }

    /// Returns the tracker base URL.
    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    /// Sends a GET request and decodes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path below the base URL, starting with `/`
    /// * `query` - Query parameters, URL-encoded by the client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent
    /// - The tracker answers with a non-2xx status
    /// - The body is not the expected JSON
    pub fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url(), endpoint);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_token))
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(JiraError::status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| JiraError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}
