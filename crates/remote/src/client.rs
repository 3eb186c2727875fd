//! HTTP client for one remote platform instance.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::error::RemoteApiError;

/// The remote API version all requests target.
pub const API_VERSION: u8 = 2;

/// Server-side message folders. The messages resource partitions results by
/// folder, so a full fetch pages through each folder in turn.
pub const MSG_FOLDERS: &[&str] = &["inbox", "flows", "archived", "outbox", "sent", "incoming"];

/// The `{next, results}` envelope every paginated endpoint returns.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    next: Option<String>,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Envelope returned by the definitions endpoint.
#[derive(Debug, Deserialize)]
struct DefinitionEnvelope {
    #[serde(default)]
    flows: Vec<serde_json::Value>,
}

/// HTTP client for a single remote instance.
pub struct RemoteClient {
    client: reqwest::Client,
    api_host: String,
    api_token: String,
}

impl RemoteClient {
    /// Create a new client.
    ///
    /// * `api_host` - normalized base URL, e.g. `https://app.example.com`.
    /// * `api_token` - full `Authorization` header value (`Token <value>`).
    pub fn new(api_host: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_host,
            api_token,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across concurrent migrations).
    pub fn with_client(client: reqwest::Client, api_host: String, api_token: String) -> Self {
        Self {
            client,
            api_host,
            api_token,
        }
    }

    /// Build the request URL for a resource, e.g.
    /// `https://app.example.com/api/v2/contacts.json`.
    pub fn request_url(&self, resource: &str) -> String {
        format!("{}/api/v{}/{}.json", self.api_host, API_VERSION, resource)
    }

    /// Start a lazy cursor walk from `start_url`.
    ///
    /// The returned [`Pages`] issues one GET per [`Pages::next`] call,
    /// following the envelope's `next` URL until it is absent. The sequence
    /// is finite and non-restartable.
    pub fn fetch_all(&self, start_url: String) -> Pages<'_> {
        Pages {
            client: self,
            next_url: Some(start_url),
        }
    }

    /// Fetch the dependency-free definition export for one flow.
    ///
    /// Returns the raw per-flow definition documents; callers decode each
    /// one individually so a malformed definition fails per-record.
    pub async fn fetch_flow_definition(
        &self,
        flow_uuid: &str,
    ) -> Result<Vec<serde_json::Value>, RemoteApiError> {
        let url = format!(
            "{}?flow={}&dependencies=none",
            self.request_url("definitions"),
            flow_uuid
        );
        let response = self.get(&url).send().await?;
        let envelope: DefinitionEnvelope = Self::parse_response(response).await?;
        Ok(envelope.flows)
    }

    /// Probe the org-info endpoint to verify the host is reachable and the
    /// token is accepted. Used at submission time, before any row is created.
    pub async fn check_reachable(&self) -> Result<(), RemoteApiError> {
        let response = self.get(&self.request_url("org")).send().await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(AUTHORIZATION, &self.api_token)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`RemoteApiError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RemoteApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), RemoteApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// A lazy walk over the pages of one paginated resource.
///
/// Each call to [`Pages::next`] performs one HTTP GET and yields that
/// page's `results`. Errors terminate the walk; there is no retry or
/// restart at this layer.
pub struct Pages<'a> {
    client: &'a RemoteClient,
    next_url: Option<String>,
}

impl Pages<'_> {
    /// Fetch the next page of results, or `None` when the cursor is
    /// exhausted.
    pub async fn next(&mut self) -> Result<Option<Vec<serde_json::Value>>, RemoteApiError> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        tracing::debug!(url = %url, "Fetching remote page");
        let response = self.client.get(&url).send().await?;
        let envelope: PageEnvelope = RemoteClient::parse_response(response).await?;

        self.next_url = envelope.next;
        Ok(Some(envelope.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_includes_version_and_json_suffix() {
        let client = RemoteClient::new(
            "https://app.example.com".to_string(),
            "Token abc".to_string(),
        );
        assert_eq!(
            client.request_url("contacts"),
            "https://app.example.com/api/v2/contacts.json"
        );
    }

    #[test]
    fn page_envelope_decodes_next_and_results() {
        let raw = r#"{
            "next": "https://app.example.com/api/v2/contacts.json?cursor=abc",
            "previous": null,
            "results": [{"uuid": "c1"}, {"uuid": "c2"}]
        }"#;
        let envelope: PageEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.next.is_some());
        assert_eq!(envelope.results.len(), 2);
    }

    #[test]
    fn last_page_has_no_next() {
        let raw = r#"{ "next": null, "results": [] }"#;
        let envelope: PageEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.next.is_none());
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn definition_envelope_defaults_to_empty_flows() {
        let envelope: DefinitionEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.flows.is_empty());
    }

    #[tokio::test]
    async fn exhausted_pages_stay_exhausted() {
        // A Pages with no next_url yields None without issuing a request.
        let client = RemoteClient::new("https://h".to_string(), "Token t".to_string());
        let mut pages = Pages {
            client: &client,
            next_url: None,
        };
        assert!(matches!(pages.next().await, Ok(None)));
    }
}
