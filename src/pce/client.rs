//! Illumio PCE API client implementation.
//!
//! This module binds [`PolicyEngine`] to the PCE REST API (`/api/v2`). Each
//! call is a single request; nothing is retried.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::config::PceSettings;
use crate::error::{PceError, Result};

use super::engine::PolicyEngine;
use super::types::{ChangeSet, IpList, IpListSpec, ProvisionRequest};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Illumio PCE API client.
#[derive(Clone)]
pub struct PceClient {
    /// HTTP client.
    client: Client,
    /// API root, e.g. `https://pce.example.com:8443/api/v2`.
    base_url: String,
    /// Organization ID.
    org_id: u32,
    /// API key username.
    api_key: String,
    /// API key secret.
    api_secret: String,
}

impl std::fmt::Debug for PceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PceClient")
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<REDACTED>")
            .finish_non_exhaustive()
    }
}

impl PceClient {
    /// Creates a client for the PCE described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: &PceSettings) -> Result<Self> {
        Self::with_base_url(settings, settings.api_base_url())
    }

    /// Creates a client against an explicit API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_base_url(settings: &PceSettings, base_url: impl Into<String>) -> Result<Self> {
        if !settings.verify_tls {
            warn!("Warning: SSL verification disabled");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|e| PceError::Connection {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            org_id: settings.org_id,
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
        })
    }

    /// Returns the organization this client acts on.
    #[must_use]
    pub const fn org_id(&self) -> u32 {
        self.org_id
    }

    /// Path of the draft IP list collection.
    fn ip_lists_url(&self) -> String {
        format!("{}/orgs/{}/sec_policy/draft/ip_lists", self.base_url, self.org_id)
    }

    /// URL of an object addressed by href.
    fn href_url(&self, href: &str) -> String {
        format!("{}{href}", self.base_url)
    }

    /// Starts an authenticated request.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        trace!("{method} {url}");
        self.client
            .request(method, url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .header(header::ACCEPT, "application/json")
    }

    /// Starts an authenticated request carrying a JSON body.
    fn request_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, url).json(body)
    }

    /// Sends a request and decodes the body, if there is one.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| PceError::network(format!("Request failed: {e}")))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PceError::AuthenticationFailed {
                status: status.as_u16(),
            }
            .into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PceError::api_error(status.as_u16(), body).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| PceError::network(format!("Failed to read response: {e}")))?;

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| PceError::invalid_response(format!("Failed to parse response: {e}")).into())
    }

    /// Sends a request whose response must carry a body.
    async fn execute_required<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        self.execute(request)
            .await?
            .ok_or_else(|| PceError::invalid_response(format!("No {what} in response")).into())
    }
}

#[async_trait]
impl PolicyEngine for PceClient {
    async fn search_ip_lists(&self, name: &str) -> Result<Vec<IpList>> {
        let request = self
            .request(Method::GET, &self.ip_lists_url())
            .query(&[("name", name)]);

        let lists: Vec<IpList> = self.execute(request).await?.unwrap_or_default();
        debug!("Search for '{name}' returned {} IP list(s)", lists.len());
        Ok(lists)
    }

    async fn create_ip_list(&self, spec: &IpListSpec) -> Result<IpList> {
        let request = self.request_with_body(Method::POST, &self.ip_lists_url(), spec);
        self.execute_required(request, "IP list").await
    }

    async fn update_ip_list(&self, href: &str, spec: &IpListSpec) -> Result<Option<IpList>> {
        let request = self.request_with_body(Method::PUT, &self.href_url(href), spec);
        self.execute(request).await
    }

    async fn get_ip_list(&self, href: &str) -> Result<IpList> {
        let request = self.request(Method::GET, &self.href_url(href));
        self.execute_required(request, "IP list").await
    }

    async fn provision(&self, request: &ProvisionRequest) -> Result<ChangeSet> {
        let url = format!("{}/orgs/{}/sec_policy", self.base_url, self.org_id);
        let request = self.request_with_body(Method::POST, &url, request);
        self.execute_required(request, "policy version").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::feed::RangeSet;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// `api_123:s3cret`, base64 encoded.
    const BASIC_AUTH: &str = "Basic YXBpXzEyMzpzM2NyZXQ=";

    const LIST_HREF: &str = "/orgs/1/sec_policy/draft/ip_lists/42";

    fn settings() -> PceSettings {
        PceSettings {
            host: String::from("pce.example.com"),
            port: 8443,
            org_id: 1,
            org_id_defaulted: false,
            api_key: String::from("api_123"),
            api_secret: String::from("s3cret"),
            verify_tls: true,
        }
    }

    fn client_for(server: &MockServer) -> PceClient {
        PceClient::with_base_url(&settings(), format!("{}/api/v2", server.uri()))
            .expect("client builds")
    }

    fn list_json(ranges: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "href": LIST_HREF,
            "name": "Zscaler IPs",
            "description": "Zscaler IP ranges - Auto-updated",
            "ip_ranges": ranges.iter().map(|r| serde_json::json!({ "from_ip": r })).collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn test_search_sends_name_and_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/orgs/1/sec_policy/draft/ip_lists"))
            .and(query_param("name", "Zscaler IPs"))
            .and(header("authorization", BASIC_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                list_json(&["1.1.1.0/24"])
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let lists = client_for(&server)
            .search_ip_lists("Zscaler IPs")
            .await
            .expect("search succeeds");

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].href, LIST_HREF);
        assert_eq!(lists[0].range_values().as_slice(), ["1.1.1.0/24"]);
    }

    #[tokio::test]
    async fn test_search_with_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/orgs/1/sec_policy/draft/ip_lists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let lists = client_for(&server)
            .search_ip_lists("Zscaler IPs")
            .await
            .expect("search succeeds");

        assert!(lists.is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_spec() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/orgs/1/sec_policy/draft/ip_lists"))
            .and(body_json(serde_json::json!({
                "name": "Zscaler IPs",
                "description": "Zscaler IP ranges - Auto-updated",
                "ip_ranges": [{ "from_ip": "4.4.4.0/24" }]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(list_json(&["4.4.4.0/24"])))
            .expect(1)
            .mount(&server)
            .await;

        let ranges: RangeSet = ["4.4.4.0/24"].into_iter().collect();
        let created = client_for(&server)
            .create_ip_list(&IpListSpec::new("Zscaler IPs", &ranges))
            .await
            .expect("create succeeds");

        assert_eq!(created.href, LIST_HREF);
    }

    #[tokio::test]
    async fn test_update_with_no_content_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/v2{LIST_HREF}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let ranges: RangeSet = ["3.3.3.0/24"].into_iter().collect();
        let updated = client_for(&server)
            .update_ip_list(LIST_HREF, &IpListSpec::new("Zscaler IPs", &ranges))
            .await
            .expect("update succeeds");

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_get_by_href() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v2{LIST_HREF}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&["3.3.3.0/24"])))
            .mount(&server)
            .await;

        let list = client_for(&server)
            .get_ip_list(LIST_HREF)
            .await
            .expect("get succeeds");

        assert_eq!(list.range_values().as_slice(), ["3.3.3.0/24"]);
    }

    #[tokio::test]
    async fn test_provision_posts_change_subset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/orgs/1/sec_policy"))
            .and(body_json(serde_json::json!({
                "update_description": format!("Provision Zscaler IPList: {LIST_HREF}"),
                "change_subset": { "ip_lists": [{ "href": LIST_HREF }] }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "href": "/orgs/1/sec_policy/57",
                "version": 57,
                "workloads_affected": 12
            })))
            .expect(1)
            .mount(&server)
            .await;

        let change_set = client_for(&server)
            .provision(&ProvisionRequest::for_ip_list(LIST_HREF))
            .await
            .expect("provision succeeds");

        assert_eq!(change_set.version_text(), "57");
        assert_eq!(change_set.workloads_affected_text(), "12");
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_ip_list(LIST_HREF)
            .await
            .expect_err("401 fails");

        assert!(matches!(
            err,
            SyncError::Pce(PceError::AuthenticationFailed { status: 401 })
        ));
    }

    #[tokio::test]
    async fn test_error_status_carries_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(406).set_body_string(r#"[{"token":"invalid_ip_range"}]"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ranges: RangeSet = ["not-a-range"].into_iter().collect();
        let err = client_for(&server)
            .update_ip_list(LIST_HREF, &IpListSpec::new("Zscaler IPs", &ranges))
            .await
            .expect_err("406 fails");

        match err {
            SyncError::Pce(PceError::ApiRequestFailed { status, message }) => {
                assert_eq!(status, 406);
                assert!(message.contains("invalid_ip_range"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_without_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_ip_list(LIST_HREF)
            .await
            .expect_err("empty body fails");

        assert!(matches!(err, SyncError::Pce(PceError::InvalidResponse { .. })));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = PceClient::new(&settings()).expect("client builds");
        let debug = format!("{client:?}");

        assert!(debug.contains("https://pce.example.com:8443/api/v2"));
        assert!(!debug.contains("s3cret"));
    }
}
