//! HTTP client for the Hugging Face Hub API
//!
//! Covers the two endpoints setup needs: token introspection
//! (`GET /api/whoami-v2`) and repository creation (`POST /api/repos/create`).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::HubConfig;
use crate::error::{Error, Result};

use super::repo::{RepoId, RepoKind};

/// Response from GET /api/whoami-v2
#[derive(Debug, Deserialize)]
pub struct WhoAmI {
    /// Account name the token belongs to
    pub name: String,
    /// Account type (user, org)
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

/// Response from POST /api/repos/create
#[derive(Debug, Deserialize)]
struct CreateRepoResponse {
    url: String,
}

/// Request body for POST /api/repos/create
#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    organization: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<RepoKind>,
}

/// HTTP client for the Hub API
pub struct HubClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Create a new client authenticated with `token`
    pub fn new(config: &HubConfig, token: &str) -> Result<Self> {
        config.validate()?;

        let base_url = config.endpoint.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Config(format!("invalid token: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Resolve the account behind the token
    pub async fn whoami(&self) -> Result<WhoAmI> {
        let url = format!("{}/api/whoami-v2", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Hub(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::Hub(format!("failed to parse response: {}", e)))
        } else {
            Err(api_error(status, response).await)
        }
    }

    /// Create a repository
    ///
    /// With `exist_ok`, a repository that already exists is returned as if
    /// it had just been created. Returns the repository URL.
    pub async fn create_repo(&self, repo_id: &RepoId, kind: RepoKind, exist_ok: bool) -> Result<String> {
        let url = format!("{}/api/repos/create", self.base_url);

        // The Hub treats an absent type as a model repository
        let request_body = CreateRepoRequest {
            name: &repo_id.name,
            organization: &repo_id.namespace,
            kind: match kind {
                RepoKind::Model => None,
                other => Some(other),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Hub(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            let result: CreateRepoResponse = response
                .json()
                .await
                .map_err(|e| Error::Hub(format!("failed to parse response: {}", e)))?;
            Ok(result.url)
        } else if status == StatusCode::CONFLICT && exist_ok {
            tracing::debug!(repo_id = %repo_id, "Repository already exists");
            Ok(repo_id.url(&self.base_url, kind))
        } else {
            Err(api_error(status, response).await)
        }
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> Error {
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown".to_string());
    Error::Hub(format!("API error ({}): {}", status, error_text))
}

/// Blocking wrapper around [`HubClient`]
///
/// Owns a current-thread runtime so synchronous callers can drive the
/// async client.
pub struct BlockingHubClient {
    inner: HubClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingHubClient {
    pub fn new(config: &HubConfig, token: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Hub(format!("failed to create runtime: {}", e)))?;

        Ok(Self {
            inner: HubClient::new(config, token)?,
            runtime,
        })
    }

    /// Resolve the account behind the token (blocking)
    pub fn whoami(&self) -> Result<WhoAmI> {
        self.runtime.block_on(self.inner.whoami())
    }

    /// Create a repository (blocking)
    pub fn create_repo(&self, repo_id: &RepoId, kind: RepoKind, exist_ok: bool) -> Result<String> {
        self.runtime
            .block_on(self.inner.create_repo(repo_id, kind, exist_ok))
    }
}
