use std::time::Duration;

use async_trait::async_trait;
use linker::{
    CommitRecord, CommitSha, CommitSource, HostError, PullRequestId, PullRequestUpdater,
    RepositoryId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PAGE_SIZE: usize = 100;
const ERROR_BODY_MAX_CHARS: usize = 800;

const OP_LIST_COMMITS: &str = "list pull request commits";
const OP_UPDATE_PULL_REQUEST: &str = "update pull request";

/// Errors constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubClientError {
    #[error("invalid github authorization header")]
    InvalidToken,

    #[error("failed to create github api client")]
    Build(#[source] reqwest::Error),
}

/// Settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// REST API root, e.g. [`DEFAULT_API_URL`] or a GHES `/api/v3` URL.
    pub api_base: String,
    /// Token sent as a bearer credential; requests are anonymous without one.
    pub token: Option<String>,
    pub repository: RepositoryId,
    pub request_timeout: Duration,
}

/// GitHub REST client for one repository.
///
/// Requests are made once; failures are reported to the caller and never
/// retried here.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    repository: RepositoryId,
}

#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
}

impl GithubClient {
    pub fn new(config: GithubClientConfig) -> Result<Self, GithubClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("pr-issue-linker"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = config.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GithubClientError::InvalidToken)?;
            auth.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, auth);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout.max(Duration::from_millis(1)))
            .build()
            .map_err(GithubClientError::Build)?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repository: config.repository,
        })
    }

    fn pull_request_url(&self, pull_request: PullRequestId) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base,
            self.repository.owner(),
            self.repository.name(),
            pull_request
        )
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, HostError> {
        let response = request.send().await.map_err(|error| HostError::Transport {
            operation: operation.to_string(),
            message: error.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(HostError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            body: truncate_for_error(&body, ERROR_BODY_MAX_CHARS),
        })
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, HostError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|error| HostError::Decode {
                operation: operation.to_string(),
                message: error.to_string(),
            })
    }
}

#[async_trait]
impl CommitSource for GithubClient {
    async fn list_commits(
        &self,
        pull_request: PullRequestId,
    ) -> Result<Vec<CommitRecord>, HostError> {
        let url = format!("{}/commits", self.pull_request_url(pull_request));
        let per_page = PAGE_SIZE.to_string();
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let chunk: Vec<CommitPayload> = self
                .request_json(
                    OP_LIST_COMMITS,
                    self.http
                        .get(&url)
                        .query(&[("per_page", per_page.as_str()), ("page", page_value.as_str())]),
                )
                .await?;
            let chunk_len = chunk.len();
            debug!(pull_request = %pull_request, page, commits = chunk_len, "fetched commit page");

            for payload in chunk {
                let sha = CommitSha::new(payload.sha).ok_or_else(|| HostError::Decode {
                    operation: OP_LIST_COMMITS.to_string(),
                    message: "commit without sha".to_string(),
                })?;
                rows.push(CommitRecord {
                    sha,
                    message: payload.commit.message,
                });
            }
            if chunk_len < PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }
}

#[async_trait]
impl PullRequestUpdater for GithubClient {
    async fn update_pull_request(
        &self,
        pull_request: PullRequestId,
        title: &str,
        body: &str,
    ) -> Result<(), HostError> {
        let payload = json!({ "title": title, "body": body });
        self.send(
            OP_UPDATE_PULL_REQUEST,
            self.http.patch(self.pull_request_url(pull_request)).json(&payload),
        )
        .await?;
        debug!(pull_request = %pull_request, "updated pull request");
        Ok(())
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
