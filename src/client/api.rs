//! Core HTTP client for GitLab API

use chrono::Local;
use compact_str::{format_compact, CompactString, ToCompactString};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};
use crate::{
    domain::{BranchDto, MergeRequestDto, NewBranch, NewMergeRequest, NewTag, PipelineDto, TagDto},
    id::MergeRequestIid,
};

/// Pure HTTP client for GitLab API
///
/// Each method issues exactly one request against
/// `{base_url}/projects/{project_id}/...` and reports any non-2xx answer as a
/// [`ClientError`].
#[derive(Debug, Clone)]
pub struct GitlabApi {
    client: Client,
    config: ClientConfig,
}

/// GitLab API error response formats
#[derive(Debug, Deserialize)]
struct GitlabApiError {
    message: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GitlabApiError2 {
    error: CompactString,
    error_description: Option<CompactString>,
}

impl GitlabApi {
    /// Create a new GitLab API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    // Branches

    #[instrument(skip(self))]
    pub async fn list_branches(&self) -> Result<Vec<BranchDto>> {
        let url = self.url("repository/branches");
        self.send_json(self.request(Method::GET, &url)).await
    }

    #[instrument(skip(self))]
    pub async fn get_branch(&self, name: &str) -> Result<BranchDto> {
        let url = self.url(&format_compact!("repository/branches/{}", encode(name)));
        self.send_json(self.request(Method::GET, &url)).await
    }

    #[instrument(skip(self, branch), fields(branch = %branch.branch, from = %branch.from))]
    pub async fn create_branch(&self, branch: &NewBranch) -> Result<BranchDto> {
        let url = self.url("repository/branches");
        self.send_json(self.request(Method::POST, &url).form(branch))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_branch(&self, name: &str) -> Result<()> {
        let url = self.url(&format_compact!("repository/branches/{}", encode(name)));
        self.send_empty(self.request(Method::DELETE, &url)).await
    }

    // Tags

    #[instrument(skip(self, tag), fields(tag = %tag.tag_name, on = %tag.on))]
    pub async fn create_tag(&self, tag: &NewTag) -> Result<TagDto> {
        let url = self.url("repository/tags");
        self.send_json(self.request(Method::POST, &url).form(tag))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, name: &str) -> Result<()> {
        let url = self.url(&format_compact!("repository/tags/{}", encode(name)));
        self.send_empty(self.request(Method::DELETE, &url)).await
    }

    // Merge requests

    #[instrument(skip(self, merge_request), fields(
        source_branch = %merge_request.source_branch,
        target_branch = %merge_request.target_branch,
    ))]
    pub async fn create_merge_request(
        &self,
        merge_request: &NewMergeRequest,
    ) -> Result<MergeRequestDto> {
        let url = self.url("merge_requests");
        self.send_json(self.request(Method::POST, &url).form(merge_request))
            .await
    }

    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn delete_merge_request(&self, iid: MergeRequestIid) -> Result<()> {
        let url = self.url(&format_compact!("merge_requests/{}", iid));
        self.send_empty(self.request(Method::DELETE, &url)).await
    }

    /// Accept (merge) a merge request
    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn merge(&self, iid: MergeRequestIid) -> Result<MergeRequestDto> {
        let url = self.url(&format_compact!("merge_requests/{}/merge", iid));
        self.send_json(self.request(Method::PUT, &url)).await
    }

    // Pipelines

    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn list_pipelines_by_merge_request(
        &self,
        iid: MergeRequestIid,
    ) -> Result<Vec<PipelineDto>> {
        let url = self.url(&format_compact!("merge_requests/{}/pipelines", iid));
        self.send_json(self.request(Method::GET, &url)).await
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Private helper methods

    fn url(&self, path: &str) -> CompactString {
        format_compact!("{}/{}", self.config.project_url(), path)
    }

    /// Create authenticated request builder
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("PRIVATE-TOKEN", self.config.private_token.as_str())
    }

    /// Send request and deserialize the JSON response
    async fn send_json<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = request.send().await?;
        let (url_path, body) = self.read_response(response).await?;

        serde_json::from_str(&body).map_err(|e| ClientError::json_parse(url_path, e))
    }

    /// Send request whose success body carries nothing of interest
    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        self.read_response(response).await.map(|_| ())
    }

    /// Read the body, failing with the GitLab-provided message on non-2xx
    async fn read_response(&self, response: Response) -> Result<(String, String)> {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;

        if self.config.debug.log_responses {
            self.log_response_to_file(&url_path, &body);
        }

        if status.is_success() {
            debug!(status = status.as_u16(), path = %url_path, "Request succeeded");
            Ok((url_path, body))
        } else {
            Err(ClientError::from_status(status.as_u16(), error_message(status, &body)))
        }
    }

    /// Log HTTP response to file for debugging
    fn log_response_to_file(&self, path: &str, body: &str) {
        if let Some(log_dir) = &self.config.debug.log_directory {
            if !log_dir.exists() {
                if let Err(e) = std::fs::create_dir_all(log_dir) {
                    warn!("Failed to create log directory: {}", e);
                    return;
                }
            }

            let filename = format!(
                "{}_{}.json",
                Local::now().format("%Y-%m-%d_%H-%M-%S"),
                path.replace('/', "_")
            );

            let log_path = log_dir.join(filename);

            if let Err(e) = std::fs::write(&log_path, body) {
                warn!("Failed to write response log to {:?}: {}", log_path, e);
            } else {
                debug!("Response logged to {:?}", log_path);
            }
        }
    }
}

/// Single path segment, so `feature/login` stays one segment
fn encode(segment: &str) -> CompactString {
    urlencoding::encode(segment).to_compact_string()
}

/// Message to report for a failed response: the body's `message`, then its
/// `error`/`error_description`, then the reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &str) -> CompactString {
    if let Ok(api_error) = serde_json::from_str::<GitlabApiError>(body) {
        match api_error.message {
            serde_json::Value::String(message) => return message.into(),
            serde_json::Value::Null => {},
            other => return other.to_compact_string(),
        }
    }

    if let Ok(api_error) = serde_json::from_str::<GitlabApiError2>(body) {
        return match api_error.error_description {
            Some(description) => format_compact!("{}: {}", api_error.error, description),
            None => api_error.error,
        };
    }

    match status.canonical_reason() {
        Some(reason) => reason.into(),
        None => format_compact!("HTTP {}", status.as_u16()),
    }
}
