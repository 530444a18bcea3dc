//! High-level GitLab operations with failure reporting
//!
//! Failures are logged and turned into an empty result; `merge` is the one
//! operation that hands its failure back to the caller.

use std::sync::Arc;

use tracing::{error, info, instrument};

use super::{
    api::GitlabApi,
    config::ClientConfig,
    error::{MergeError, Result},
};
use crate::{
    domain::{
        BranchDto, CreatedMergeRequest, MergeRequestDto, NewBranch, NewMergeRequest, NewTag,
        PipelineDto, TagDto,
    },
    id::MergeRequestIid,
};

/// High-level service for GitLab operations
#[derive(Debug, Clone)]
pub struct GitlabService {
    api: Arc<GitlabApi>,
}

impl GitlabService {
    /// Create a new GitLab service
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = Arc::new(GitlabApi::new(config)?);
        Ok(Self { api })
    }

    /// Create service from existing API client
    pub fn from_api(api: Arc<GitlabApi>) -> Self {
        Self { api }
    }

    /// Branches of the project; empty when the request fails
    #[instrument(skip(self))]
    pub async fn list_branches(&self) -> Vec<BranchDto> {
        match self.api.list_branches().await {
            Ok(branches) => branches,
            Err(e) => {
                error!(error = %e, "Unable to list branches: {}", e.message());
                Vec::new()
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn get_branch(&self, name: &str) -> Option<BranchDto> {
        match self.api.get_branch(name).await {
            Ok(branch) => Some(branch),
            Err(e) => {
                error!(
                    branch = name,
                    status = ?e.status(),
                    "Unable to get branch {}: {}", name, e.message()
                );
                None
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn create_branch(&self, name: &str, from: &str) -> Option<BranchDto> {
        match self.api.create_branch(&NewBranch::new(name, from)).await {
            Ok(branch) => {
                info!(branch = %branch.name, from, "Created branch: {}", branch.name);
                Some(branch)
            },
            Err(e) => {
                error!(
                    branch = name,
                    status = ?e.status(),
                    "Unable to create branch {}: {}", name, e.message()
                );
                None
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_branch(&self, name: &str) -> bool {
        match self.api.delete_branch(name).await {
            Ok(()) => {
                info!(branch = name, "Deleted branch: {}", name);
                true
            },
            Err(e) => {
                error!(
                    branch = name,
                    status = ?e.status(),
                    "Unable to delete branch {}: {}", name, e.message()
                );
                false
            },
        }
    }

    /// Tag `on` (a branch, tag or commit) with an "Automated release" message
    #[instrument(skip(self))]
    pub async fn create_tag(&self, name: &str, on: &str) -> Option<TagDto> {
        match self.api.create_tag(&NewTag::release(name, on)).await {
            Ok(tag) => {
                info!(tag = %tag.name, on, "Created tag: {}", tag.name);
                Some(tag)
            },
            Err(e) => {
                error!(
                    tag = name,
                    status = ?e.status(),
                    "Unable to create tag {}: {}", name, e.message()
                );
                None
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, name: &str) -> bool {
        match self.api.delete_tag(name).await {
            Ok(()) => {
                info!(tag = name, "Deleted tag: {}", name);
                true
            },
            Err(e) => {
                error!(
                    tag = name,
                    status = ?e.status(),
                    "Unable to delete tag {}: {}", name, e.message()
                );
                false
            },
        }
    }

    #[instrument(skip(self, merge_request), fields(
        source_branch = %merge_request.source_branch,
        target_branch = %merge_request.target_branch,
    ))]
    pub async fn create_merge_request(
        &self,
        merge_request: &NewMergeRequest,
    ) -> Option<CreatedMergeRequest> {
        match self.api.create_merge_request(merge_request).await {
            Ok(created) => {
                info!(
                    merge_request_iid = %created.iid,
                    "Created merge request: {} - {}", created.iid, created.title
                );
                Some(created.created())
            },
            Err(e) => {
                error!(status = ?e.status(), "Unable to create merge request: {}", e.message());
                None
            },
        }
    }

    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn delete_merge_request(&self, iid: MergeRequestIid) -> bool {
        match self.api.delete_merge_request(iid).await {
            Ok(()) => {
                info!("Deleted merge request: {}", iid);
                true
            },
            Err(e) => {
                error!(
                    status = ?e.status(),
                    "Unable to delete merge request {}: {}", iid, e.message()
                );
                false
            },
        }
    }

    /// Merge a merge request, failing with [`MergeError`] when GitLab refuses
    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn merge(
        &self,
        iid: MergeRequestIid,
    ) -> std::result::Result<MergeRequestDto, MergeError> {
        match self.api.merge(iid).await {
            Ok(merged) => {
                info!("Merged merge request: {} - {}", merged.iid, merged.title);
                Ok(merged)
            },
            Err(source) => {
                error!(
                    status = ?source.status(),
                    "Unable to merge merge request {}: {}", iid, source.message()
                );
                Err(MergeError { iid, source })
            },
        }
    }

    /// Pipelines of a merge request; `None` when the request fails
    #[instrument(skip(self), fields(merge_request_iid = %iid))]
    pub async fn list_pipelines_by_merge_request(
        &self,
        iid: MergeRequestIid,
    ) -> Option<Vec<PipelineDto>> {
        match self.api.list_pipelines_by_merge_request(iid).await {
            Ok(pipelines) => Some(pipelines),
            Err(e) => {
                error!(
                    status = ?e.status(),
                    "Unable to get pipelines for merge request {}: {}", iid, e.message()
                );
                None
            },
        }
    }

    /// Underlying API client, for callers that want the raw `Result`
    pub fn api(&self) -> &GitlabApi {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }
}
