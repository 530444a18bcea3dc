//! Synchronous GitLab client
//!
//! Wraps [`GitlabService`] in a dedicated Tokio runtime so callers without an
//! async context get plain method calls. Do not use it from within an async
//! runtime; use [`GitlabService`] there instead.

use tokio::runtime::Runtime;

use super::{
    config::ClientConfig,
    error::{ClientError, MergeError, Result},
    service::GitlabService,
};
use crate::{
    domain::{BranchDto, CreatedMergeRequest, MergeRequestDto, NewMergeRequest, PipelineDto, TagDto},
    id::MergeRequestIid,
};

pub struct GitlabClient {
    service: GitlabService,
    rt: Runtime,
}

impl GitlabClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let service = GitlabService::new(config)?;
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| ClientError::config(format!("Failed to create Tokio runtime: {e}")))?;

        Ok(Self { service, rt })
    }

    pub fn list_branches(&self) -> Vec<BranchDto> {
        self.rt.block_on(self.service.list_branches())
    }

    pub fn get_branch(&self, name: &str) -> Option<BranchDto> {
        self.rt.block_on(self.service.get_branch(name))
    }

    pub fn create_branch(&self, name: &str, from: &str) -> Option<BranchDto> {
        self.rt.block_on(self.service.create_branch(name, from))
    }

    pub fn delete_branch(&self, name: &str) -> bool {
        self.rt.block_on(self.service.delete_branch(name))
    }

    pub fn create_tag(&self, name: &str, on: &str) -> Option<TagDto> {
        self.rt.block_on(self.service.create_tag(name, on))
    }

    pub fn delete_tag(&self, name: &str) -> bool {
        self.rt.block_on(self.service.delete_tag(name))
    }

    pub fn create_merge_request(&self, merge_request: &NewMergeRequest) -> Option<CreatedMergeRequest> {
        self.rt.block_on(self.service.create_merge_request(merge_request))
    }

    pub fn delete_merge_request(&self, iid: MergeRequestIid) -> bool {
        self.rt.block_on(self.service.delete_merge_request(iid))
    }

    pub fn merge(&self, iid: MergeRequestIid) -> std::result::Result<MergeRequestDto, MergeError> {
        self.rt.block_on(self.service.merge(iid))
    }

    pub fn list_pipelines_by_merge_request(&self, iid: MergeRequestIid) -> Option<Vec<PipelineDto>> {
        self.rt.block_on(self.service.list_pipelines_by_merge_request(iid))
    }

    /// Get reference to the underlying service (for advanced usage)
    pub fn service(&self) -> &GitlabService {
        &self.service
    }

    pub fn config(&self) -> &ClientConfig {
        self.service.config()
    }
}
