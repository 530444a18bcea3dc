// GitLab API Documentation: https://docs.gitlab.com/ee/api/api_resources.html
use chrono::{DateTime, Utc};
use compact_str::{format_compact, CompactString};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::id::{MergeRequestIid, PipelineId, ProjectId};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BranchDto {
    pub name: CompactString,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub developers_can_push: bool,
    #[serde(default)]
    pub developers_can_merge: bool,
    #[serde(default)]
    pub can_push: bool,
    pub web_url: Option<CompactString>,
    pub commit: Option<CommitDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommitDto {
    pub id: CompactString,
    pub short_id: Option<CompactString>,
    #[serde(default)]
    pub title: CompactString,
    pub message: Option<CompactString>,
    pub author_name: Option<CompactString>,
    pub author_email: Option<CompactString>,
    pub created_at: Option<DateTime<Utc>>,
    pub web_url: Option<CompactString>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagDto {
    pub name: CompactString,
    pub message: Option<CompactString>,
    pub target: Option<CompactString>,
    #[serde(default)]
    pub protected: bool,
    pub commit: Option<CommitDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MergeRequestDto {
    pub id: u64,
    pub iid: MergeRequestIid,
    pub project_id: ProjectId,
    pub title: CompactString,
    pub description: Option<CompactString>,
    #[serde(default)]
    pub state: MergeRequestState,
    pub source_branch: CompactString,
    pub target_branch: CompactString,
    pub web_url: CompactString,
    pub merge_status: Option<CompactString>,
    pub sha: Option<CompactString>,
    pub merge_commit_sha: Option<CompactString>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The part of a freshly created merge request callers act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedMergeRequest {
    pub iid: MergeRequestIid,
    pub web_url: CompactString,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineDto {
    pub id: PipelineId,
    pub iid: Option<u32>,
    pub project_id: ProjectId,
    pub sha: Option<CompactString>,
    #[serde(rename = "ref")]
    pub branch: CompactString,
    pub status: PipelineStatus,
    #[serde(default)]
    pub source: PipelineSource,
    pub web_url: CompactString,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRequestState {
    #[default]
    Opened,
    Closed,
    Locked,
    Merged,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Created,
    WaitingForResource,
    Preparing,
    Pending,
    Running,
    Success,
    Failed,
    Canceling,
    Canceled,
    Skipped,
    Manual,
    Scheduled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipelineSource {
    Api,
    Chat,
    External,
    ExternalPullRequestEvent,
    MergeRequestEvent,
    OndemandDastScan,
    OndemandDastValidation,
    ParentPipeline,
    Pipeline,
    Push,
    Schedule,
    SecurityOrchestrationPolicy,
    Trigger,
    Web,
    Webide,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MergeRequestDto {
    pub fn created(&self) -> CreatedMergeRequest {
        CreatedMergeRequest { iid: self.iid, web_url: self.web_url.clone() }
    }
}

/// Form body for `POST /repository/branches`.
#[derive(Debug, Clone, Serialize)]
pub struct NewBranch {
    pub branch: CompactString,
    #[serde(rename = "ref")]
    pub from: CompactString,
}

/// Form body for `POST /repository/tags`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTag {
    pub tag_name: CompactString,
    #[serde(rename = "ref")]
    pub on: CompactString,
    pub message: CompactString,
}

impl NewBranch {
    pub fn new(branch: impl Into<CompactString>, from: impl Into<CompactString>) -> Self {
        Self { branch: branch.into(), from: from.into() }
    }
}

impl NewTag {
    /// Annotated tag with the release message used for automated releases.
    pub fn release(tag_name: impl Into<CompactString>, on: impl Into<CompactString>) -> Self {
        let tag_name = tag_name.into();
        let message = format_compact!("Automated release {}", tag_name);
        Self { tag_name, on: on.into(), message }
    }
}

/// Form body for `POST /merge_requests`.
///
/// Only `source_branch`, `target_branch` and `title` are required; the
/// optional attributes are sent only when set.
#[derive(Debug, Clone, Builder, Serialize)]
#[builder(pattern = "owned")]
pub struct NewMergeRequest {
    #[builder(setter(into))]
    pub source_branch: CompactString,
    #[builder(setter(into))]
    pub target_branch: CompactString,
    #[builder(setter(into))]
    pub title: CompactString,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<CompactString>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    /// Comma separated label names.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<CompactString>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_project_id: Option<u64>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_source_branch: Option<bool>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash: Option<bool>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_collaboration: Option<bool>,
}

impl NewMergeRequest {
    pub fn new(
        source_branch: impl Into<CompactString>,
        target_branch: impl Into<CompactString>,
        title: impl Into<CompactString>,
    ) -> Self {
        Self {
            source_branch: source_branch.into(),
            target_branch: target_branch.into(),
            title: title.into(),
            description: None,
            assignee_id: None,
            milestone_id: None,
            labels: None,
            target_project_id: None,
            remove_source_branch: None,
            squash: None,
            allow_collaboration: None,
        }
    }

    pub fn builder() -> NewMergeRequestBuilder {
        NewMergeRequestBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_release_tag_message() {
        let tag = NewTag::release("v1.2.0", "main");
        assert_eq!(tag.message, "Automated release v1.2.0");
        assert_eq!(tag.on, "main");
    }

    #[test]
    fn test_merge_request_builder_requires_title() {
        let result = NewMergeRequest::builder()
            .source_branch("feature")
            .target_branch("main")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_request_builder_optional_fields() {
        let request = NewMergeRequest::builder()
            .source_branch("feature")
            .target_branch("main")
            .title("Add feature")
            .squash(true)
            .labels("backend,release")
            .build()
            .unwrap();

        assert_eq!(request.squash, Some(true));
        assert_eq!(request.labels.as_deref(), Some("backend,release"));
        assert!(request.description.is_none());
    }

    #[test]
    fn test_pipeline_deserializes_unknown_values() {
        let pipeline: PipelineDto = serde_json::from_value(json!({
            "id": 46,
            "iid": 11,
            "project_id": 4,
            "sha": "a91957a858320c0e17f3a0eca7cfacbff50ea29a",
            "ref": "feature",
            "status": "some_future_status",
            "source": "some_future_source",
            "web_url": "https://gitlab.example.com/group/project/-/pipelines/46"
        }))
        .unwrap();

        assert_eq!(pipeline.id, PipelineId::new(46));
        assert_eq!(pipeline.branch, "feature");
        assert_eq!(pipeline.status, PipelineStatus::Unknown);
        assert_eq!(pipeline.source, PipelineSource::Unknown);
        assert!(pipeline.created_at.is_none());
    }

    #[test]
    fn test_branch_deserializes_with_commit() {
        let branch: BranchDto = serde_json::from_value(json!({
            "name": "main",
            "protected": true,
            "default": true,
            "commit": {
                "id": "7b5c3cc8be40ee161ae89a06bba6229da1032a0c",
                "short_id": "7b5c3cc",
                "title": "add projects API",
                "created_at": "2012-06-27T05:51:39.000-07:00"
            }
        }))
        .unwrap();

        assert!(branch.protected);
        assert!(!branch.merged);
        let commit = branch.commit.unwrap();
        assert_eq!(commit.title, "add projects API");
        assert_eq!(commit.created_at.unwrap().to_rfc3339(), "2012-06-27T12:51:39+00:00");
    }

    #[test]
    fn test_pipeline_without_source() {
        let pipeline: PipelineDto = serde_json::from_value(json!({
            "id": 5,
            "project_id": 3,
            "ref": "main",
            "status": "manual",
            "web_url": "https://gitlab.example.com/group/project/-/pipelines/5"
        }))
        .unwrap();

        assert_eq!(pipeline.source, PipelineSource::Unknown);
        assert_eq!(pipeline.status, PipelineStatus::Manual);
        assert_eq!(pipeline.branch, "main");
        assert!(pipeline.sha.is_none());
    }
}
