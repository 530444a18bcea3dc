//! Test utilities and common test fixtures for client modules

use serde_json::json;


/// Project path used by every fixture; encoded as `group%2Fproject` in URLs
pub const PROJECT: &str = "group/project";

/// URL path prefix for [`PROJECT`] on the mock server
pub fn project_path(rest: &str) -> String {
    format!("/api/v4/projects/group%2Fproject/{rest}")
}

pub fn branch_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "merged": false,
        "protected": false,
        "default": name == "main",
        "developers_can_push": false,
        "developers_can_merge": false,
        "can_push": true,
        "web_url": format!("https://gitlab.example.com/group/project/-/tree/{name}"),
        "commit": {
            "id": "7b5c3cc8be40ee161ae89a06bba6229da1032a0c",
            "short_id": "7b5c3cc",
            "title": "add projects API",
            "message": "add projects API",
            "author_name": "John Smith",
            "author_email": "john@example.com",
            "created_at": "2012-06-27T05:51:39.000-07:00"
        }
    })
}

pub fn tag_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "message": format!("Automated release {name}"),
        "target": "2695effb5807a22ff3d138d593fd856244e155e7",
        "protected": false,
        "commit": {
            "id": "2695effb5807a22ff3d138d593fd856244e155e7",
            "title": "Initial commit"
        }
    })
}

pub fn merge_request_json(iid: u32, state: &str) -> serde_json::Value {
    json!({
        "id": 1000 + iid,
        "iid": iid,
        "project_id": 3,
        "title": "Add feature",
        "description": "Adds the feature",
        "state": state,
        "source_branch": "feature",
        "target_branch": "main",
        "web_url": format!("https://gitlab.example.com/group/project/-/merge_requests/{iid}"),
        "merge_status": "can_be_merged",
        "sha": "8888888888888888888888888888888888888888",
        "merge_commit_sha": null,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2023-01-01T01:00:00Z"
    })
}

pub fn pipelines_json() -> serde_json::Value {
    json!([
        {
            "id": 77,
            "iid": 12,
            "project_id": 3,
            "sha": "959e04d7c7a30600c894bd3c0cd0e1ce7f42c11d",
            "ref": "feature",
            "status": "success",
            "source": "merge_request_event",
            "web_url": "https://gitlab.example.com/group/project/-/pipelines/77",
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2023-01-01T00:10:00Z"
        },
        {
            "id": 78,
            "iid": 13,
            "project_id": 3,
            "sha": "959e04d7c7a30600c894bd3c0cd0e1ce7f42c11d",
            "ref": "refs/merge-requests/1/head",
            "status": "running",
            "source": "merge_request_event",
            "web_url": "https://gitlab.example.com/group/project/-/pipelines/78",
            "created_at": "2023-01-01T00:20:00Z",
            "updated_at": "2023-01-01T00:21:00Z"
        }
    ])
}

/// Create GitLab API error response
pub fn gitlab_error_response(message: &str) -> serde_json::Value {
    json!({ "message": message })
}

/// Mock HTTP server for testing
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = wiremock::MockServer::start().await;
        Self { server }
    }

    /// API base URL on the mock server
    pub fn base_url(&self) -> String {
        format!("{}/api/v4", self.server.uri())
    }

    /// Create a test config pointing to this mock server
    pub fn test_config(&self) -> crate::client::config::ClientConfig {
        crate::client::config::ClientConfig::new(self.base_url(), PROJECT, "test-token")
    }
}
