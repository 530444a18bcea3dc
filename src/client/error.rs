//! Error types for GitLab client operations

use compact_str::CompactString;
use thiserror::Error;

use crate::{domain::NewMergeRequestBuilderError, id::MergeRequestIid};

/// Structured error types for GitLab client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error with endpoint context
    #[error("Failed to parse JSON response from {endpoint}")]
    JsonParse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// GitLab API returned an error response
    #[error("GitLab API error (HTTP {status}): {message}")]
    GitlabApi { status: u16, message: CompactString },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: CompactString },

    /// Resource not found
    #[error("Resource not found: {message}")]
    NotFound { message: CompactString },

    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration field validation failed
    #[error("Invalid {field}: {message}")]
    ConfigValidation { field: String, message: String },

    /// Request payload could not be assembled
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Raised when a merge request could not be merged.
///
/// Unlike every other operation, a failed merge is not swallowed by
/// [`GitlabService`](super::GitlabService): callers usually gate a release
/// on it.
#[derive(Debug, Error)]
#[error("Unable to merge merge request {iid}: {}", .source.message())]
pub struct MergeError {
    pub iid: MergeRequestIid,
    #[source]
    pub source: ClientError,
}

impl ClientError {
    /// Create a JSON parsing error with endpoint context
    pub fn json_parse(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse { endpoint: endpoint.into(), source }
    }

    /// Map a non-success status and its extracted message to an error
    pub fn from_status(status: u16, message: impl Into<CompactString>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Authentication { message },
            404 => Self::NotFound { message },
            _ => Self::GitlabApi { status, message },
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a configuration field validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }

    /// HTTP status of the failed response, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Authentication { .. } => Some(401),
            ClientError::NotFound { .. } => Some(404),
            ClientError::GitlabApi { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message reported for this failure: the GitLab-provided message
    /// when there is one, the error's own description otherwise
    pub fn message(&self) -> CompactString {
        match self {
            ClientError::GitlabApi { message, .. }
            | ClientError::Authentication { message }
            | ClientError::NotFound { message } => message.clone(),
            other => other.to_string().into(),
        }
    }
}

impl From<NewMergeRequestBuilderError> for ClientError {
    fn from(e: NewMergeRequestBuilderError) -> Self {
        ClientError::InvalidRequest(e.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
