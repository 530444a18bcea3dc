//! Configuration management for GitLab client

use std::{path::PathBuf, time::Duration};

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::{config::WrapperConfig, id::ProjectId};

/// Base URL of the v4 API on gitlab.com
pub const GITLAB_BASE_URL_V4_DEFAULT: &str = "https://gitlab.com/api/v4";

/// Main configuration for GitLab client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, including the `/api/v4` suffix
    pub base_url: CompactString,
    /// Project all requests are scoped to
    pub project_id: ProjectId,
    /// Private access token, sent as `PRIVATE-TOKEN`
    pub private_token: CompactString,
    /// Request configuration
    pub request: RequestConfig,
    /// Debug configuration
    pub debug: DebugConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
}

/// Debug and logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Write every HTTP response body to `log_directory`
    pub log_responses: bool,
    /// Directory for storing response dumps
    pub log_directory: Option<PathBuf>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_responses: false,
            log_directory: Some(PathBuf::from("gitlab-wrapper-logs")),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(
        base_url: impl Into<CompactString>,
        project_id: impl Into<ProjectId>,
        private_token: impl Into<CompactString>,
    ) -> Self {
        let base_url: CompactString = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').into(),
            project_id: project_id.into(),
            private_token: private_token.into(),
            request: RequestConfig::default(),
            debug: DebugConfig::default(),
        }
    }

    /// Configuration against gitlab.com
    pub fn gitlab_com(
        project_id: impl Into<ProjectId>,
        private_token: impl Into<CompactString>,
    ) -> Self {
        Self::new(GITLAB_BASE_URL_V4_DEFAULT, project_id, private_token)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config("Base URL must start with http:// or https://"));
        }

        if self.private_token.is_empty() {
            return Err(ClientError::config("Private token cannot be empty"));
        }

        if self.project_id.is_empty() {
            return Err(ClientError::config_validation("project_id", "cannot be empty"));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Prefix every request path is appended to
    pub fn project_url(&self) -> CompactString {
        compact_str::format_compact!("{}/projects/{}", self.base_url, self.project_id.encoded())
    }
}

impl TryFrom<WrapperConfig> for ClientConfig {
    type Error = ClientError;

    fn try_from(config: WrapperConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .ok_or_else(|| ClientError::config_validation("project_id", "is required"))?;

        let base_url = config
            .gitlab_url
            .unwrap_or_else(|| GITLAB_BASE_URL_V4_DEFAULT.into());

        Ok(Self::new(base_url, project_id, config.gitlab_token))
    }
}

impl ClientConfig {
    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }

    /// Set debug configuration
    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    /// Enable response dumps
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug.log_responses = enabled;
        self
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<CompactString>,
    project_id: Option<ProjectId>,
    private_token: Option<CompactString>,
    request: Option<RequestConfig>,
    debug: Option<DebugConfig>,
}

impl ClientConfigBuilder {
    /// Set base URL; defaults to gitlab.com
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn private_token(mut self, token: impl Into<CompactString>) -> Self {
        self.private_token = Some(token.into());
        self
    }

    pub fn request(mut self, request: RequestConfig) -> Self {
        self.request = Some(request);
        self
    }

    pub fn debug(mut self, debug: DebugConfig) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Enable response dumps
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        let mut debug = self.debug.unwrap_or_default();
        debug.log_responses = enabled;
        self.debug = Some(debug);
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut request = self.request.unwrap_or_default();
        request.timeout = timeout;
        self.request = Some(request);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let project_id = self
            .project_id
            .ok_or_else(|| ClientError::config("Project id is required"))?;
        let private_token = self
            .private_token
            .ok_or_else(|| ClientError::config("Private token is required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| GITLAB_BASE_URL_V4_DEFAULT.into());

        let config = ClientConfig::new(base_url, project_id, private_token)
            .with_request(self.request.unwrap_or_default())
            .with_debug(self.debug.unwrap_or_default());

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_url("https://gitlab.example.com/api/v4")
            .project_id("group/project")
            .private_token("test-token")
            .timeout(Duration::from_secs(5))
            .debug_logging(true)
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(config.project_id.as_str(), "group/project");
        assert_eq!(config.private_token, "test-token");
        assert_eq!(config.request.timeout, Duration::from_secs(5));
        assert!(config.debug.log_responses);
    }

    #[test]
    fn test_builder_defaults_to_gitlab_com() {
        let config = ClientConfig::builder()
            .project_id(123u32)
            .private_token("token")
            .build()
            .unwrap();

        assert_eq!(config.base_url, GITLAB_BASE_URL_V4_DEFAULT);
        assert_eq!(config.project_url(), "https://gitlab.com/api/v4/projects/123");
    }

    #[test]
    fn test_builder_requires_project() {
        let result = ClientConfig::builder().private_token("token").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::gitlab_com(1u32, "token");
        assert!(config.validate().is_ok());

        let config = ClientConfig::new("", 1u32, "token");
        assert!(config.validate().is_err());

        let config = ClientConfig::gitlab_com(1u32, "");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("not-a-url", 1u32, "token");
        assert!(config.validate().is_err());

        let config = ClientConfig::gitlab_com("", "token");
        assert!(matches!(
            config.validate(),
            Err(ClientError::ConfigValidation { .. })
        ));

        let config = ClientConfig::gitlab_com(1u32, "token")
            .with_request(RequestConfig { timeout: Duration::ZERO });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://gitlab.example.com/api/v4/", "group/project", "t");
        assert_eq!(
            config.project_url(),
            "https://gitlab.example.com/api/v4/projects/group%2Fproject"
        );
    }

    #[test]
    fn test_from_wrapper_config() {
        let wrapper_config = WrapperConfig {
            gitlab_url: Some("https://gitlab.example.com/api/v4".into()),
            gitlab_token: "test-token".into(),
            project_id: Some("42".into()),
            log_level: None,
        };

        let client_config = ClientConfig::try_from(wrapper_config).unwrap();
        assert_eq!(client_config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(client_config.private_token, "test-token");
        assert_eq!(client_config.project_id, ProjectId::from(42u32));
    }

    #[test]
    fn test_from_wrapper_config_without_project() {
        let result = ClientConfig::try_from(WrapperConfig::default());
        assert!(matches!(result, Err(ClientError::ConfigValidation { .. })));
    }
}
