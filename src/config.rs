use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::result::{Result, WrapperError};

/// Contents of `gitlab-wrapper.toml`
#[derive(Default, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WrapperConfig {
    /// API base URL; gitlab.com when unset
    pub gitlab_url: Option<String>,
    /// The Personal Access Token to authenticate with GitLab
    pub gitlab_token: String,
    /// Numeric id or `group/project` path
    pub project_id: Option<String>,
    /// Tracing level; `Off` disables file logging
    pub log_level: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("gitlab-wrapper.toml")
    } else {
        PathBuf::from("gitlab-wrapper.toml")
    }
}

/// Load the config file, or the default config when it does not exist
pub fn load_config(config_file: &Path) -> Result<WrapperConfig> {
    if !config_file.exists() {
        return Ok(WrapperConfig::default());
    }

    confy::load_path(config_file).map_err(WrapperError::ConfigError)
}

pub fn save_config(config_file: &Path, config: &WrapperConfig) -> Result<()> {
    confy::store_path(config_file, config).map_err(WrapperError::ConfigError)
}
