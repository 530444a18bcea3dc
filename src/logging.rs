use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for console (stderr) output
    pub console_level: LevelFilter,
    /// Log level for file output
    pub file_level: LevelFilter,
    /// Directory where daily log files are written; no file logging when unset
    pub log_dir: Option<PathBuf>,
    /// Whether to enable JSON formatted logs for structured output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::INFO,
            file_level: LevelFilter::DEBUG,
            log_dir: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(log_dir) = std::env::var("GITLAB_WRAPPER_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        if std::env::var("GITLAB_WRAPPER_JSON_LOGS").is_ok() {
            config.json_format = true;
        }

        // applied last: `Off` must win over GITLAB_WRAPPER_LOG_DIR
        match std::env::var("GITLAB_WRAPPER_LOG_LEVEL")
            .ok()
            .and_then(|level| parse_level(&level))
        {
            Some(level) => config.with_level(level),
            None => config,
        }
    }

    /// Apply the same level to console and file output
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.console_level = level;
        self.file_level = level;
        if level == LevelFilter::OFF {
            self.log_dir = None;
        }
        self
    }
}

/// Parse a level name such as `debug` or `Off`, case-insensitively
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().to_ascii_lowercase().parse().ok()
}

/// Initialize the logging system with the given configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init_logging(
    config: LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "gitlab-wrapper.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        };

        layers.push(file_layer);
    }

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(config.console_level.into())
                .from_env_lossy(),
        )
        .boxed();

    layers.push(console_layer);

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("Off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn test_off_disables_file_logging() {
        let config = LoggingConfig { log_dir: Some("logs".into()), ..Default::default() }
            .with_level(LevelFilter::OFF);

        assert!(config.log_dir.is_none());
        assert_eq!(config.console_level, LevelFilter::OFF);
    }

    #[test]
    fn test_env_level_off_overrides_env_log_dir() {
        std::env::set_var("GITLAB_WRAPPER_LOG_LEVEL", "off");
        std::env::set_var("GITLAB_WRAPPER_LOG_DIR", "/tmp/gitlab-wrapper-test-logs");
        let config = LoggingConfig::from_env();
        std::env::remove_var("GITLAB_WRAPPER_LOG_LEVEL");
        std::env::remove_var("GITLAB_WRAPPER_LOG_DIR");

        assert!(config.log_dir.is_none());
        assert_eq!(config.file_level, LevelFilter::OFF);
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.console_level, LevelFilter::INFO);
        assert!(config.log_dir.is_none());
        assert!(!config.json_format);
    }
}
