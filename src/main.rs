use std::{path::PathBuf, process::exit};

use clap::{error::ErrorKind, CommandFactory, Parser};
use gitlab_wrapper::{
    client::{ClientConfig, GitlabClient},
    config::{default_config_path, load_config, save_config, WrapperConfig},
    logging::{init_logging, parse_level, LoggingConfig},
    result::{Result, WrapperError},
};
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::Command;

mod cli;

/// Branch, tag, merge request and pipeline operations against a GitLab project
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Alternate path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the path to the configuration file and exit.
    #[arg(short, long)]
    print_config_path: bool,
    /// Store the effective url, token and project in the configuration file.
    #[arg(long)]
    save_config: bool,
    /// API base URL, e.g. https://gitlab.example.com/api/v4
    #[arg(long, env = "GITLAB_URL")]
    url: Option<String>,
    /// Personal access token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Numeric project id or `group/project` path
    #[arg(long, env = "GITLAB_PROJECT_ID")]
    project: Option<String>,
    /// Write every HTTP response body to ./gitlab-wrapper-logs
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// Command line values take precedence over the configuration file
    fn apply_overrides(&self, config: &mut WrapperConfig) {
        if let Some(url) = &self.url {
            config.gitlab_url = Some(url.clone());
        }
        if let Some(token) = &self.token {
            config.gitlab_token = token.clone();
        }
        if let Some(project) = &self.project {
            config.project_id = Some(project.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);

    if args.print_config_path {
        println!("{}", config_path.display());
        exit(0);
    }

    color_eyre::install()
        .map_err(|e| WrapperError::GeneralError(format!("Failed to install color_eyre: {e}")))?;

    let mut config = load_config(&config_path)?;
    args.apply_overrides(&mut config);

    let _log_guard = initialize_logging(&config)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gitlab-wrapper starting up");

    if args.save_config {
        save_config(&config_path, &config)?;
        tracing::info!(path = %config_path.display(), "Saved configuration");
    }

    let Some(command) = args.command else {
        if args.save_config {
            return Ok(());
        }
        Cli::command()
            .error(ErrorKind::MissingSubcommand, "a command is required")
            .exit();
    };

    let client_config = ClientConfig::try_from(config)?.with_debug_logging(args.debug);
    let client = GitlabClient::new(client_config)?;

    cli::run(&client, command)
}

fn initialize_logging(config: &WrapperConfig) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_env();

    if let Some(level) = config.log_level.as_deref().and_then(parse_level) {
        logging_config = logging_config.with_level(level);
    }

    init_logging(logging_config)
        .map_err(|e| WrapperError::GeneralError(format!("Failed to initialize logging: {e}")))
}
