//! A thin client for the GitLab REST API v4.
//!
//! Branch, tag, merge request and pipeline operations map one-to-one onto
//! single HTTP requests against one project.
//!
//! ```no_run
//! use gitlab_wrapper::{client::{ClientConfig, GitlabClient}, id::MergeRequestIid};
//!
//! let config = ClientConfig::gitlab_com("group/project", "glpat-xxxxxxxx");
//! let client = GitlabClient::new(config)?;
//!
//! client.create_branch("release/1.4", "main");
//! client.create_tag("v1.4.0", "release/1.4");
//! client.merge(MergeRequestIid::new(42))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod id;
pub mod logging;
pub mod result;
