//! GitLab client modules
//!
//! [`GitlabApi`] issues the HTTP requests, [`GitlabService`] reports their
//! outcome, and [`GitlabClient`] offers the same operations without async.

pub mod api;
pub mod blocking;
pub mod config;
pub mod error;
pub mod service;

#[cfg(test)]
mod tests;

pub use api::GitlabApi;
pub use blocking::GitlabClient;
pub use config::ClientConfig;
pub use error::{ClientError, MergeError};
pub use service::GitlabService;

pub type Result<T> = std::result::Result<T, ClientError>;
