use confy::ConfyError;
use thiserror::Error;

use crate::client::{ClientError, MergeError};

pub type Result<T> = std::result::Result<T, WrapperError>;

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("Failure reading configuration file.")]
    ConfigError(#[source] ConfyError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("{0}")]
    GeneralError(String),
}
