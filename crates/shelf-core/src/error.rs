use crate::validate::Rejection;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The locator matched no route, or the route does not support the operation.
    #[error("Unsupported locator: {0}")]
    UnsupportedLocator(String),

    /// A payload broke a domain rule.
    ///
    /// The gateway reports rejections as sentinel results; this variant is for
    /// callers that prefer to lift them into an error.
    #[error("Validation rejected: {0}")]
    ValidationRejected(Rejection),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl ShelfError {
    pub fn unsupported(locator: impl std::fmt::Display) -> Self {
        Self::UnsupportedLocator(locator.to_string())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }
}

impl From<Rejection> for ShelfError {
    fn from(rejection: Rejection) -> Self {
        Self::ValidationRejected(rejection)
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
