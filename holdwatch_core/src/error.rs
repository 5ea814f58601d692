use holdwatch_traits::{AuthError, StoreError};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum HoldwatchError {
    #[error("data store error: {0}")]
    Store(#[from] StoreError),
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("malformed record: {0}")]
    Decode(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing data store")]
    MissingStore,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
