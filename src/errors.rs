use std::result::Result as StdResult;

use kopi_config::ConfigError;
use kopi_core::CoreError;
use thiserror::Error;

/// Unified error type for the controller and its collaborators.
#[derive(Error, Debug)]
pub enum KopilkaError {
    /// A command was rejected; the store is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// The snapshot could not be read or written.
    #[error("Persistence error: {0}")]
    Storage(#[source] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = StdResult<T, KopilkaError>;
