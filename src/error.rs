//! Error types for the dashboard crate

use crate::config::ConfigError;
use crate::dialog::terminal::DialogError;
use crate::wallet::{KeyfileError, KeypairError};
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dashboard crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Keyfile(#[from] KeyfileError),

    #[error(transparent)]
    Keypair(#[from] KeypairError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when a key file path did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Keyfile(KeyfileError::NotFound(_)))
    }
}
