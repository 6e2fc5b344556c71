//! Error types for the outer surfaces (deck loading, configuration)
//!
//! The simulation core itself never fails: it degrades to a no-op instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Unknown key card: {0}")]
    UnknownKeyCard(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
