use thiserror::Error;

use crate::advisor::AdviceError;

#[derive(Error, Debug)]
pub enum FinancasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Advice unavailable: {0}")]
    AdviceUnavailable(#[from] AdviceError),

    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),

    #[error("Invalid backup data at record {index}: {reason}")]
    InvalidData { index: usize, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, FinancasError>;
