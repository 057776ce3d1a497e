//! Error types for GarudNav

use thiserror::Error;

/// GarudNav error type
#[derive(Error, Debug)]
pub enum GarudError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data service error: {0}")]
    Data(String),

    #[error("Planning error: {0}")]
    Planning(String),

    #[error("Invalid order: {0}")]
    Order(String),
}

impl From<toml::de::Error> for GarudError {
    fn from(e: toml::de::Error) -> Self {
        GarudError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for GarudError {
    fn from(e: reqwest::Error) -> Self {
        GarudError::Data(e.to_string())
    }
}

impl From<serde_json::Error> for GarudError {
    fn from(e: serde_json::Error) -> Self {
        GarudError::Data(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GarudError>;
