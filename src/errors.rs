use thiserror::Error;

/// Error type covering store, settings and configuration failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Index {index} is out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
