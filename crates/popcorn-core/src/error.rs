use thiserror::Error;

/// Errors from the core crate (persistence and configuration).
#[derive(Debug, Error)]
pub enum PopcornError {
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}
