use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;
