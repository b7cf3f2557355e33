use crate::types::Flavor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No subtitle track for flavor: {0}")]
    FlavorNotFound(Flavor),

    #[error("Cue index {index} out of bounds for flavor {flavor} (track has {len} cues)")]
    CueIndexOutOfBounds {
        flavor: Flavor,
        index: usize,
        len: usize,
    },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
