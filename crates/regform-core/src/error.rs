// crates/regform-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading or caching the geography dataset.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("{0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid dataset: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
