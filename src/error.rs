//! Error types for huffpack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("empty input")]
    EmptyInput,

    #[error("malformed container: {0}")]
    MalformedContainer(String),

    #[error("truncated stream: decoded {decoded} of {expected} bytes")]
    TruncatedStream { decoded: u64, expected: u64 },

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompressError>;

impl CompressError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CompressError::MalformedContainer(msg.into())
    }
}
