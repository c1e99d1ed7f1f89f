/// Errors raised by the link pipeline and its file-facing surfaces
use thiserror::Error;

pub type LinkResult<T> = Result<T, LinkError>;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("{stage}: invalid length: {reason}")]
    InvalidLength { stage: &'static str, reason: String },

    #[error(
        "error evaluation: transmitted stream has {transmitted} bits but received stream has {received}"
    )]
    LengthMismatch { transmitted: usize, received: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl LinkError {
    pub fn invalid_length(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidLength {
            stage,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
