use std::fmt::{self, Display};

/// Errors produced while normalizing API payloads.
#[derive(Debug)]
pub enum ModelError {
    /// The API answered but reported the movie as missing.
    NotFound(String),
    /// A link field could not be parsed as a URL.
    InvalidLink(url::ParseError),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound(msg) => write!(f, "movie not found: {msg}"),
            ModelError::InvalidLink(err) => write!(f, "invalid link: {err}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::NotFound(_) => None,
            ModelError::InvalidLink(err) => Some(err),
        }
    }
}

impl From<url::ParseError> for ModelError {
    fn from(err: url::ParseError) -> Self {
        ModelError::InvalidLink(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
