use thiserror::Error;

/// Errors surfaced by the playback controller and its backends.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Playback backend error: {0}")]
    Backend(String),

    #[error("No playable source for {0}")]
    MissingSource(String),

    #[error("{0} is not available on the embedded player")]
    EmbedOnly(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("No config directory on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
