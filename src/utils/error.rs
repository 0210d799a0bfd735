use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsumerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Remote endpoint returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Missing data in response: {message}")]
    MissingDataError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConsumerError {
    /// Status message as sent by the remote side, for `RemoteError` only.
    pub fn status_message(&self) -> Option<&str> {
        match self {
            ConsumerError::RemoteError { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsumerError>;
