use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreLensError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScoreLensError {
    /// Transport-level failures, as opposed to local misconfiguration.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ScoreLensError::Http(_) | ScoreLensError::Api { .. } | ScoreLensError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoreLensError>;
