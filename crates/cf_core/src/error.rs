use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Error: {status}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {0}s. Try processing fewer articles or check your workflow server.")]
    Timeout(u64),

    #[error("Could not decode webhook response: {0}")]
    Decode(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status of a rejected submission, if the webhook answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body kept for the "error details" view.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
