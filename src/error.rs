// src/error.rs
use thiserror::Error;

/// Text shown when a message is sent before any conversation is open.
pub const NO_ACTIVE_SESSION: &str = "Please create new Chat!";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("{}", NO_ACTIVE_SESSION)]
    NoActiveSession,

    /// `error` field returned by the backend, verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("Response is missing `{0}`")]
    MissingField(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Validation failures are handled locally, before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::EmptyMessage | ClientError::NoActiveSession)
    }

    /// Errors the controller has already put in front of the user.
    pub fn is_surfaced(&self) -> bool {
        matches!(self, ClientError::NoActiveSession | ClientError::Backend(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
