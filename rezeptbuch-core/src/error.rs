use thiserror::Error;

/// Error returned by all backend operations.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status. The message is the backend's JSON error
    /// message when one could be parsed, else a per-operation default.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// The message to surface in the UI for this failure.
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(e) => e.to_string(),
            ApiError::Api { message, .. } => message.clone(),
        }
    }

    /// HTTP status code, if the server produced a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Api { status, .. } => Some(*status),
        }
    }
}
