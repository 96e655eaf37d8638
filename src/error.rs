use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never produced a response (DNS, connection, bad URL).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// The `message` field of the error body, when there was one.
        message: Option<String>,
    },

    /// The response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// The server-provided message, if the API sent one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            AppError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
