use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SERVER_ERROR_FALLBACK: &str = "Server error occurred";
pub const PROCESSING_ERROR_FALLBACK: &str = "An error occurred during image processing.";

/// Problems detected locally, before anything is sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an image to upload.")]
    NoFileSelected,
    #[error("Please upload an image file.")]
    NotAnImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("server rejected classification ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("classification request failed: {detail}")]
    Network { detail: String },
    #[error("malformed classification response: {detail}")]
    MalformedResponse { detail: String },
}

impl ClassifyError {
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        Self::Server { status, message }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Text shown in the error region. Transport and decode details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Server { message, .. } => message.clone(),
            Self::Network { .. } | Self::MalformedResponse { .. } => {
                PROCESSING_ERROR_FALLBACK.to_string()
            }
        }
    }
}

/// Body the classification service sends with non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}
