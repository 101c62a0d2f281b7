//! Error types for backend API calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("Backend error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Signaled(String),

    #[error("Invalid response: {0}")]
    Invalid(String),
}

impl ApiError {
    /// User-friendly error message for panel display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            Self::BadUrl(_) => "Invalid backend address.".to_string(),
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Status { status, .. } => format!("Request failed ({})", status),
            Self::Signaled(message) => message.clone(),
            Self::Invalid(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// The backend reports failures as `{"error": "..."}`; the remaining
/// keys cover proxies and upstream services that answer in their own
/// envelope.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message", "reason", "detail"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}
