//! Centralized error types for the skycast widget.
//!
//! Three families matter to the panels: local validation failures that
//! never reach the network, transport/status failures from the backend,
//! and errors the backend signals inside an otherwise successful body.
//! All of them are terminal per action and resolve to a readable
//! message via `user_message()`.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] skycast_api::ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for panel display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Validation(e) => e.user_message().to_string(),
            AppError::Config(_) => "Invalid configuration. Check your settings.".to_string(),
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Local preconditions checked before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("start and end dates are required")]
    MissingDates,

    #[error("end_date must be on/after start_date")]
    EndBeforeStart,

    #[error("invalid date: {0}")]
    BadDate(String),
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyQuery => "Type a place to search for.",
            ValidationError::MissingDates => "Pick both a start and an end date.",
            ValidationError::EndBeforeStart => "End date must be on/after start date.",
            ValidationError::BadDate(_) => "Dates must look like YYYY-MM-DD.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_user_messages() {
        assert!(ValidationError::EndBeforeStart
            .user_message()
            .contains("on/after"));
        assert!(ValidationError::MissingDates.user_message().contains("date"));
    }

    #[test]
    fn test_app_error_wraps_validation() {
        let err = AppError::from(ValidationError::EmptyQuery);
        assert_eq!(err.user_message(), "Type a place to search for.");
    }

    #[test]
    fn test_app_error_wraps_api_signaled() {
        let err = AppError::from(skycast_api::ApiError::Signaled("backend said no".into()));
        assert_eq!(err.user_message(), "backend said no");
    }
}
