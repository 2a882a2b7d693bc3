//! Error handling for the forecast-app client

use std::fmt;
use thiserror::Error;

pub use forecast_rust_schema::ValidationErrors;

/// Unified error type for the forecast-app client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Non-success HTTP status; `message` is the response body or a default
    #[error("{message}")]
    Request { status: u16, message: String },

    /// A request or response body did not match its schema
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Failures raised by model code itself
    #[error("{0}")]
    Application(String),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl Error {
    /// Create a new application error
    pub fn application<T: fmt::Display>(msg: T) -> Self {
        Error::Application(msg.to_string())
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new timeout error
    pub fn timeout<T: fmt::Display>(msg: T) -> Self {
        Error::Timeout(msg.to_string())
    }

    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message shown to the user; `default` is used when the error has no text of its own
    pub fn user_message(&self, default: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            default.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Log a failed model call and hand the error back unchanged
pub(crate) fn logged(context: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| {
        log::error!("{}: {}", context, err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_rust_schema::ValidationError;

    #[test]
    fn test_request_error_displays_body() {
        let err = Error::Request {
            status: 401,
            message: "無効または期限切れのトークンです".into(),
        };
        assert_eq!(err.to_string(), "無効または期限切れのトークンです");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_user_message_falls_back_to_default() {
        let err = Error::application("");
        assert_eq!(err.user_message("ログインに失敗しました"), "ログインに失敗しました");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err: Error =
            ValidationErrors::from_error(ValidationError::new("warmthLevel", "Required")).into();
        assert_eq!(err.to_string(), "Validation failed: warmthLevel: Required");
    }
}
