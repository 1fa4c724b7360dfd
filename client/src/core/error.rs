//! # Common Error Types
//!
//! Consolidated error handling for the LiFit client.
//!
//! This module provides a centralized error type [`AppError`] covering every
//! failure the client can surface to a screen.
//!
//! ## Error Categories
//!
//! - **Transport**: `Network` (connection refused, DNS, timeout), `Parse`
//! - **HTTP status**: `Unauthorized` (401), `Forbidden` (403), `NotFound` (404),
//!   `Conflict` (409), `Api` (any other non-2xx)
//! - **Client side**: `Validation` (checked before dispatch), `Storage`
//!   (token persistence), `Upload` (media hosting)
//!
//! A 401 has already cleared the session by the time the caller sees
//! `Unauthorized`; a 403 never touches it.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use lifit::core::error::AppError;
//!
//! fn validate_title(title: &str) -> Result<(), AppError> {
//!     if title.trim().is_empty() {
//!         return Err(AppError::Validation("Title is required".to_string()));
//!     }
//!     Ok(())
//! }
//! assert!(validate_title(" ").is_err());
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide error type.
///
/// Each variant includes a descriptive message. No variant is fatal: every
/// failure is recoverable by retrying or navigating away.
///
/// # Example
///
/// ```rust
/// use lifit::core::error::AppError;
///
/// let err = AppError::NotFound("/evento/9".to_string());
/// assert_eq!(err.to_string(), "Not found: /evento/9");
/// assert_eq!(err.user_message(), "Invalid data.");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Transport failure: the request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// 401. The session token was cleared before this error was returned.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403. Authorization failure; the session is kept.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409, e.g. username already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Input rejected before dispatch (empty fields, password mismatch, date ordering).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Media hosting failure.
    #[error("Upload error: {0}")]
    Upload(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Map a non-success status and its (already extracted) message.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized(_) => Some(401),
            AppError::Forbidden(_) => Some(403),
            AppError::NotFound(_) => Some(404),
            AppError::Conflict(_) => Some(409),
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Text for the alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AppError::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            AppError::Forbidden(_) => "You are not allowed to do that.".to_string(),
            AppError::NotFound(_) => "Invalid data.".to_string(),
            AppError::Conflict(message) | AppError::Api { message, .. } if !message.is_empty() => {
                message.clone()
            }
            AppError::Conflict(_) | AppError::Api { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
            AppError::Parse(_) => "Unexpected response from the server.".to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::Storage(_) => "Could not save your session on this device.".to_string(),
            AppError::Upload(_) => "Image upload failed.".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_taxonomy() {
        assert_eq!(
            AppError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            AppError::Unauthorized("x".into())
        );
        assert_eq!(
            AppError::from_status(StatusCode::FORBIDDEN, "x".into()),
            AppError::Forbidden("x".into())
        );
        assert_eq!(
            AppError::from_status(StatusCode::NOT_FOUND, "x".into()),
            AppError::NotFound("x".into())
        );
        assert_eq!(
            AppError::from_status(StatusCode::CONFLICT, "taken".into()),
            AppError::Conflict("taken".into())
        );
        assert_eq!(
            AppError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            AppError::Api { status: 502, message: "down".into() }
        );
    }

    #[test]
    fn test_status_round_trips_for_http_variants() {
        assert_eq!(AppError::Forbidden(String::new()).status(), Some(403));
        assert_eq!(AppError::Validation("x".into()).status(), None);
        assert!(AppError::Unauthorized(String::new()).is_session_expired());
        assert!(!AppError::Forbidden(String::new()).is_session_expired());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::NotFound("/x".into()).user_message(), "Invalid data.");
        assert_eq!(
            AppError::Conflict("Nome de usuário já está em uso".into()).user_message(),
            "Nome de usuário já está em uso"
        );
        assert_eq!(
            AppError::Api { status: 500, message: String::new() }.user_message(),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            AppError::Validation("Passwords don't match".into()).user_message(),
            "Passwords don't match"
        );
    }
}
