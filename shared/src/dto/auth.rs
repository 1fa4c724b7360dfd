use serde::{Deserialize, Serialize};

/// Login request (`POST /auth/login`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Either the e-mail or the username
    #[serde(rename = "nomeUsuarioEmail")]
    pub username_or_email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Signup request (`POST /usuario`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "nomeUsuario")]
    pub username: String,
}

/// Error body returned by the backend.
///
/// Spring-style errors carry `message`, some handlers use `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message, preferring `message` over `error`.
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}
