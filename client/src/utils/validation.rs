/// Validation utilities for user input
///
/// Every form is checked before anything is sent; a failed check becomes
/// `AppError::Validation` carrying the message shown to the user.
use chrono::{NaiveDate, NaiveDateTime};

use crate::core::error::AppError;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// First failing result of a sequence, or `ok()`
    pub fn all(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        results
            .into_iter()
            .find(|r| !r.is_valid)
            .unwrap_or_else(Self::ok)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Non-blank after trimming
pub fn validate_required(value: &str, message: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::err(message)
    } else {
        ValidationResult::ok()
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return ValidationResult::err("Invalid email format");
    };

    if local.is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

pub fn validate_login(username_or_email: &str, password: &str) -> ValidationResult {
    if username_or_email.trim().is_empty() || password.is_empty() {
        return ValidationResult::err("Username and password required");
    }
    ValidationResult::ok()
}

pub fn validate_signup(
    name: &str,
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult {
    if [name, email, username].iter().any(|f| f.trim().is_empty()) || password.is_empty() {
        return ValidationResult::err("All fields required");
    }

    let email = validate_email(email);
    if !email.is_valid {
        return email;
    }

    if password != confirm_password {
        return ValidationResult::err("Passwords don't match");
    }

    ValidationResult::ok()
}

/// Goal name present and deadline not in the past (today is allowed)
pub fn validate_meta(name: &str, due: NaiveDate, today: NaiveDate) -> ValidationResult {
    ValidationResult::all([
        validate_required(name, "Please enter a name for the goal."),
        if due < today {
            ValidationResult::err("The deadline must be today or a future date.")
        } else {
            ValidationResult::ok()
        },
    ])
}

pub fn validate_post(title: &str, description: &str) -> ValidationResult {
    if title.trim().is_empty() || description.trim().is_empty() {
        return ValidationResult::err("Please fill in the title and the description.");
    }
    ValidationResult::ok()
}

/// Title and location present, an image chosen, and end strictly after start
pub fn validate_event(
    title: &str,
    location: &str,
    has_image: bool,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
) -> ValidationResult {
    ValidationResult::all([
        validate_required(title, "Enter a title for the event"),
        validate_required(location, "Enter the event location"),
        if has_image {
            ValidationResult::ok()
        } else {
            ValidationResult::err("Choose an image for the event")
        },
        if ends_at <= starts_at {
            ValidationResult::err("The end time must be after the start time")
        } else {
            ValidationResult::ok()
        },
    ])
}

pub fn validate_profile(name: &str, username: &str) -> ValidationResult {
    ValidationResult::all([
        validate_required(name, "Name is required"),
        validate_required(username, "Username is required"),
    ])
}
