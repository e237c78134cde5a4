//! Sign-up request validation and the `POST /register/` response contract.
//!
//! No HTTP client lives here: callers send [`request_body`] themselves and
//! feed the status code and body back through
//! [`RegistrationOutcome::from_response`].

use std::sync::OnceLock;

use booking_domain::{RegistrationForm, RegistrationRequest};
use regex::Regex;
use serde::Deserialize;

use crate::CoreError;

pub const REGISTER_PATH: &str = "/register/";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const UNREADABLE_RESPONSE: &str = "An error occurred";

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Checks every rule and reports all failures at once.
pub fn validate_registration(form: &RegistrationForm) -> Result<RegistrationRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.first_name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "first_name",
            "First name must be at least 2 characters",
        ));
    }
    if form.last_name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "last_name",
            "Last name must be at least 2 characters",
        ));
    }
    if !email_pattern().is_match(form.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }

    let password = &form.password;
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one number",
        ));
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one special character",
        ));
    }
    if form.confirm_password != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords don't match"));
    }
    if !form.terms_accepted {
        errors.push(FieldError::new(
            "terms",
            "You must accept the terms and conditions",
        ));
    }

    if errors.is_empty() {
        Ok(form.to_request())
    } else {
        Err(errors)
    }
}

pub fn request_body(request: &RegistrationRequest) -> Result<String, CoreError> {
    serde_json::to_string(request).map_err(|err| CoreError::Serde(err.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Failed(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl RegistrationOutcome {
    /// 2xx is success; anything else fails with the body's `detail` message,
    /// `Registration failed` when there is none, or a generic message when
    /// the body is not JSON.
    pub fn from_response(status: u16, body: &str) -> Self {
        if (200..300).contains(&status) {
            return RegistrationOutcome::Registered;
        }
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: Some(serde_json::Value::String(detail)),
            }) if !detail.trim().is_empty() => RegistrationOutcome::Failed(detail),
            Ok(ErrorBody {
                detail: Some(other),
            }) if !other.is_null() => RegistrationOutcome::Failed(other.to_string()),
            Ok(_) => RegistrationOutcome::Failed(REGISTRATION_FAILED.to_string()),
            Err(_) => RegistrationOutcome::Failed(UNREADABLE_RESPONSE.to_string()),
        }
    }
}
