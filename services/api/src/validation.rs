//! Input validation utilities
//!
//! Field rules for incoming payloads. Each failed rule yields one
//! [`FieldError`] record that the error pipeline renders verbatim.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::FieldError;
use crate::models::{NewRole, NewTask, NewUser};

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_]{3,32}$").expect("Failed to compile username regex")
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    })
}

/// Validate a user creation payload, collecting every field failure.
pub fn validate_new_user(new: &NewUser) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !username_regex().is_match(&new.username) {
        errors.push(FieldError::new(
            "username",
            new.username.as_str(),
            "must be 3-32 characters of letters, numbers, and underscores",
        ));
    }

    if new.email.len() > 254 || !email_regex().is_match(&new.email) {
        errors.push(FieldError::new(
            "email",
            new.email.as_str(),
            "must be a valid email address",
        ));
    }

    if let Some(message) = password_rule(&new.password) {
        // The rejected password is never echoed back.
        errors.push(FieldError::new("password", "", message));
    }

    errors
}

fn password_rule(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        return Some("must be at least 8 characters long");
    }
    if password.len() > 128 {
        return Some("must be at most 128 characters long");
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Some("must contain at least one letter and one digit");
    }
    None
}

/// Validate a task creation payload.
pub fn validate_new_task(new: &NewTask) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if new.title.trim().is_empty() {
        errors.push(FieldError::new(
            "title",
            new.title.as_str(),
            "must not be blank",
        ));
    }
    errors
}

/// Validate a role creation payload.
pub fn validate_new_role(new: &NewRole) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if new.name.trim().is_empty() {
        errors.push(FieldError::new(
            "name",
            new.name.as_str(),
            "must not be blank",
        ));
    }
    errors
}
