//! Login, signup and password-reset form checks.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::model::{NewUser, DEFAULT_MAJOR};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingLoginFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub university: String,
    /// Optional; blank becomes `"Undeclared"`.
    pub major: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.university,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingRequiredFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Validates and builds the signup payload joined at `now`.
    pub fn into_new_user(self, now: DateTime<Utc>) -> Result<NewUser, ValidationError> {
        self.validate()?;
        let username = username_from_email(&self.email);
        let major = if self.major.trim().is_empty() {
            DEFAULT_MAJOR.to_string()
        } else {
            self.major
        };
        Ok(NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            university: self.university,
            major,
            username,
            join_date: now,
        })
    }
}

/// Local part of an email address.
pub fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

/// Notice shown for a password-reset request. Nothing is actually sent.
pub fn password_reset_notice(email: &str) -> Result<String, ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(format!("Password reset link sent to {email}"))
}
