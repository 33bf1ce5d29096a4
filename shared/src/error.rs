//! Error types shared by the gateway, session and task engine.

use thiserror::Error;

/// Client-side field checks. These never reach the network.
///
/// Display strings are the messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingLoginFields,

    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter a task title")]
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("No {entity} matched the request")]
    NotFound { entity: &'static str },

    #[error("User with this email already exists")]
    Conflict { email: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Record store responded with status {status}")]
    Server { status: u16 },

    #[error("Malformed payload: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please login to add tasks")]
    AuthRequired,
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Decode(err.to_string())
    }
}

impl TrackerError {
    /// Whether the user should be sent to the login form.
    pub fn requires_login(&self) -> bool {
        matches!(self, TrackerError::AuthRequired)
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
