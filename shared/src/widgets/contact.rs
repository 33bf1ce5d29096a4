use std::time::Duration;

use crate::error::ValidationError;
use crate::validation::is_valid_email;

/// Delay of the simulated send before the success modal appears.
pub const SIMULATED_SEND_DELAY: Duration = Duration::from_millis(1500);

pub const SENDING_NOTICE: &str = "Sending message...";
pub const SENT_NOTICE: &str = "Message sent successfully! We'll respond within 24 hours.";

pub const CONTACT_CATEGORIES: [&str; 4] = ["general", "support", "billing", "feedback"];

/// Contact form values. Messages are validated locally and never delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub category: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            &self.name,
            &self.email,
            &self.subject,
            &self.category,
            &self.message,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingRequiredFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
