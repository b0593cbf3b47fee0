use std::sync::LazyLock;

use botdesk_core::ValidationError;
use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

/// Email and password as typed into the login form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Trimmed, lower-cased email
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Check the form fields and return the credentials to submit.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = self.normalized_email();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !EMAIL.is_match(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(Self { email, password: self.password.clone() })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).field("password", &"***").finish()
    }
}
