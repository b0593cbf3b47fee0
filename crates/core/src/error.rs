use thiserror::Error;

/// Result type alias for botdesk-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for botdesk
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse errors for user supplied values
    #[error("parse error: {0}")]
    Parse(String),

    /// Form validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Identity or verification service failures
    #[error("external service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the caller can keep going after surfacing this error.
    ///
    /// Validation and external service failures leave the login form usable;
    /// everything else is a hard failure for the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::ExternalService(_))
    }
}

/// Login form validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is required")]
    MissingEmail,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("password is required")]
    MissingPassword,

    #[error("the challenge must be completed before logging in")]
    ChallengeRequired,

    #[error("a login is already in progress")]
    Busy,
}

/// Failures reported by the identity service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExternalServiceError {
    /// Credentials were rejected or the login call failed
    #[error("login failed: {0}")]
    Login(String),

    /// The human-verification token was rejected
    #[error("challenge verification failed: {0}")]
    Challenge(String),

    /// The service could not be reached
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

impl ExternalServiceError {
    pub fn login(msg: impl Into<String>) -> Self {
        Self::Login(msg.into())
    }

    pub fn challenge(msg: impl Into<String>) -> Self {
        Self::Challenge(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("missing section".to_string());
        assert_eq!(err.to_string(), "configuration error: missing section");

        let err: Error = ValidationError::InvalidEmail("bob".to_string()).into();
        assert_eq!(err.to_string(), "validation error: 'bob' is not a valid email address");

        let err: Error = ExternalServiceError::login("bad password").into();
        assert_eq!(err.to_string(), "external service error: login failed: bad password");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::from(ExternalServiceError::challenge("expired")).is_recoverable());
        assert!(Error::from(ValidationError::MissingPassword).is_recoverable());
        assert!(!Error::Other("boom".to_string()).is_recoverable());
        assert!(!Error::Parse("bad mode".to_string()).is_recoverable());
    }
}
