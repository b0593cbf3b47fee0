use crate::error::ExternalServiceError;

use async_trait::async_trait;

/// Result of an identity service call
pub type ServiceResult<T> = std::result::Result<T, ExternalServiceError>;

/// External identity provider that owns accounts and sessions
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// True when no account exists yet and first-run setup should run.
    async fn users_empty(&self) -> ServiceResult<bool>;

    /// Establish a session for the given (already normalised) email.
    async fn login_with_password(&self, email: &str, password: &str) -> ServiceResult<()>;

    /// Check a human-verification token with the challenge provider.
    async fn verify_challenge(&self, token: &str) -> ServiceResult<()>;

    /// End the current session, if any.
    async fn logout(&self) -> ServiceResult<()>;
}
