use botdesk_core::{Error, IdentityService, Result, SettingsFeed, ValidationError};

use super::Credentials;

/// Where the host should navigate after a login form action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// No account exists yet; run first-time setup
    Setup,
    /// Logged in; go back to where the user came from
    Back,
}

/// Login form state over an identity service.
///
/// When a challenge site key is configured, a verified challenge token is
/// required before submitting. The token is single use: it is cleared after
/// every submission, successful or not.
#[derive(Debug)]
pub struct LoginForm<S> {
    identity: S,
    site_key: Option<String>,
    challenge_token: Option<String>,
    submitting: bool,
    visible: bool,
}

impl<S: IdentityService> LoginForm<S> {
    pub fn new(identity: S, site_key: Option<String>) -> Self {
        let site_key = site_key.filter(|k| !k.is_empty());
        Self { identity, site_key, challenge_token: None, submitting: false, visible: false }
    }

    /// Form whose site key comes from the current site settings.
    pub fn from_settings(identity: S, feed: &SettingsFeed) -> Self {
        Self::new(identity, feed.challenge_site_key())
    }

    /// Pick up a changed site key; a new key invalidates any stored token.
    pub fn refresh_site_key(&mut self, feed: &SettingsFeed) {
        let key = feed.challenge_site_key().filter(|k| !k.is_empty());
        if key != self.site_key {
            self.site_key = key;
            self.reset_challenge();
        }
    }

    pub fn site_key(&self) -> Option<&str> {
        self.site_key.as_deref()
    }

    pub fn challenge_required(&self) -> bool {
        self.site_key.is_some()
    }

    pub fn has_challenge_token(&self) -> bool {
        self.challenge_token.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `Some(Redirect::Setup)` when the service has no accounts yet.
    pub async fn check_setup(&self) -> Result<Option<Redirect>> {
        let empty = self.identity.users_empty().await?;
        Ok(empty.then_some(Redirect::Setup))
    }

    /// Show the form, ending any existing session first.
    ///
    /// Also clears a submission left marked in flight by a dropped `submit` future.
    pub async fn start(&mut self) -> Result<()> {
        self.submitting = false;
        self.reset_challenge();
        let logout = self.identity.logout().await;
        self.visible = true;
        logout.map_err(Error::from)
    }

    /// Verify a challenge token; a rejected token clears the challenge.
    pub async fn on_challenge(&mut self, token: &str) -> Result<()> {
        match self.identity.verify_challenge(token).await {
            Ok(()) => {
                self.challenge_token = Some(token.to_string());
                Ok(())
            }
            Err(e) => {
                self.reset_challenge();
                Err(e.into())
            }
        }
    }

    pub fn reset_challenge(&mut self) {
        self.challenge_token = None;
    }

    /// Not already submitting, and holding a token whenever a challenge is configured.
    pub fn can_submit(&self) -> bool {
        !self.submitting && (!self.challenge_required() || self.has_challenge_token())
    }

    /// Validate and submit the credentials.
    ///
    /// Validation failures never reach the identity service. Once the service
    /// has been called the form is re-enabled and the challenge reset whatever
    /// the outcome.
    pub async fn submit(&mut self, credentials: &Credentials) -> Result<Redirect> {
        if self.submitting {
            return Err(ValidationError::Busy.into());
        }
        if !self.can_submit() {
            return Err(ValidationError::ChallengeRequired.into());
        }
        let credentials = credentials.validate()?;

        self.submitting = true;
        let outcome = self.identity.login_with_password(&credentials.email, &credentials.password).await;
        self.submitting = false;
        self.reset_challenge();

        match outcome {
            Ok(()) => Ok(Redirect::Back),
            Err(e) => Err(Error::ExternalService(e)),
        }
    }

    pub fn identity(&self) -> &S {
        &self.identity
    }
}
