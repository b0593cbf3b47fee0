//! Site-wide settings and the feed that keeps them current.

use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Settings visible to unauthenticated pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicSettings {
    /// Site key of the human-verification challenge provider.
    #[serde(
        default,
        rename = "reCatpchaSiteKey",
        alias = "reCaptchaSiteKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub challenge_site_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsBody {
    #[serde(default)]
    pub public: PublicSettings,
}

/// The global settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub settings: SettingsBody,
}

impl SiteSettings {
    pub fn with_challenge_site_key(key: impl Into<String>) -> Self {
        Self {
            settings: SettingsBody { public: PublicSettings { challenge_site_key: Some(key.into()) } },
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// The challenge site key, when one is configured and non-empty.
    pub fn challenge_site_key(&self) -> Option<&str> {
        self.settings.public.challenge_site_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Publishing half of a settings subscription
#[derive(Debug)]
pub struct SettingsPublisher {
    tx: watch::Sender<Option<SiteSettings>>,
}

/// Subscribing half: always holds the latest published document
#[derive(Debug, Clone)]
pub struct SettingsFeed {
    rx: watch::Receiver<Option<SiteSettings>>,
}

/// Open a settings subscription. The feed starts out empty until the first publish.
pub fn settings_channel() -> (SettingsPublisher, SettingsFeed) {
    let (tx, rx) = watch::channel(None);
    (SettingsPublisher { tx }, SettingsFeed { rx })
}

impl SettingsPublisher {
    pub fn publish(&self, settings: SiteSettings) {
        self.tx.send_replace(Some(settings));
    }

    pub fn subscribe(&self) -> SettingsFeed {
        SettingsFeed { rx: self.tx.subscribe() }
    }
}

impl SettingsFeed {
    pub fn current(&self) -> Option<SiteSettings> {
        self.rx.borrow().clone()
    }

    pub fn challenge_site_key(&self) -> Option<String> {
        self.rx.borrow().as_ref().and_then(|s| s.challenge_site_key()).map(str::to_string)
    }

    /// Wait for the next published document.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| Error::Other("settings publisher dropped".to_string()))
    }
}
