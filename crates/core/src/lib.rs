pub mod config;
pub mod conversation;
pub mod error;
pub mod example;
pub mod identity;
pub mod logging;
pub mod settings;
pub mod transcript;

pub use config::{Config, DiagnosticsSection, ViewerConfig};
pub use conversation::{Conversation, DialogueEvent, Entity, EventKind, Intent, ParseData, Tracker};
pub use error::{Error, ExternalServiceError, Result, ValidationError};
pub use example::{COMMAND_PREFIX, Example};
pub use identity::{IdentityService, ServiceResult};
pub use settings::{SettingsFeed, SettingsPublisher, SiteSettings, settings_channel};
pub use transcript::{BotResponse, DisplayMode, Turn, UserSays, reconstruct};
