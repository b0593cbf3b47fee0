//! Channel configuration.
//!
//! Built once at process entry and handed to [`Loggers::from_config`](crate::Loggers::from_config).
//! Values come from defaults, then an optional `[logging]` TOML section, then
//! environment variables:
//!
//! - `APPLICATION_LOG_LEVEL`: minimum level of the application channel (default `silly`)
//! - `APPLICATION_LOG_TRANSPORT` / `AUDIT_LOG_TRANSPORT`: transports, matched by
//!   substring (`console`, `stackdriver` or `collector`); unset means console only
//! - `APPLICATION_LOGGER_NAME` / `AUDIT_LOGGER_NAME`: collector stream names
//! - `BOTDESK_COLLECTOR_DIR`: where collector files are written (default `logs`)
//!
//! ```toml
//! [logging]
//! collector_dir = "/var/log/botdesk"
//!
//! [logging.application]
//! min_level = "info"
//! transports = ["console", "collector"]
//! ```

use crate::channel::Channel;
use crate::error::{LogError, Result};
use crate::level::Level;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const APPLICATION_LOG_LEVEL: &str = "APPLICATION_LOG_LEVEL";
pub const APPLICATION_LOG_TRANSPORT: &str = "APPLICATION_LOG_TRANSPORT";
pub const AUDIT_LOG_TRANSPORT: &str = "AUDIT_LOG_TRANSPORT";
pub const APPLICATION_LOGGER_NAME: &str = "APPLICATION_LOGGER_NAME";
pub const AUDIT_LOGGER_NAME: &str = "AUDIT_LOGGER_NAME";
pub const COLLECTOR_DIR: &str = "BOTDESK_COLLECTOR_DIR";

/// Kind of sink a channel writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Console,
    #[serde(alias = "stackdriver")]
    Collector,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Console => "console",
            Transport::Collector => "collector",
        }
    }

    /// Transports named anywhere in `s`; unrecognised text selects nothing.
    pub fn parse_list(s: &str) -> Vec<Transport> {
        let s = s.to_lowercase();
        let mut transports = Vec::new();
        if s.contains("console") {
            transports.push(Transport::Console);
        }
        if s.contains("stackdriver") || s.contains("collector") {
            transports.push(Transport::Collector);
        }
        transports
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelConfig {
    pub min_level: Level,
    pub transports: Vec<Transport>,
    /// Stream name at the remote collector
    pub log_name: String,
}

impl ChannelConfig {
    /// Console only, capturing everything.
    pub fn defaults(channel: Channel) -> Self {
        Self {
            min_level: Level::MOST_VERBOSE,
            transports: vec![Transport::Console],
            log_name: channel.default_log_name().to_string(),
        }
    }

    fn apply(&mut self, overrides: ChannelOverrides) {
        if let Some(level) = overrides.min_level {
            self.min_level = level;
        }
        if let Some(transports) = overrides.transports {
            self.transports = transports;
        }
        if let Some(log_name) = overrides.log_name {
            self.log_name = log_name;
        }
    }
}

/// Configuration of both channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerConfig {
    /// Directory the collector sink writes into
    pub collector_dir: PathBuf,
    pub application: ChannelConfig,
    pub audit: ChannelConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            collector_dir: PathBuf::from("logs"),
            application: ChannelConfig::defaults(Channel::Application),
            audit: ChannelConfig::defaults(Channel::Audit),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    logging: Option<LoggingSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    #[serde(default)]
    application: Option<ChannelOverrides>,
    #[serde(default)]
    audit: Option<ChannelOverrides>,
    #[serde(default)]
    collector_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChannelOverrides {
    #[serde(default)]
    min_level: Option<Level>,
    #[serde(default)]
    transports: Option<Vec<Transport>>,
    #[serde(default)]
    log_name: Option<String>,
}

impl LoggerConfig {
    pub fn channel(&self, channel: Channel) -> &ChannelConfig {
        match channel {
            Channel::Application => &self.application,
            Channel::Audit => &self.audit,
        }
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay_env()
    }

    /// Defaults overlaid with the `[logging]` section of a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let document: Document =
            toml::from_str(toml_str).map_err(|e| LogError::Config(format!("TOML parse error: {}", e)))?;

        let mut config = Self::default();
        if let Some(section) = document.logging {
            if let Some(application) = section.application {
                config.application.apply(application);
            }
            if let Some(audit) = section.audit {
                config.audit.apply(audit);
            }
            if let Some(dir) = section.collector_dir {
                config.collector_dir = dir;
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Overlay variables from `lookup`; empty values count as unset.
    pub fn overlay_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(level) = var(APPLICATION_LOG_LEVEL) {
            self.application.min_level = level.parse()?;
        }
        if let Some(transports) = var(APPLICATION_LOG_TRANSPORT) {
            self.application.transports = Transport::parse_list(&transports);
        }
        if let Some(transports) = var(AUDIT_LOG_TRANSPORT) {
            self.audit.transports = Transport::parse_list(&transports);
        }
        if let Some(name) = var(APPLICATION_LOGGER_NAME) {
            self.application.log_name = name;
        }
        if let Some(name) = var(AUDIT_LOGGER_NAME) {
            self.audit.log_name = name;
        }
        if let Some(dir) = var(COLLECTOR_DIR) {
            self.collector_dir = PathBuf::from(dir);
        }

        Ok(self)
    }

    /// Overlay the process environment.
    pub fn overlay_env(self) -> Result<Self> {
        self.overlay_vars(|name| env::var(name).ok())
    }
}
