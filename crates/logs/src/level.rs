use crate::error::LogError;

use serde::{Deserialize, Serialize};

/// Record severity, most important first.
///
/// Ordering follows importance: `Error < Warn < ... < Silly`. A logger with
/// minimum level `m` accepts every record whose level is `<= m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    #[default]
    Info,
    Http,
    Verbose,
    Debug,
    Silly,
}

impl Level {
    pub const VALUES: &[Level] =
        &[Level::Error, Level::Warn, Level::Info, Level::Http, Level::Verbose, Level::Debug, Level::Silly];

    /// The most verbose level; a channel at this minimum captures everything.
    pub const MOST_VERBOSE: Level = Level::Silly;

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Level::Error),
            "warn" | "warning" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "http" => Some(Level::Http),
            "verbose" => Some(Level::Verbose),
            "debug" => Some(Level::Debug),
            "silly" => Some(Level::Silly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Http => "http",
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Silly => "silly",
        }
    }

    /// Whether a record at `self` passes a channel whose minimum is `min`.
    pub fn passes(self, min: Level) -> bool {
        self <= min
    }

    /// Severity name understood by the remote log collector.
    pub fn collector_severity(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Http | Level::Verbose | Level::Debug | Level::Silly => "DEBUG",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse_str(s).ok_or_else(|| LogError::InvalidLevel(s.to_string()))
    }
}
