use serde::{Deserialize, Serialize};

/// Fields an application record may carry
pub const APPLICATION_KEYS: &[&str] = &[
    "message",
    "level",
    "userId",
    "fileName",
    "methodName",
    "url",
    "data",
    "timestamp",
    "callingArgs",
    "status",
    "error",
];

/// Fields an audit record may carry
pub const AUDIT_KEYS: &[&str] = &["level", "message", "status", "userId", "label", "type", "timestamp", "before", "after"];

/// A named logging stream with its own schema and sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Application,
    Audit,
}

impl Channel {
    pub const VALUES: &[Channel] = &[Channel::Application, Channel::Audit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Application => "application",
            Channel::Audit => "audit",
        }
    }

    pub fn allowed_keys(&self) -> &'static [&'static str] {
        match self {
            Channel::Application => APPLICATION_KEYS,
            Channel::Audit => AUDIT_KEYS,
        }
    }

    pub fn allows(&self, key: &str) -> bool {
        self.allowed_keys().contains(&key)
    }

    /// Stream name used by the remote collector when none is configured
    pub fn default_log_name(&self) -> &'static str {
        match self {
            Channel::Application => "botfront-log-app",
            Channel::Audit => "botfront-log-audit",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
