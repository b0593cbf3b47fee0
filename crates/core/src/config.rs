use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::transcript::DisplayMode;

/// `[diagnostics]` section: the tool's own stderr tracing output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsSection {
    /// Filter directive, e.g. `warn` or `botdesk_logs=debug`
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format: `pretty`, `json` or `compact`
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self { level: default_level(), format: default_format() }
    }
}

/// `[viewer]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Display mode used when none is given on the command line
    #[serde(default)]
    pub mode: DisplayMode,
}

/// Root configuration structure for botdesk.toml
///
/// Unknown top-level tables are ignored so other components (the structured
/// logger reads `[logging]`) can share the same file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diagnostics: DiagnosticsSection,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(format!("TOML parse error: {}", e)))
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# botdesk configuration example

[diagnostics]
# Filter for the tool's own diagnostics (overridden by BOTDESK_LOG / RUST_LOG)
level = "warn"
# "pretty", "json" or "compact" (overridden by BOTDESK_LOG_FORMAT)
format = "pretty"

[viewer]
# "text" or "debug"
mode = "text"

# Structured log channels. Environment variables take precedence:
# APPLICATION_LOG_LEVEL, APPLICATION_LOG_TRANSPORT, AUDIT_LOG_TRANSPORT,
# APPLICATION_LOGGER_NAME, AUDIT_LOGGER_NAME, BOTDESK_COLLECTOR_DIR
[logging]
collector_dir = "logs"

[logging.application]
min_level = "silly"
transports = ["console"]
log_name = "botfront-log-app"

[logging.audit]
min_level = "silly"
transports = ["console"]
log_name = "botfront-log-audit"
"#
    }
}
