//! Diagnostic logging for the botdesk tools themselves.
//!
//! This is the `tracing` output of the process (what the tools are doing), not
//! the structured application/audit channels, which live in `botdesk-logs`.
//!
//! # Environment Variables
//!
//! - `BOTDESK_LOG`: Filter directive (like `RUST_LOG`), e.g., `botdesk_logs=debug`
//! - `BOTDESK_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//!
//! # Example
//!
//! ```no_run
//! use botdesk_core::logging::{self, DiagnosticsConfig};
//!
//! logging::init_diagnostics(Some(DiagnosticsConfig::default().with_level("info")))?;
//! # Ok::<(), botdesk_core::Error>(())
//! ```

use crate::Error;
use crate::config::DiagnosticsSection;
use std::env;
use std::io;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Resolved diagnostics settings
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Default filter when no environment override is present.
    pub level: String,
    /// Requested output format; `None` picks one from the terminal.
    pub format: Option<LogFormat>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: None }
    }
}

impl From<DiagnosticsSection> for DiagnosticsConfig {
    fn from(section: DiagnosticsSection) -> Self {
        Self { level: section.level, format: LogFormat::parse_str(&section.format) }
    }
}

impl DiagnosticsConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Filter directive: `BOTDESK_LOG`, then `RUST_LOG`, then the configured level.
    fn filter_directive(&self) -> String {
        env::var("BOTDESK_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, Error> {
        EnvFilter::try_new(self.filter_directive())
            .map_err(|e| Error::Config(format!("invalid diagnostics filter: {}", e)))
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// `BOTDESK_LOG_FORMAT` wins, then the configured format, then TTY detection.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("BOTDESK_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if let Some(format) = self.format {
            return format;
        }

        if Self::is_tty() { LogFormat::Pretty } else { LogFormat::Compact }
    }
}

/// Install the global tracing subscriber writing to stderr.
pub fn init_diagnostics(config: Option<DiagnosticsConfig>) -> Result<(), Error> {
    let config = config.unwrap_or_default();
    let env_filter = config.build_env_filter()?;
    let registry = Registry::default().with(env_filter);

    let installed = match config.detect_format() {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(io::stderr)).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact().with_writer(io::stderr)).try_init(),
    };

    installed.map_err(|e| Error::Config(format!("failed to install diagnostics subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str("Compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse_str("invalid"), None);
    }

    #[test]
    fn test_log_format_as_str() {
        for format in LogFormat::VALUES {
            assert_eq!(LogFormat::parse_str(format.as_str()), Some(*format));
        }
    }

    #[test]
    fn test_diagnostics_config_default() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.level, "warn");
        assert!(config.format.is_none());
    }

    #[test]
    fn test_diagnostics_config_from_section() {
        let config = DiagnosticsConfig::from(DiagnosticsSection { level: "debug".to_string(), format: "json".to_string() });
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, Some(LogFormat::Json));

        let config =
            DiagnosticsConfig::from(DiagnosticsSection { level: "info".to_string(), format: "fancy".to_string() });
        assert!(config.format.is_none());
    }

    #[test]
    fn test_diagnostics_config_builder() {
        let config = DiagnosticsConfig::default().with_level("trace").with_format(LogFormat::Compact);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, Some(LogFormat::Compact));
    }
}
