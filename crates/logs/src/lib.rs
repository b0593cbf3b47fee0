//! Structured application and audit logging.
//!
//! Two fixed channels, each with a typed record, a line format, a minimum level
//! and a list of sinks:
//!
//! - `application`: compact JSON lines
//! - `audit`: `<timestamp> [<LABEL>] <level>: ...` lines
//!
//! # Example
//!
//! ```no_run
//! use botdesk_logs::{AuditRecord, Level, LoggerConfig, Loggers};
//!
//! let loggers = Loggers::from_config(&LoggerConfig::from_env()?)?;
//! loggers.audit.log(AuditRecord::new(Level::Info, "project", "renamed").with_change("old", "new"))?;
//! # Ok::<(), botdesk_logs::LogError>(())
//! ```

mod channel;
mod config;
mod error;
mod format;
mod level;
mod logger;
mod record;
mod sink;

pub use channel::{APPLICATION_KEYS, AUDIT_KEYS, Channel};
pub use config::{ChannelConfig, LoggerConfig, Transport};
pub use error::{LogError, Result};
pub use format::{format_application, format_audit, render_timestamp};
pub use level::Level;
pub use logger::{ApplicationLogger, AuditLogger, ChannelLogger, Dispatch, Loggers};
pub use record::{ApplicationRecord, AuditRecord, ChannelRecord};
pub use sink::{CollectorSink, ConsoleSink, MemorySink, Sink, SinkEntry};
