//! Output sinks for formatted log lines.
//!
//! - [`ConsoleSink`] writes each line to stdout (or any writer)
//! - [`CollectorSink`] appends collector entries to a daily rolling file that an
//!   external agent ships to the remote log collector
//! - [`MemorySink`] keeps lines in memory, for embedding and tests

use crate::channel::Channel;
use crate::error::{LogError, Result};
use crate::format::render_timestamp;
use crate::level::Level;

use chrono::{DateTime, Utc};
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// One formatted line on its way to a sink
#[derive(Debug, Clone, Copy)]
pub struct SinkEntry<'a> {
    pub channel: Channel,
    pub level: Level,
    pub timestamp: DateTime<Utc>,
    pub line: &'a str,
}

/// Destination for formatted log lines
pub trait Sink: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    fn write(&self, entry: &SinkEntry<'_>) -> Result<()>;
}

/// Writes one line per record to stdout
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self { writer: Mutex::new(Box::new(writer)) }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, entry: &SinkEntry<'_>) -> Result<()> {
        let mut writer = self.writer.lock().map_err(|_| LogError::sink("console", "writer lock poisoned"))?;
        writeln!(writer, "{}", entry.line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Feeds the remote log collector.
///
/// Each line becomes one JSON entry `{logName, severity, timestamp, channel,
/// message}` appended to `<dir>/<log_name>.log.<date>`. Delivery from there is
/// the shipping agent's job. The background writer never drops lines: when its
/// queue is full, `write` waits for room.
pub struct CollectorSink {
    log_name: String,
    writer: NonBlocking,
    _guard: WorkerGuard,
}

impl CollectorSink {
    pub fn open(dir: &Path, log_name: impl Into<String>) -> Result<Self> {
        let log_name = log_name.into();
        std::fs::create_dir_all(dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(format!("{}.log", log_name))
            .build(dir)
            .map_err(|e| LogError::sink("collector", e.to_string()))?;
        let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(appender);

        Ok(Self { log_name, writer, _guard: guard })
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }
}

impl std::fmt::Debug for CollectorSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorSink").field("log_name", &self.log_name).finish_non_exhaustive()
    }
}

impl Sink for CollectorSink {
    fn name(&self) -> &str {
        "collector"
    }

    fn write(&self, entry: &SinkEntry<'_>) -> Result<()> {
        let record = json!({
            "logName": self.log_name,
            "severity": entry.level.collector_severity(),
            "timestamp": render_timestamp(&entry.timestamp),
            "channel": entry.channel,
            "message": entry.line,
        });
        let mut payload = serde_json::to_vec(&record)?;
        payload.push(b'\n');

        let mut writer = self.writer.clone();
        writer.write_all(&payload)?;
        Ok(())
    }
}

/// Keeps every line in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn write(&self, entry: &SinkEntry<'_>) -> Result<()> {
        self.lines
            .lock()
            .map_err(|_| LogError::sink("memory", "buffer lock poisoned"))?
            .push(entry.line.to_string());
        Ok(())
    }
}
