use crate::channel::Channel;
use crate::config::{ChannelConfig, LoggerConfig, Transport};
use crate::error::Result;
use crate::level::Level;
use crate::record::{ApplicationRecord, AuditRecord, ChannelRecord};
use crate::sink::{CollectorSink, ConsoleSink, Sink, SinkEntry};

use chrono::Utc;
use serde_json::Value;
use std::marker::PhantomData;
use std::path::Path;

/// What happened to a record handed to a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Below the channel's minimum level; nothing was formatted
    Filtered,
    /// Formatted and offered to every sink; `sinks` accepted it
    Delivered { sinks: usize },
}

/// Logger for one channel: filter, format, fan out to sinks
pub struct ChannelLogger<R> {
    min_level: Level,
    sinks: Vec<Box<dyn Sink>>,
    _record: PhantomData<fn(R)>,
}

pub type ApplicationLogger = ChannelLogger<ApplicationRecord>;
pub type AuditLogger = ChannelLogger<AuditRecord>;

impl<R: ChannelRecord> ChannelLogger<R> {
    /// A logger with no sinks
    pub fn new(min_level: Level) -> Self {
        Self { min_level, sinks: Vec::new(), _record: PhantomData }
    }

    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the sinks `config` asks for.
    pub fn from_config(config: &ChannelConfig, collector_dir: &Path) -> Result<Self> {
        let mut logger = Self::new(config.min_level);
        for transport in &config.transports {
            logger = match transport {
                Transport::Console => logger.with_sink(ConsoleSink::stdout()),
                Transport::Collector => logger.with_sink(CollectorSink::open(collector_dir, &config.log_name)?),
            };
        }
        tracing::debug!(
            channel = %R::CHANNEL,
            min_level = %config.min_level,
            sinks = logger.sinks.len(),
            "channel logger ready"
        );
        Ok(logger)
    }

    pub fn channel(&self) -> Channel {
        R::CHANNEL
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.min_level)
    }

    /// Stamp, filter, format and dispatch one record.
    ///
    /// Formatting happens before any sink sees the line, so a formatting error
    /// reaches no sink. A failing sink is reported and skipped; the others
    /// still receive the line.
    pub fn log(&self, mut record: R) -> Result<Dispatch> {
        if !self.enabled(record.level()) {
            return Ok(Dispatch::Filtered);
        }

        let timestamp = match record.timestamp() {
            Some(ts) => ts,
            None => {
                let now = Utc::now();
                record.set_timestamp(now);
                now
            }
        };
        let line = record.format()?;
        let entry = SinkEntry { channel: R::CHANNEL, level: record.level(), timestamp, line: &line };

        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.write(&entry) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(channel = %R::CHANNEL, sink = sink.name(), error = %e, "log sink write failed"),
            }
        }
        Ok(Dispatch::Delivered { sinks: delivered })
    }

    /// Validate a dynamic record against the channel allow-list, then log it.
    pub fn log_json(&self, value: Value) -> Result<Dispatch> {
        self.log(R::from_json(value)?)
    }
}

impl<R> std::fmt::Debug for ChannelLogger<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelLogger")
            .field("min_level", &self.min_level)
            .field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Both channel loggers, built once at process entry and passed by reference
#[derive(Debug)]
pub struct Loggers {
    pub application: ApplicationLogger,
    pub audit: AuditLogger,
}

impl Loggers {
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Ok(Self {
            application: ChannelLogger::from_config(&config.application, &config.collector_dir)?,
            audit: ChannelLogger::from_config(&config.audit, &config.collector_dir)?,
        })
    }

    /// Route a dynamic record to the named channel.
    pub fn log_json(&self, channel: Channel, value: Value) -> Result<Dispatch> {
        match channel {
            Channel::Application => self.application.log_json(value),
            Channel::Audit => self.audit.log_json(value),
        }
    }
}
