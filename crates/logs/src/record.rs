//! Typed log records, one struct per channel.
//!
//! A typed record cannot carry a field outside its channel's allow-list. Records
//! that arrive as dynamic JSON go through `from_json`, which checks every key
//! against the allow-list before deserializing.

use crate::channel::Channel;
use crate::error::{LogError, Result};
use crate::format::{self, render_timestamp};
use crate::level::Level;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A record bound to one channel
pub trait ChannelRecord: Sized {
    const CHANNEL: Channel;

    /// Parse a dynamic record, rejecting keys outside the allow-list.
    fn from_json(value: Value) -> Result<Self>;

    fn level(&self) -> Level;

    fn timestamp(&self) -> Option<DateTime<Utc>>;

    fn set_timestamp(&mut self, at: DateTime<Utc>);

    /// Render the record as a single line.
    fn format(&self) -> Result<String>;
}

/// Allow-list check followed by deserialization
fn checked<R: DeserializeOwned>(channel: Channel, value: Value) -> Result<R> {
    let Some(fields) = value.as_object() else {
        return Err(LogError::NotAnObject { channel });
    };
    if let Some(key) = fields.keys().find(|key| !channel.allows(key)) {
        return Err(LogError::schema_violation(channel, key.as_str()));
    }
    Ok(serde_json::from_value(value)?)
}

fn serialize_timestamp<S: Serializer>(ts: &Option<DateTime<Utc>>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serializer.serialize_str(&render_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}

/// Record on the `application` channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationRecord {
    #[serde(default)]
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calling_args: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self { level, message: Some(message.into()), ..Self::default() }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Source location: file and method that emitted the record
    pub fn with_origin(mut self, file_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self.method_name = Some(method_name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_calling_args(mut self, args: Value) -> Self {
        self.calling_args = Some(args);
        self
    }

    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl ChannelRecord for ApplicationRecord {
    const CHANNEL: Channel = Channel::Application;

    fn from_json(value: Value) -> Result<Self> {
        checked(Self::CHANNEL, value)
    }

    fn level(&self) -> Level {
        self.level
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    fn set_timestamp(&mut self, at: DateTime<Utc>) {
        self.timestamp = Some(at);
    }

    fn format(&self) -> Result<String> {
        format::format_application(self)
    }
}

/// Record on the `audit` channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditRecord {
    #[serde(default)]
    pub level: Level,
    /// Area of the product the action touched (e.g. `auth`, `project`)
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Kind of action (e.g. `created`, `updated`, `deleted`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AuditRecord {
    pub fn new(level: Level, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level, label: label.into(), message: Some(message.into()), ..Self::default() }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// State before and after the audited change
    pub fn with_change(mut self, before: impl Into<Value>, after: impl Into<Value>) -> Self {
        self.before = Some(before.into());
        self.after = Some(after.into());
        self
    }

    pub fn with_before(mut self, before: impl Into<Value>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<Value>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl ChannelRecord for AuditRecord {
    const CHANNEL: Channel = Channel::Audit;

    fn from_json(value: Value) -> Result<Self> {
        checked(Self::CHANNEL, value)
    }

    fn level(&self) -> Level {
        self.level
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    fn set_timestamp(&mut self, at: DateTime<Utc>) {
        self.timestamp = Some(at);
    }

    fn format(&self) -> Result<String> {
        Ok(format::format_audit(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_application_from_json() {
        let record = ApplicationRecord::from_json(json!({
            "level": "error",
            "message": "upload failed",
            "userId": "u-1",
            "fileName": "projects.js",
            "methodName": "importProject",
            "callingArgs": { "projectId": "p-1" },
            "status": 500,
            "timestamp": "2024-01-02T03:04:05.678Z"
        }))
        .unwrap();

        assert_eq!(record.level, Level::Error);
        assert_eq!(record.message.as_deref(), Some("upload failed"));
        assert_eq!(record.method_name.as_deref(), Some("importProject"));
        assert_eq!(record.status, Some(json!(500)));
        assert_eq!(record.timestamp.unwrap().timestamp_subsec_millis(), 678);
    }

    #[test]
    fn test_application_rejects_foreign_key() {
        let err = ApplicationRecord::from_json(json!({ "message": "x", "foo": "y" })).unwrap_err();
        assert!(matches!(
            &err,
            LogError::SchemaViolation { channel: Channel::Application, key } if key == "foo"
        ));
    }

    #[test]
    fn test_audit_rejects_application_only_key() {
        let err = AuditRecord::from_json(json!({ "label": "auth", "url": "/login" })).unwrap_err();
        assert!(matches!(
            &err,
            LogError::SchemaViolation { channel: Channel::Audit, key } if key == "url"
        ));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = AuditRecord::from_json(json!(["level", "info"])).unwrap_err();
        assert!(matches!(err, LogError::NotAnObject { channel: Channel::Audit }));
    }

    #[test]
    fn test_invalid_level_is_json_error() {
        let err = ApplicationRecord::from_json(json!({ "level": "loud" })).unwrap_err();
        assert!(matches!(err, LogError::Json(_)));
    }

    #[test]
    fn test_audit_from_json_type_field() {
        let record = AuditRecord::from_json(json!({
            "level": "info",
            "label": "project",
            "type": "deleted",
            "before": { "name": "demo" }
        }))
        .unwrap();

        assert_eq!(record.kind.as_deref(), Some("deleted"));
        assert_eq!(record.before, Some(json!({ "name": "demo" })));
        assert!(record.after.is_none());
    }

    #[test]
    fn test_builders() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let record = ApplicationRecord::new(Level::Warn, "slow query")
            .with_user_id("u-9")
            .with_origin("db.rs", "query")
            .with_url("/api/projects")
            .with_data(json!({ "ms": 1200 }))
            .with_calling_args(json!(["p-1"]))
            .with_status(200)
            .with_error("timeout")
            .at(at);

        assert_eq!(record.file_name.as_deref(), Some("db.rs"));
        assert_eq!(record.error, Some(json!("timeout")));
        assert_eq!(ChannelRecord::timestamp(&record), Some(at));

        let audit = AuditRecord::new(Level::Info, "auth", "login").with_kind("session").with_change("a", "b");
        assert_eq!(audit.before, Some(json!("a")));
        assert_eq!(audit.after, Some(json!("b")));
    }

    #[test]
    fn test_set_timestamp() {
        let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut record = AuditRecord::new(Level::Info, "auth", "login");
        assert!(ChannelRecord::timestamp(&record).is_none());
        record.set_timestamp(at);
        assert_eq!(record.timestamp, Some(at));
    }
}
