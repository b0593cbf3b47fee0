//! Line formatters for the two channels.

use crate::error::Result;
use crate::record::{ApplicationRecord, AuditRecord};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// RFC 3339 with millisecond precision, e.g. `2024-01-02T03:04:05.000Z`
pub fn render_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compact single-line JSON of the record; absent fields are omitted.
pub fn format_application(record: &ApplicationRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Human readable audit line:
///
/// `<timestamp> [<LABEL>] <level>: userId: <id> <type> <status> <message> before: <b> after: <a>`
///
/// Every segment after the colon appears only when its field is present and
/// non-empty, with exactly one space in front of it.
pub fn format_audit(record: &AuditRecord) -> String {
    let mut line = String::new();

    if let Some(ts) = &record.timestamp {
        line.push_str(&render_timestamp(ts));
        line.push(' ');
    }
    line.push_str(&format!("[{}] {}:", record.label.to_uppercase(), record.level));

    let segments = [
        non_empty(record.user_id.as_deref()).map(|id| format!("userId: {}", id)),
        non_empty(record.kind.as_deref()).map(str::to_string),
        record.status.as_ref().and_then(display_value),
        non_empty(record.message.as_deref()).map(str::to_string),
        additional_info(record),
    ];

    for segment in segments.into_iter().flatten() {
        line.push(' ');
        line.push_str(&segment);
    }
    line
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// `before: ..` and `after: ..` fragments, joined by a single space.
fn additional_info(record: &AuditRecord) -> Option<String> {
    let fragments: Vec<String> = [("before", &record.before), ("after", &record.after)]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().and_then(display_value).map(|v| format!("{}: {}", label, v)))
        .collect();

    if fragments.is_empty() { None } else { Some(fragments.join(" ")) }
}

/// Strings print bare, other values as compact JSON; null, false and "" print nothing.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
