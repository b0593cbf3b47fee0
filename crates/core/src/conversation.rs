//! Conversation tracker model.
//!
//! Events arrive from the conversation engine as loosely shaped JSON. Parsing is
//! tolerant: absent or mistyped optional fields become empty values, and the raw
//! event is kept verbatim so debug views can echo it.

use crate::error::Result;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::path::Path;

/// Kind of a dialogue event, taken from its `event` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Something the end user said
    User,
    /// Something the bot uttered
    Bot,
    /// Any other engine event (actions, slots, resets, ...)
    Other(String),
}

impl EventKind {
    pub fn parse_str(s: &str) -> Self {
        match s {
            "user" => EventKind::User,
            "bot" => EventKind::Bot,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::User => "user",
            EventKind::Bot => "bot",
            EventKind::Other(name) => name,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intent classification attached to a user utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Entity extracted from a user utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

/// NLU parse result carried by `user` events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Intent {
    /// Read each field on its own; a mistyped field is dropped, not the intent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self {
            name: fields.get("name").and_then(Value::as_str).map(str::to_string),
            confidence: fields.get("confidence").and_then(Value::as_f64),
        })
    }
}

impl Entity {
    /// `None` without an `entity` name; mistyped offsets are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let offset = |key: &str| fields.get(key).and_then(Value::as_u64).and_then(|n| usize::try_from(n).ok());

        Some(Self {
            entity: fields.get("entity").and_then(Value::as_str)?.to_string(),
            value: fields.get("value").cloned().unwrap_or_default(),
            start: offset("start"),
            end: offset("end"),
        })
    }
}

impl ParseData {
    /// Tolerant reading of a parse result.
    ///
    /// `text`, `intent` and `entities` are read independently, and only the
    /// entities that cannot be read are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let entities = fields
            .get("entities")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Entity::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            text: fields.get("text").and_then(Value::as_str).map(str::to_string),
            intent: fields.get("intent").and_then(Intent::from_value),
            entities,
        })
    }
}

/// One record in a conversation's event history
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEvent {
    kind: EventKind,
    text: Option<String>,
    data: Option<Map<String, Value>>,
    timestamp: f64,
    parse_data: Option<ParseData>,
    raw: Value,
}

impl DialogueEvent {
    /// Build an event from its raw JSON form.
    pub fn from_value(raw: Value) -> Self {
        let kind = raw
            .get("event")
            .and_then(Value::as_str)
            .map(EventKind::parse_str)
            .unwrap_or_else(|| EventKind::Other(String::new()));
        let text = raw.get("text").and_then(Value::as_str).map(str::to_string);
        let data = raw.get("data").and_then(Value::as_object).cloned();
        let timestamp = raw.get("timestamp").and_then(Value::as_f64).unwrap_or_default();
        let parse_data = raw.get("parse_data").and_then(ParseData::from_value);

        Self { kind, text, data, timestamp, parse_data, raw }
    }

    /// A `user` event whose parse result echoes the text.
    pub fn user(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::from_value(json!({ "event": "user", "text": text, "parse_data": { "text": text } }))
    }

    /// A `bot` event with text only.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::from_value(json!({ "event": "bot", "text": text.into() }))
    }

    /// A non-dialogue event such as `action` or `slot`.
    pub fn other(kind: impl Into<String>) -> Self {
        Self::from_value(json!({ "event": kind.into() }))
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True when the event carries a non-empty text payload.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Seconds since the unix epoch; 0 when the engine did not record one.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn parse_data(&self) -> Option<&ParseData> {
        self.parse_data.as_ref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Serialize for DialogueEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DialogueEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Event history of one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub events: Vec<DialogueEvent>,
}

/// A conversation as supplied by the conversation store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Conversation {
    pub fn new(events: Vec<DialogueEvent>) -> Self {
        Self { tracker: Tracker { events }, user_id: None }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn events(&self) -> &[DialogueEvent] {
        &self.tracker.events
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_parse() {
        assert_eq!(EventKind::parse_str("user"), EventKind::User);
        assert_eq!(EventKind::parse_str("bot"), EventKind::Bot);
        assert_eq!(EventKind::parse_str("action"), EventKind::Other("action".to_string()));
        assert_eq!(EventKind::Other("slot".to_string()).as_str(), "slot");
    }

    #[test]
    fn test_user_event_from_value() {
        let event = DialogueEvent::from_value(json!({
            "event": "user",
            "text": "hello there",
            "timestamp": 1_551_952_000.5,
            "parse_data": {
                "text": "hello there",
                "intent": { "name": "greet", "confidence": 0.93 },
                "entities": [{ "entity": "name", "value": "there", "start": 6, "end": 11 }]
            }
        }));

        assert_eq!(event.kind(), &EventKind::User);
        assert_eq!(event.text(), Some("hello there"));
        assert!(event.has_text());
        assert_eq!(event.timestamp(), 1_551_952_000.5);

        let parse_data = event.parse_data().unwrap();
        let intent = parse_data.intent.as_ref().unwrap();
        assert_eq!(intent.name.as_deref(), Some("greet"));
        assert_eq!(intent.confidence, Some(0.93));
        assert_eq!(parse_data.entities.len(), 1);
        assert_eq!(parse_data.entities[0].start, Some(6));
    }

    #[test]
    fn test_malformed_event_is_tolerated() {
        let event = DialogueEvent::from_value(json!({
            "text": 42,
            "data": "not an object",
            "timestamp": "yesterday",
            "parse_data": { "entities": "nope" }
        }));

        assert_eq!(event.kind(), &EventKind::Other(String::new()));
        assert_eq!(event.text(), None);
        assert!(!event.has_text());
        assert!(event.data().is_none());
        assert_eq!(event.timestamp(), 0.0);
        assert_eq!(event.parse_data(), Some(&ParseData::default()));
    }

    #[test]
    fn test_parse_data_keeps_valid_parts() {
        let event = DialogueEvent::from_value(json!({
            "event": "user",
            "text": "book Paris for 2",
            "parse_data": {
                "text": "book Paris for 2",
                "intent": { "name": "book", "confidence": 0.9 },
                "entities": [
                    { "value": "Paris", "start": 5, "end": 10 },
                    { "entity": "city", "value": "Paris", "start": -5, "end": 10.5 },
                    { "entity": "guests", "value": 2, "start": 15, "end": 16 },
                    "junk"
                ]
            }
        }));

        let parse_data = event.parse_data().unwrap();
        assert_eq!(parse_data.text.as_deref(), Some("book Paris for 2"));
        let intent = parse_data.intent.as_ref().unwrap();
        assert_eq!(intent.name.as_deref(), Some("book"));
        assert_eq!(intent.confidence, Some(0.9));

        assert_eq!(parse_data.entities.len(), 2);
        assert_eq!(parse_data.entities[0].entity, "city");
        assert_eq!(parse_data.entities[0].start, None);
        assert_eq!(parse_data.entities[0].end, None);
        assert_eq!(parse_data.entities[1].entity, "guests");
        assert_eq!(parse_data.entities[1].start, Some(15));
    }

    #[test]
    fn test_mistyped_confidence_keeps_intent_name() {
        let event = DialogueEvent::from_value(json!({
            "event": "user",
            "text": "hi",
            "parse_data": { "intent": { "name": "greet", "confidence": "high" }, "entities": [{ "start": 0 }] }
        }));

        let parse_data = event.parse_data().unwrap();
        let intent = parse_data.intent.as_ref().unwrap();
        assert_eq!(intent.name.as_deref(), Some("greet"));
        assert_eq!(intent.confidence, None);
        assert!(parse_data.entities.is_empty());
    }

    #[test]
    fn test_non_object_event() {
        let event = DialogueEvent::from_value(json!("garbage"));
        assert_eq!(event.kind(), &EventKind::Other(String::new()));
        assert_eq!(event.raw(), &json!("garbage"));
    }

    #[test]
    fn test_empty_text_is_not_text() {
        let event = DialogueEvent::from_value(json!({ "event": "user", "text": "" }));
        assert!(!event.has_text());
    }

    #[test]
    fn test_raw_round_trips_through_serde() {
        let raw = json!({ "event": "slot", "name": "city", "value": "Paris", "timestamp": 3.0 });
        let event: DialogueEvent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn test_conversation_from_json() {
        let conversation = Conversation::from_json_str(
            r#"{
                "userId": "u-1",
                "tracker": { "events": [
                    { "event": "user", "text": "hi" },
                    { "event": "bot", "text": "hello", "data": { "buttons": null } }
                ] }
            }"#,
        )
        .unwrap();

        assert_eq!(conversation.user_id.as_deref(), Some("u-1"));
        assert_eq!(conversation.events().len(), 2);
        assert_eq!(conversation.events()[1].kind(), &EventKind::Bot);
        assert!(conversation.events()[1].data().unwrap().contains_key("buttons"));
    }

    #[test]
    fn test_conversation_missing_tracker() {
        let conversation = Conversation::from_json_str("{}").unwrap();
        assert!(conversation.events().is_empty());
        assert!(conversation.user_id.is_none());
    }

    #[test]
    fn test_conversation_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation.json");
        std::fs::write(&path, r#"{"tracker":{"events":[{"event":"action","name":"action_listen"}]}}"#).unwrap();

        let conversation = Conversation::from_file(&path).unwrap();
        assert_eq!(conversation.events()[0].kind().as_str(), "action");
    }
}
