use crate::conversation::DialogueEvent;
use crate::error::Error;
use crate::example::{self, Example};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How much of the tracker a transcript shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Dialogue only: user utterances and bot messages
    #[default]
    Text,
    /// Dialogue plus every other engine event
    Debug,
}

impl DisplayMode {
    pub const VALUES: &[DisplayMode] = &[DisplayMode::Text, DisplayMode::Debug];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Text => "text",
            DisplayMode::Debug => "debug",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, DisplayMode::Debug)
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DisplayMode::Text),
            "debug" => Ok(DisplayMode::Debug),
            _ => Err(Error::Parse(format!("invalid display mode: {}", s))),
        }
    }
}

/// The user side of a turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSays {
    pub example: Example,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl UserSays {
    /// Interpret a `user` event; `None` when it carries no text.
    pub fn from_event(event: &DialogueEvent) -> Option<Self> {
        let text = event.text().filter(|t| !t.is_empty())?;
        let parse_data = event.parse_data();

        Some(Self {
            example: Example::from_parse_data(parse_data, text),
            timestamp: unix_seconds(event.timestamp()),
            confidence: example::confidence(parse_data),
        })
    }

    pub fn text(&self) -> &str {
        &self.example.text
    }

    pub fn is_command(&self) -> bool {
        self.example.is_command()
    }
}

/// Seconds since the epoch as a UTC date-time; out of range values map to the epoch.
fn unix_seconds(seconds: f64) -> DateTime<Utc> {
    if !seconds.is_finite() {
        return DateTime::default();
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or_default()
}

/// One entry on the bot side of a turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotResponse {
    /// A bot utterance
    BotData {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Map<String, Value>>,
    },
    /// A non-dialogue event echoed in debug mode
    Event { data: Value },
}

impl BotResponse {
    pub fn bot_data(event: &DialogueEvent) -> Self {
        Self::BotData { text: event.text().map(str::to_string), data: event.data().cloned() }
    }

    pub fn event(event: &DialogueEvent) -> Self {
        Self::Event { data: event.raw().clone() }
    }

    /// Wire name of the response type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BotData { .. } => "bot_data",
            Self::Event { .. } => "event",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::BotData { text, .. } => text.as_deref().filter(|t| !t.is_empty()),
            Self::Event { .. } => None,
        }
    }

    /// A response with neither text nor data has nothing to show.
    pub fn is_displayable(&self) -> bool {
        match self {
            Self::BotData { data, .. } => self.text().is_some() || data.is_some(),
            Self::Event { data } => !data.is_null(),
        }
    }

    /// Copy of the structured payload with null-valued keys removed.
    ///
    /// The response itself is left untouched; `None` when nothing remains.
    pub fn cleaned_data(&self) -> Option<Map<String, Value>> {
        let data = match self {
            Self::BotData { data, .. } => data.as_ref()?,
            Self::Event { data } => data.as_object()?,
        };

        let cleaned: Map<String, Value> =
            data.iter().filter(|(_, v)| !v.is_null()).map(|(k, v)| (k.clone(), v.clone())).collect();

        if cleaned.is_empty() { None } else { Some(cleaned) }
    }
}

/// A user utterance and the bot activity that followed it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub user_says: Option<UserSays>,
    pub bot_responses: Vec<BotResponse>,
}

impl Turn {
    pub fn starting_with(user_says: UserSays) -> Self {
        Self { user_says: Some(user_says), bot_responses: Vec::new() }
    }

    /// No utterance and no responses yet.
    pub fn is_empty(&self) -> bool {
        self.user_says.is_none() && self.bot_responses.is_empty()
    }

    pub fn with_user_says(self, user_says: UserSays) -> Self {
        Self { user_says: Some(user_says), ..self }
    }

    pub fn push_response(mut self, response: BotResponse) -> Self {
        self.bot_responses.push(response);
        self
    }
}
