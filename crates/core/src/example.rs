use crate::conversation::{Entity, ParseData};

use serde::Serialize;

/// Prefix marking an utterance as a raw command (e.g. `/greet{"name": "bob"}`)
pub const COMMAND_PREFIX: char = '/';

/// A user utterance as interpreted by the NLU parser
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Example {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

impl Example {
    /// Build an example from a parse result, using `fallback_text` when the
    /// parser did not echo the text back.
    pub fn from_parse_data(parse_data: Option<&ParseData>, fallback_text: &str) -> Self {
        let Some(parse_data) = parse_data else {
            return Self { text: fallback_text.to_string(), ..Self::default() };
        };

        let text = parse_data
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback_text)
            .to_string();
        let intent = parse_data.intent.as_ref().and_then(|i| i.name.clone());

        Self { text, intent, entities: parse_data.entities.clone() }
    }

    /// Commands are shown literally rather than as natural language.
    pub fn is_command(&self) -> bool {
        self.text.starts_with(COMMAND_PREFIX)
    }
}

/// Intent confidence reported by the parser, if any.
pub fn confidence(parse_data: Option<&ParseData>) -> Option<f64> {
    parse_data.and_then(|p| p.intent.as_ref()).and_then(|i| i.confidence)
}
