use std::fmt;

use botdesk_core::{BotResponse, UserSays};
use serde_json::Value;

/// One user utterance: `<speaker> (<HH:MM:SS>) [<confidence>%]: <text> #<intent>`
#[derive(Debug, Clone, Copy)]
pub struct UtteranceLine<'a> {
    pub speaker: &'a str,
    pub says: &'a UserSays,
}

impl fmt::Display for UtteranceLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.speaker, self.says.timestamp.format("%H:%M:%S"))?;
        if let Some(confidence) = self.says.confidence {
            write!(f, " [{:.0}%]", confidence * 100.0)?;
        }

        if self.says.is_command() {
            return write!(f, ": [{}]", self.says.text());
        }

        write!(f, ": {}", self.says.text())?;
        if let Some(intent) = self.says.example.intent.as_deref().filter(|i| !i.is_empty()) {
            write!(f, " #{}", intent)?;
        }
        for entity in &self.says.example.entities {
            write!(f, " @{}={}", entity.entity, bare(&entity.value))?;
        }
        Ok(())
    }
}

/// One bot response: `Bot: <text>` and/or the payload as pretty JSON
#[derive(Debug, Clone, Copy)]
pub struct ResponseBlock<'a>(pub &'a BotResponse);

impl ResponseBlock<'_> {
    /// False when neither text nor a non-null payload would be printed.
    pub fn has_content(&self) -> bool {
        self.0.text().is_some() || self.0.cleaned_data().is_some()
    }
}

impl fmt::Display for ResponseBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if let Some(text) = self.0.text() {
            lines.push(format!("Bot: {}", text));
        }
        if let Some(data) = self.0.cleaned_data() {
            let pretty = serde_json::to_string_pretty(&Value::Object(data)).map_err(|_| fmt::Error)?;
            lines.push(format!("Bot [{}]:\n{}", self.0.kind(), pretty));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
