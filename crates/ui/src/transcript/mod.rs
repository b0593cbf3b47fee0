//! Plain-text rendering of a reconstructed conversation.

mod display;
mod empty;

pub use display::{ResponseBlock, UtteranceLine};
pub use empty::EmptyState;

use botdesk_core::{Conversation, DisplayMode, Turn, reconstruct};

/// Default speaker name when the conversation has no user id
pub const DEFAULT_SPEAKER: &str = "User";

/// A conversation reconstructed for one display mode
#[derive(Debug, Clone)]
pub struct ConversationView {
    speaker: String,
    mode: DisplayMode,
    turns: Vec<Turn>,
}

impl ConversationView {
    pub fn new(conversation: &Conversation, mode: DisplayMode) -> Self {
        let speaker = conversation
            .user_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_SPEAKER.to_string());
        Self { speaker, mode, turns: reconstruct(conversation.events(), mode) }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// No turns at all; a turn whose responses print nothing still counts.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// One block per visible turn, separated by blank lines.
    ///
    /// The empty state is shown only when there are no turns.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return EmptyState::new(self.mode).to_string();
        }
        self.blocks().join("\n\n")
    }

    fn blocks(&self) -> Vec<String> {
        self.turns.iter().filter_map(|turn| self.render_turn(turn)).collect()
    }

    /// `None` when the turn has nothing visible.
    fn render_turn(&self, turn: &Turn) -> Option<String> {
        let mut lines = Vec::new();
        if let Some(says) = &turn.user_says {
            lines.push(UtteranceLine { speaker: &self.speaker, says }.to_string());
        }
        lines.extend(
            turn.bot_responses
                .iter()
                .map(ResponseBlock)
                .filter(|block| block.has_content())
                .map(|block| block.to_string()),
        );

        if lines.is_empty() { None } else { Some(lines.join("\n")) }
    }
}
