use std::fmt;

use botdesk_core::DisplayMode;

/// Placeholder shown when a conversation has nothing to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    mode: DisplayMode,
}

impl EmptyState {
    pub const HEADER: &'static str = "No events to show";

    pub fn new(mode: DisplayMode) -> Self {
        Self { mode }
    }

    pub fn header(&self) -> &'static str {
        Self::HEADER
    }

    /// Hint pointing at the other place to look
    pub fn body(&self) -> &'static str {
        match self.mode {
            DisplayMode::Text => "Switch to debug mode to see non-dialogue events",
            DisplayMode::Debug => "Check the JSON view of the tracker",
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.header(), self.body())
    }
}
