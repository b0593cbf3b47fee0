//! Turn reconstruction for conversation transcripts.
//!
//! A tracker is a flat, chronological list of events. Viewers want it grouped
//! into turns: one user utterance followed by whatever the bot said or did until
//! the next utterance.

mod turn;

pub use turn::{BotResponse, DisplayMode, Turn, UserSays};

use crate::conversation::{DialogueEvent, EventKind};

/// Group `events` into turns.
///
/// - A `user` event with text opens a new turn, unless the current turn is
///   still empty, in which case the utterance is attached to it. User events
///   without text are skipped.
/// - A `bot` event is appended to the current turn as [`BotResponse::BotData`].
/// - Any other event is appended as [`BotResponse::Event`] in debug mode and
///   dropped in text mode.
///
/// The trailing turn is kept when it holds anything. The same input always
/// produces the same turns.
pub fn reconstruct(events: &[DialogueEvent], mode: DisplayMode) -> Vec<Turn> {
    let (mut turns, last) = events
        .iter()
        .fold((Vec::new(), Turn::default()), |(turns, current), event| advance(turns, current, event, mode));

    if !last.is_empty() {
        turns.push(last);
    }
    tracing::trace!(events = events.len(), turns = turns.len(), mode = %mode, "reconstructed transcript");
    turns
}

fn advance(mut turns: Vec<Turn>, current: Turn, event: &DialogueEvent, mode: DisplayMode) -> (Vec<Turn>, Turn) {
    match event.kind() {
        EventKind::User => {
            let Some(user_says) = UserSays::from_event(event) else {
                return (turns, current);
            };
            if current.is_empty() {
                (turns, current.with_user_says(user_says))
            } else {
                turns.push(current);
                (turns, Turn::starting_with(user_says))
            }
        }
        EventKind::Bot => (turns, current.push_response(BotResponse::bot_data(event))),
        EventKind::Other(_) if mode.is_debug() => (turns, current.push_response(BotResponse::event(event))),
        EventKind::Other(_) => (turns, current),
    }
}
