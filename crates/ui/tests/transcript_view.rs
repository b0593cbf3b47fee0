use botdesk_core::{Conversation, DisplayMode};
use botdesk_ui::ConversationView;

const TRACKER: &str = r#"{
    "userId": "visitor-7",
    "tracker": {
        "events": [
            { "event": "action", "name": "action_listen", "timestamp": 36000.0 },
            {
                "event": "user",
                "text": "hey",
                "timestamp": 36001.5,
                "parse_data": { "text": "hey", "intent": { "name": "greet", "confidence": 0.98 }, "entities": [] }
            },
            { "event": "bot", "text": "Hello! What can I do for you?", "timestamp": 36002.0 },
            {
                "event": "bot",
                "text": "Pick a topic",
                "data": { "buttons": [{ "payload": "/pricing", "title": "Pricing" }], "image": null },
                "timestamp": 36002.1
            },
            { "event": "user", "text": "/pricing", "timestamp": 36010.0, "parse_data": { "intent": { "name": "pricing", "confidence": 1.0 } } },
            { "event": "slot", "name": "topic", "value": "pricing", "timestamp": 36010.2 },
            { "event": "bot", "text": "Plans start at 10 EUR.", "timestamp": 36011.0 }
        ]
    }
}"#;

fn conversation() -> Conversation {
    Conversation::from_json_str(TRACKER).unwrap()
}

#[test]
fn test_text_mode_transcript() {
    let rendered = ConversationView::new(&conversation(), DisplayMode::Text).render();

    insta::assert_snapshot!(rendered, @r#"
visitor-7 (10:00:01) [98%]: hey #greet
Bot: Hello! What can I do for you?
Bot: Pick a topic
Bot [bot_data]:
{
  "buttons": [
    {
      "payload": "/pricing",
      "title": "Pricing"
    }
  ]
}

visitor-7 (10:00:10) [100%]: [/pricing]
Bot: Plans start at 10 EUR.
"#);
}

#[test]
fn test_debug_mode_includes_non_dialogue_events() {
    let view = ConversationView::new(&conversation(), DisplayMode::Debug);
    let rendered = view.render();

    assert_eq!(view.turns().len(), 3);
    assert!(rendered.starts_with("Bot [event]:"));
    assert!(rendered.contains("\"action_listen\""));
    assert!(rendered.contains("\"name\": \"topic\""));
}

#[test]
fn test_conversation_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.json");
    std::fs::write(&path, TRACKER).unwrap();

    let conversation = Conversation::from_file(&path).unwrap();
    let rendered = ConversationView::new(&conversation, DisplayMode::Text).render();
    assert!(rendered.contains("visitor-7 (10:00:01)"));
}

#[test]
fn test_empty_tracker_states() {
    let conversation = Conversation::from_json_str(r#"{ "tracker": { "events": [] } }"#).unwrap();

    insta::assert_snapshot!(ConversationView::new(&conversation, DisplayMode::Text).render(), @r"
No events to show
Switch to debug mode to see non-dialogue events
");
    insta::assert_snapshot!(ConversationView::new(&conversation, DisplayMode::Debug).render(), @r"
No events to show
Check the JSON view of the tracker
");
}
