//! Outbound intents written to the streaming connection.
//!
//! Every command is tagged with the current session id. The client never
//! gates these on its local view of input authority: the backend is the
//! authority and a locally stale flag must not suppress an intent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tether_core::SessionId;

/// Direction of an input-authority transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionAction {
    /// The human takes the input channel.
    TakeControl,
    /// The human returns the input channel to the agent.
    HandBack,
}

/// A spatial or textual input forwarded while the human is in control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum BrowserAction {
    /// Click at native browser-viewport coordinates.
    Click {
        /// Native x coordinate.
        x: u32,
        /// Native y coordinate.
        y: u32,
    },
    /// Type text into the focused element.
    Type {
        /// Text to type.
        text: String,
    },
    /// Scroll vertically.
    Scroll {
        /// Vertical delta in pixels (positive scrolls down).
        delta_y: f64,
    },
}

/// One outbound envelope to the agent backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientCommand {
    /// Begin executing a task. The payload is forwarded verbatim, exactly
    /// as agreed with the backend during the chat exchange.
    StartTask {
        /// Session to start the task in.
        session_id: SessionId,
        /// Task payload, spread into the envelope unmodified.
        #[serde(flatten)]
        task: Value,
    },

    /// Transfer input authority.
    Intervention {
        /// Session the transfer applies to.
        session_id: SessionId,
        /// Which direction control moves.
        action: InterventionAction,
    },

    /// Forward a human input to the controlled browser.
    BrowserAction {
        /// Session the input applies to.
        session_id: SessionId,
        /// The input itself.
        #[serde(flatten)]
        action: BrowserAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn start_task_flattens_payload_verbatim() {
        let cmd = ClientCommand::StartTask {
            session_id: "sess_1".into(),
            task: json!({"taskName": "Fill form", "fields": {"email": "a@b.test"}}),
        };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire["type"], "start_task");
        assert_eq!(wire["sessionId"], "sess_1");
        assert_eq!(wire["taskName"], "Fill form");
        assert_eq!(wire["fields"]["email"], "a@b.test");
    }

    #[test]
    fn intervention_take_control_wire_shape() {
        let cmd = ClientCommand::Intervention {
            session_id: "sess_1".into(),
            action: InterventionAction::TakeControl,
        };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire["type"], "intervention");
        assert_eq!(wire["action"], "take_control");
        assert_eq!(wire["sessionId"], "sess_1");
    }

    #[test]
    fn intervention_hand_back_wire_shape() {
        let wire = serde_json::to_value(InterventionAction::HandBack).unwrap();
        assert_eq!(wire, "hand_back");
    }

    #[test]
    fn browser_click_wire_shape() {
        let cmd = ClientCommand::BrowserAction {
            session_id: "sess_1".into(),
            action: BrowserAction::Click { x: 640, y: 0 },
        };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire["type"], "browser_action");
        assert_eq!(wire["action"], "click");
        assert_eq!(wire["x"], 640);
        assert_eq!(wire["y"], 0);
        // Fields for other action kinds are absent, not null
        assert!(wire.get("text").is_none());
        assert!(wire.get("deltaY").is_none());
    }

    #[test]
    fn browser_type_wire_shape() {
        let cmd = ClientCommand::BrowserAction {
            session_id: "sess_1".into(),
            action: BrowserAction::Type {
                text: "jane@example.com".into(),
            },
        };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire["action"], "type");
        assert_eq!(wire["text"], "jane@example.com");
        assert!(wire.get("x").is_none());
    }

    #[test]
    fn browser_scroll_wire_shape() {
        let cmd = ClientCommand::BrowserAction {
            session_id: "sess_1".into(),
            action: BrowserAction::Scroll { delta_y: -120.0 },
        };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire["action"], "scroll");
        assert_eq!(wire["deltaY"], -120.0);
    }

    #[test]
    fn commands_roundtrip() {
        let cmd = ClientCommand::BrowserAction {
            session_id: "sess_2".into(),
            action: BrowserAction::Click { x: 10, y: 20 },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: ClientCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
