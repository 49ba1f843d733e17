//! Wire shapes of the `/nlg` endpoint.

use {serde::Deserialize, serde_json::Value};

/// Body of a `POST /nlg` call.
#[derive(Debug, Clone, Deserialize)]
pub struct NlgRequest {
    /// Name of the response template to render (e.g. `utter_greet`).
    pub template: String,

    /// Render-time parameters; take precedence over tracker slots.
    #[serde(default)]
    pub arguments: serde_json::Map<String, Value>,

    #[serde(default)]
    pub tracker: TrackerState,

    /// Output channel the response is destined for.
    #[serde(default)]
    pub channel: Option<String>,
}

/// Serialized conversation state shipped with the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerState {
    pub sender_id: String,

    /// Ordered event records, kept opaque until replay.
    pub events: Vec<Value>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            sender_id: "default".to_string(),
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn only_template_is_required() {
        let request: NlgRequest = serde_json::from_value(json!({"template": "utter_greet"})).unwrap();
        assert_eq!(request.template, "utter_greet");
        assert!(request.arguments.is_empty());
        assert_eq!(request.tracker.sender_id, "default");
        assert!(request.tracker.events.is_empty());
        assert!(request.channel.is_none());
    }

    #[test]
    fn full_request_deserializes() {
        let request: NlgRequest = serde_json::from_value(json!({
            "template": "utter_greet",
            "arguments": {"name": "ada"},
            "tracker": {
                "sender_id": "user-1",
                "events": [{"event": "slot", "name": "mood", "value": "good"}],
            },
            "channel": "slack",
        }))
        .unwrap();
        assert_eq!(request.tracker.sender_id, "user-1");
        assert_eq!(request.tracker.events.len(), 1);
        assert_eq!(request.channel.as_deref(), Some("slack"));
        assert_eq!(request.arguments["name"], json!("ada"));
    }

    #[test]
    fn missing_template_is_rejected() {
        assert!(serde_json::from_value::<NlgRequest>(json!({"channel": "slack"})).is_err());
    }
}
