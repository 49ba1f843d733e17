//! Conversation-state reconstruction.
//!
//! A [`Tracker`] is rebuilt per request from the sender id and the event
//! sequence the caller ships with it. Only the events that affect slot
//! values matter for response rendering; everything else in the stream
//! (user/bot utterances, executed actions, …) is carried opaquely by the
//! caller and skipped here.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use parlance_domain::SlotDefinition;

/// The state of a single conversation, as far as NLG is concerned.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub sender_id: String,
    slots: HashMap<String, Value>,
    initial_slots: HashMap<String, Value>,
}

impl Tracker {
    /// Rebuild a tracker by replaying `events` over the domain's initial
    /// slot values.
    pub fn from_events(
        sender_id: impl Into<String>,
        events: &[Value],
        slot_definitions: &HashMap<String, SlotDefinition>,
    ) -> Self {
        let initial_slots: HashMap<String, Value> = slot_definitions
            .iter()
            .map(|(name, def)| {
                (
                    name.clone(),
                    def.initial_value.clone().unwrap_or(Value::Null),
                )
            })
            .collect();

        let mut tracker = Self {
            sender_id: sender_id.into(),
            slots: initial_slots.clone(),
            initial_slots,
        };
        for event in events {
            tracker.apply(event);
        }
        tracker
    }

    /// Apply a single wire-format event record.
    fn apply(&mut self, event: &Value) {
        match event.get("event").and_then(Value::as_str) {
            Some("slot") => {
                let Some(name) = event.get("name").and_then(Value::as_str) else {
                    debug!(sender_id = %self.sender_id, "slot event without a name, skipping");
                    return;
                };
                let value = event.get("value").cloned().unwrap_or(Value::Null);
                // Slots not declared in the domain are still accepted; the
                // caller's event stream is the source of truth here.
                self.slots.insert(name.to_string(), value);
            },
            Some("restart") | Some("reset_slots") => {
                self.slots = self.initial_slots.clone();
            },
            _ => {},
        }
    }

    /// Current slot name → value mapping.
    pub fn current_slot_values(&self) -> &HashMap<String, Value> {
        &self.slots
    }
}
