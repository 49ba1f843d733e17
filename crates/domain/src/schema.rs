//! Domain schema types (slots, response templates).
//!
//! Domain files describe far more than this server needs (intents, entities,
//! actions, …); everything except `slots` and `templates` is ignored on load.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A dialogue domain as loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Slot definitions keyed by slot name.
    pub slots: HashMap<String, SlotDefinition>,

    /// Response template variations keyed by template name
    /// (e.g. `utter_greet`). Newer domain files use the `responses` key.
    #[serde(alias = "responses")]
    pub templates: HashMap<String, Vec<ResponseTemplate>>,
}

/// Definition of a single slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotDefinition {
    /// Slot type name (`text`, `bool`, `categorical`, …). Only carried
    /// through for diagnostics — the server treats all slot values as JSON.
    #[serde(rename = "type")]
    pub slot_type: String,

    /// Value the slot holds before any event sets it.
    pub initial_value: Option<serde_json::Value>,
}

impl Default for SlotDefinition {
    fn default() -> Self {
        Self {
            slot_type: "text".to_string(),
            initial_value: None,
        }
    }
}

/// One variation of a response template.
///
/// Besides `text` a variation may carry arbitrary structured payload
/// (buttons, image, custom channel payloads, …) which is preserved verbatim
/// through rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Restricts this variation to a single output channel. Variations
    /// without a channel serve as the fallback for every channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Domain {
    /// Slot name → initial value (`null` when the definition has none).
    pub fn initial_slot_values(&self) -> HashMap<String, serde_json::Value> {
        self.slots
            .iter()
            .map(|(name, def)| {
                (
                    name.clone(),
                    def.initial_value.clone().unwrap_or(serde_json::Value::Null),
                )
            })
            .collect()
    }

    /// Number of distinct response templates.
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}
