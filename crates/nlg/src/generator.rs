use std::collections::HashMap;

use rand::seq::IndexedRandom;
use serde_json::Value;
use tracing::{debug, warn};

use {
    parlance_domain::{Domain, ResponseTemplate},
    parlance_tracker::Tracker,
};

/// Renders responses from a fixed set of template variations.
///
/// Built once from the loaded domain; holds no mutable state, so a single
/// instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct TemplatedGenerator {
    templates: HashMap<String, Vec<ResponseTemplate>>,
}

impl TemplatedGenerator {
    pub fn new(templates: HashMap<String, Vec<ResponseTemplate>>) -> Self {
        Self { templates }
    }

    pub fn from_domain(domain: &Domain) -> Self {
        Self::new(domain.templates.clone())
    }

    /// Variations admissible for `template_name` on `channel`:
    /// channel-specific ones when any match, otherwise the channel-less
    /// fallbacks.
    fn variations_for(&self, template_name: &str, channel: Option<&str>) -> Vec<&ResponseTemplate> {
        let Some(variations) = self.templates.get(template_name) else {
            return Vec::new();
        };
        if let Some(channel) = channel {
            let for_channel: Vec<&ResponseTemplate> = variations
                .iter()
                .filter(|v| v.channel.as_deref() == Some(channel))
                .collect();
            if !for_channel.is_empty() {
                return for_channel;
            }
        }
        variations.iter().filter(|v| v.channel.is_none()).collect()
    }

    /// Render a response for `template_name`.
    ///
    /// `arguments` take precedence over tracker slots on key collision.
    /// Returns `None` when the template is unknown or has no admissible
    /// variation for the channel.
    pub fn generate(
        &self,
        template_name: &str,
        tracker: &Tracker,
        channel: Option<&str>,
        arguments: &serde_json::Map<String, Value>,
    ) -> Option<ResponseTemplate> {
        let candidates = self.variations_for(template_name, channel);
        let Some(variation) = candidates.choose(&mut rand::rng()) else {
            warn!(
                template = %template_name,
                channel = channel.unwrap_or("-"),
                "no variation found for template"
            );
            return None;
        };

        let mut values = tracker.current_slot_values().clone();
        for (key, value) in arguments {
            values.insert(key.clone(), value.clone());
        }

        let mut rendered = (*variation).clone();
        if let Some(text) = &rendered.text {
            rendered.text = Some(crate::interpolate::interpolate_text(text, &values));
        }
        debug!(
            template = %template_name,
            sender_id = %tracker.sender_id,
            "rendered response"
        );
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn generator(yaml: &str) -> TemplatedGenerator {
        let domain: Domain = serde_yaml::from_str(yaml).unwrap();
        TemplatedGenerator::from_domain(&domain)
    }

    fn empty_tracker() -> Tracker {
        Tracker::from_events("test", &[], &HashMap::new())
    }

    fn no_args() -> serde_json::Map<String, Value> {
        serde_json::Map::new()
    }

    #[test]
    fn unknown_template_yields_none() {
        let g = generator("templates: {}");
        assert!(g.generate("utter_missing", &empty_tracker(), None, &no_args()).is_none());
    }

    #[test]
    fn renders_single_variation() {
        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "hello!"
"#,
        );
        let rendered = g.generate("utter_greet", &empty_tracker(), None, &no_args()).unwrap();
        assert_eq!(rendered.text.as_deref(), Some("hello!"));
    }

    #[test]
    fn picks_from_the_variation_set() {
        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "hi"
    - text: "hey"
    - text: "hello"
"#,
        );
        for _ in 0..20 {
            let text = g
                .generate("utter_greet", &empty_tracker(), None, &no_args())
                .unwrap()
                .text
                .unwrap();
            assert!(["hi", "hey", "hello"].contains(&text.as_str()));
        }
    }

    #[test]
    fn channel_specific_variation_wins_on_its_channel() {
        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "plain"
    - text: "slacky"
      channel: slack
"#,
        );
        let rendered = g
            .generate("utter_greet", &empty_tracker(), Some("slack"), &no_args())
            .unwrap();
        assert_eq!(rendered.text.as_deref(), Some("slacky"));
    }

    #[test]
    fn unknown_channel_falls_back_to_channel_less_variations() {
        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "plain"
    - text: "slacky"
      channel: slack
"#,
        );
        let rendered = g
            .generate("utter_greet", &empty_tracker(), Some("telegram"), &no_args())
            .unwrap();
        assert_eq!(rendered.text.as_deref(), Some("plain"));
    }

    #[test]
    fn channel_only_template_yields_none_off_channel() {
        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "slacky"
      channel: slack
"#,
        );
        assert!(g.generate("utter_greet", &empty_tracker(), None, &no_args()).is_none());
        assert!(
            g.generate("utter_greet", &empty_tracker(), Some("telegram"), &no_args())
                .is_none()
        );
    }

    #[test]
    fn arguments_override_tracker_slots() {
        let defs: HashMap<String, parlance_domain::SlotDefinition> =
            serde_yaml::from_str("name: { type: text }").unwrap();
        let events = vec![json!({"event": "slot", "name": "name", "value": "ada"})];
        let tracker = Tracker::from_events("test", &events, &defs);

        let g = generator(
            r#"
templates:
  utter_greet:
    - text: "hey {name}!"
"#,
        );

        let from_slots = g.generate("utter_greet", &tracker, None, &no_args()).unwrap();
        assert_eq!(from_slots.text.as_deref(), Some("hey ada!"));

        let mut args = serde_json::Map::new();
        args.insert("name".to_string(), json!("grace"));
        let overridden = g.generate("utter_greet", &tracker, None, &args).unwrap();
        assert_eq!(overridden.text.as_deref(), Some("hey grace!"));
    }

    #[test]
    fn non_text_payload_passes_through_untouched() {
        let g = generator(
            r#"
templates:
  utter_pick:
    - text: "pick one, {name}"
      buttons:
        - title: "A"
          payload: "/a"
"#,
        );
        let mut args = serde_json::Map::new();
        args.insert("name".to_string(), json!("ada"));
        let rendered = g.generate("utter_pick", &empty_tracker(), None, &args).unwrap();
        assert_eq!(rendered.text.as_deref(), Some("pick one, ada"));
        assert_eq!(rendered.extra["buttons"][0]["payload"], json!("/a"));
    }
}
