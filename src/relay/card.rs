//! Microsoft Teams legacy MessageCard schema.
//!
//! Only the subset the relay emits is modelled. Empty optional strings and
//! empty lists are left out of the JSON, as Teams expects.

use serde::{Deserialize, Serialize};

pub const MESSAGE_CARD_TYPE: &str = "MessageCard";
pub const MESSAGE_CARD_CONTEXT: &str = "https://schema.org/extensions";
pub const OPEN_URI_ACTION: &str = "OpenUri";
pub const VIEW_RUN_ACTION_NAME: &str = "View Run";
pub const DEFAULT_TARGET_OS: &str = "default";

/// Card posted to the Teams incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,

    #[serde(rename = "@context")]
    pub context: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(rename = "themeColor", default, skip_serializing_if = "String::is_empty")]
    pub theme_color: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,

    #[serde(rename = "potentialAction", default, skip_serializing_if = "Vec::is_empty")]
    pub potential_actions: Vec<PotentialAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialAction {
    #[serde(rename = "@type")]
    pub action_type: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<ActionTarget>,
}

impl PotentialAction {
    /// "View Run" button opening `uri` on every client
    pub fn view_run(uri: impl Into<String>) -> Self {
        Self {
            action_type: OPEN_URI_ACTION.to_string(),
            name: VIEW_RUN_ACTION_NAME.to_string(),
            targets: vec![ActionTarget {
                os: DEFAULT_TARGET_OS.to_string(),
                uri: uri.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    pub os: String,
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card() -> MessageCard {
        MessageCard {
            card_type: MESSAGE_CARD_TYPE.to_string(),
            context: MESSAGE_CARD_CONTEXT.to_string(),
            summary: "Run done in prod.".to_string(),
            title: "Run done in prod.".to_string(),
            text: String::new(),
            theme_color: "#a0d911".to_string(),
            sections: vec![Section {
                activity_title: Some("alice".to_string()),
                activity_subtitle: None,
                facts: vec![Fact::new("Run ID", "run-1")],
            }],
            potential_actions: vec![PotentialAction::view_run("https://example.com/run-1")],
        }
    }

    #[test]
    fn test_serializes_with_teams_field_names() {
        let value = serde_json::to_value(card()).unwrap();

        assert_eq!(
            value,
            json!({
                "@type": "MessageCard",
                "@context": "https://schema.org/extensions",
                "summary": "Run done in prod.",
                "title": "Run done in prod.",
                "themeColor": "#a0d911",
                "sections": [{
                    "activityTitle": "alice",
                    "facts": [{ "name": "Run ID", "value": "run-1" }]
                }],
                "potentialAction": [{
                    "@type": "OpenUri",
                    "name": "View Run",
                    "targets": [{ "os": "default", "uri": "https://example.com/run-1" }]
                }]
            })
        );
    }

    #[test]
    fn test_empty_section_serializes_as_empty_object() {
        let value = serde_json::to_value(Section::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_view_run_keeps_empty_uri() {
        let action = PotentialAction::view_run("");
        assert_eq!(action.targets.len(), 1);
        assert_eq!(action.targets[0].uri, "");
        assert_eq!(action.targets[0].os, "default");
    }
}
