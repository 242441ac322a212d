use crate::truncate::truncate_in_place;
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_CHARS: usize = 256;
pub const DESCRIPTION_MAX_CHARS: usize = 4096;
pub const FIELD_NAME_MAX_CHARS: usize = 256;
pub const FIELD_VALUE_MAX_CHARS: usize = 1024;
pub const FOOTER_MAX_CHARS: usize = 2048;

/// A single embed as the chat webhook API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

impl NotificationPayload {
    /// Truncates every text part to the limits the webhook API enforces.
    pub fn enforce_limits(mut self) -> Self {
        truncate_in_place(&mut self.title, TITLE_MAX_CHARS);
        truncate_in_place(&mut self.description, DESCRIPTION_MAX_CHARS);
        truncate_in_place(&mut self.footer.text, FOOTER_MAX_CHARS);
        for field in &mut self.fields {
            truncate_in_place(&mut field.name, FIELD_NAME_MAX_CHARS);
            truncate_in_place(&mut field.value, FIELD_VALUE_MAX_CHARS);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Request body posted to the webhook: one embed plus optional sender identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<NotificationPayload>,
}

impl WebhookMessage {
    pub fn new(payload: NotificationPayload) -> Self {
        Self {
            username: None,
            avatar_url: None,
            embeds: vec![payload],
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> NotificationPayload {
        NotificationPayload {
            title: "🚀 Release".to_string(),
            description: "**CI** • New release published".to_string(),
            color: 0x17a2b8,
            fields: vec![EmbedField::inline("Event", "release")],
            timestamp: "2026-02-20T14:00:00.000Z".to_string(),
            footer: EmbedFooter {
                text: "GitHub Actions • CI".to_string(),
            },
        }
    }

    #[test]
    fn serializes_single_embed_envelope() {
        let message = WebhookMessage::new(payload());
        let value = serde_json::to_value(&message).expect("serialize message");

        assert_eq!(
            value,
            json!({
                "embeds": [{
                    "title": "🚀 Release",
                    "description": "**CI** • New release published",
                    "color": 0x17a2b8,
                    "fields": [{"name": "Event", "value": "release", "inline": true}],
                    "timestamp": "2026-02-20T14:00:00.000Z",
                    "footer": {"text": "GitHub Actions • CI"}
                }]
            })
        );
    }

    #[test]
    fn sender_identity_is_emitted_only_when_set() {
        let message = WebhookMessage::new(payload())
            .with_username(Some("Release Bot".to_string()))
            .with_avatar_url(None);
        let value = serde_json::to_value(&message).expect("serialize message");

        assert_eq!(value["username"], "Release Bot");
        assert!(value.get("avatar_url").is_none());
    }

    #[test]
    fn enforce_limits_truncates_every_text_part() {
        let mut oversized = payload();
        oversized.title = "t".repeat(300);
        oversized.description = "d".repeat(5000);
        oversized.footer.text = "f".repeat(3000);
        oversized.fields = vec![EmbedField::block("n".repeat(400), "v".repeat(2000))];

        let bounded = oversized.enforce_limits();
        assert_eq!(bounded.title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(bounded.description.chars().count(), DESCRIPTION_MAX_CHARS);
        assert_eq!(bounded.footer.text.chars().count(), FOOTER_MAX_CHARS);
        assert_eq!(bounded.fields[0].name.chars().count(), FIELD_NAME_MAX_CHARS);
        assert_eq!(bounded.fields[0].value.chars().count(), FIELD_VALUE_MAX_CHARS);
    }
}
