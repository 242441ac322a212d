use crate::model::EventPayload;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const DEFAULT_EVENT_COLOR: u32 = 0x0366d6;
pub const DEFAULT_EVENT_EMOJI: &str = "🔔";
pub const DEFAULT_EVENT_DESCRIPTION: &str = "Event triggered";

/// Payload value a description template is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadText {
    Action,
    RefType,
    ReviewState,
    DeploymentState,
}

impl PayloadText {
    fn lookup(self, payload: &EventPayload) -> Option<&str> {
        let value = match self {
            PayloadText::Action => payload.action.as_deref(),
            PayloadText::RefType => payload.ref_type.as_deref(),
            PayloadText::ReviewState => payload
                .review
                .as_ref()
                .and_then(|review| review.state.as_deref()),
            PayloadText::DeploymentState => payload
                .deployment_status
                .as_ref()
                .and_then(|status| status.state.as_deref()),
        };
        value.map(str::trim).filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Description {
    Fixed(&'static str),
    /// `template` has a single `{}` slot for the payload value; `fallback` is
    /// used when the value is absent.
    FromPayload {
        source: PayloadText,
        template: &'static str,
        fallback: &'static str,
    },
}

impl Description {
    pub fn render(&self, payload: &EventPayload) -> String {
        match *self {
            Description::Fixed(text) => text.to_string(),
            Description::FromPayload {
                source,
                template,
                fallback,
            } => match source.lookup(payload) {
                Some(value) => template.replacen("{}", value, 1),
                None => fallback.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    pub emoji: &'static str,
    pub title: Cow<'static, str>,
    pub color: u32,
    pub description: Description,
}

struct EventEntry {
    emoji: &'static str,
    title: &'static str,
    color: u32,
    description: Description,
}

const fn fixed(
    emoji: &'static str,
    title: &'static str,
    color: u32,
    text: &'static str,
) -> EventEntry {
    EventEntry {
        emoji,
        title,
        color,
        description: Description::Fixed(text),
    }
}

const fn templated(
    emoji: &'static str,
    title: &'static str,
    color: u32,
    source: PayloadText,
    template: &'static str,
    fallback: &'static str,
) -> EventEntry {
    EventEntry {
        emoji,
        title,
        color,
        description: Description::FromPayload {
            source,
            template,
            fallback,
        },
    }
}

static EVENT_TABLE: LazyLock<HashMap<&'static str, EventEntry>> = LazyLock::new(|| {
    HashMap::from([
        ("push", fixed("📤", "Push", 0x0366d6, "New commits pushed")),
        (
            "pull_request",
            templated(
                "🔀",
                "Pull Request",
                0x6f42c1,
                PayloadText::Action,
                "Pull request {}",
                "Pull request activity",
            ),
        ),
        (
            "pull_request_review",
            templated(
                "👀",
                "Pull Request Review",
                0x6f42c1,
                PayloadText::ReviewState,
                "Review {}",
                "Pull request reviewed",
            ),
        ),
        (
            "release",
            fixed("🚀", "Release", 0x17a2b8, "New release published"),
        ),
        ("issues", fixed("🐛", "Issue", 0xfd7e14, "Issue activity")),
        (
            "issue_comment",
            fixed("💬", "Issue Comment", 0xfd7e14, "New comment on issue"),
        ),
        (
            "workflow_dispatch",
            fixed(
                "▶️",
                "Manual Trigger",
                0x0366d6,
                "Workflow manually triggered",
            ),
        ),
        (
            "schedule",
            fixed("⏰", "Scheduled Run", 0x0366d6, "Scheduled workflow run"),
        ),
        (
            "create",
            templated(
                "✨",
                "Created",
                0x28a745,
                PayloadText::RefType,
                "New {} created",
                "New reference created",
            ),
        ),
        (
            "delete",
            templated(
                "🗑️",
                "Deleted",
                0x6c757d,
                PayloadText::RefType,
                "Deleted {}",
                "Reference deleted",
            ),
        ),
        (
            "deployment",
            fixed("🚢", "Deployment", 0x17a2b8, "Deployment created"),
        ),
        (
            "deployment_status",
            templated(
                "📦",
                "Deployment Status",
                0x17a2b8,
                PayloadText::DeploymentState,
                "Deployment {}",
                "Deployment status updated",
            ),
        ),
        (
            "workflow_run",
            templated(
                "🔄",
                "Workflow Run",
                0x0366d6,
                PayloadText::Action,
                "Workflow run {}",
                "Workflow run activity",
            ),
        ),
    ])
});

pub fn event_metadata(event_kind: &str) -> EventMetadata {
    match EVENT_TABLE.get(event_kind) {
        Some(entry) => EventMetadata {
            emoji: entry.emoji,
            title: Cow::Borrowed(entry.title),
            color: entry.color,
            description: entry.description,
        },
        None => EventMetadata {
            emoji: DEFAULT_EVENT_EMOJI,
            title: Cow::Owned(title_case(event_kind)),
            color: DEFAULT_EVENT_COLOR,
            description: Description::Fixed(DEFAULT_EVENT_DESCRIPTION),
        },
    }
}

/// `repository_dispatch` -> `Repository Dispatch`.
fn title_case(event_kind: &str) -> String {
    let mut output = String::with_capacity(event_kind.len());
    let mut at_word_start = true;
    for character in event_kind.chars() {
        let character = if character == '_' { ' ' } else { character };
        if at_word_start && character.is_alphanumeric() {
            output.extend(character.to_uppercase());
        } else {
            output.push(character);
        }
        at_word_start = !character.is_alphanumeric();
    }
    output
}
