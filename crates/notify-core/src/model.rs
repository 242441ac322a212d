use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the hosting platform tells us about the run being reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    pub event_kind: String,
    pub workflow_name: Option<String>,
    pub run_number: Option<String>,
    pub run_id: Option<String>,
    pub actor: Option<String>,
    pub git_ref: Option<String>,
    pub commit_sha: Option<String>,
    pub repository: Option<Repository>,
    pub payload: EventPayload,
}

impl EventContext {
    pub fn new(event_kind: impl Into<String>) -> Self {
        Self {
            event_kind: event_kind.into(),
            ..Self::default()
        }
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|repository| non_empty(repository.html_url.as_deref()))
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|repository| non_empty(repository.full_name.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub full_name: Option<String>,
    pub html_url: Option<String>,
}

/// Event-specific sections of the webhook payload. Each section is decoded on
/// its own; a section that is missing or has an unexpected shape is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    pub action: Option<String>,
    pub ref_type: Option<String>,
    pub pull_request: Option<PullRequest>,
    pub review: Option<Review>,
    pub commits: Vec<Commit>,
    pub release: Option<Release>,
    pub issue: Option<Issue>,
    pub deployment_status: Option<DeploymentStatus>,
    pub repository: Option<Repository>,
}

impl EventPayload {
    pub fn from_value(value: &Value) -> Self {
        let commits = value
            .get("commits")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(decode::<Commit>).collect())
            .unwrap_or_default();

        Self {
            action: text_at(value, "action"),
            ref_type: text_at(value, "ref_type"),
            pull_request: section(value, "pull_request"),
            review: section(value, "review"),
            commits,
            release: section(value, "release"),
            issue: section(value, "issue"),
            deployment_status: section(value, "deployment_status"),
            repository: section(value, "repository"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentStatus {
    pub state: Option<String>,
}

/// Caller-supplied replacements for the generated parts of the embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub custom_title: Option<String>,
    pub custom_description: Option<String>,
    /// Hex digits without a leading marker, e.g. `00ff00`.
    pub custom_color: Option<String>,
    pub include_details: bool,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            custom_title: None,
            custom_description: None,
            custom_color: None,
            include_details: true,
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn text_at(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

fn section<T: DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    value
        .get(key)
        .filter(|nested| nested.is_object())
        .and_then(decode)
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sections_independently() {
        let payload = EventPayload::from_value(&json!({
            "action": "opened",
            "pull_request": {"number": 42, "title": "Fix bug", "html_url": "https://x/42"},
            "release": "not-an-object",
            "issue": {"number": "forty-two"}
        }));

        assert_eq!(payload.action.as_deref(), Some("opened"));
        assert_eq!(
            payload.pull_request,
            Some(PullRequest {
                number: Some(42),
                title: Some("Fix bug".to_string()),
                html_url: Some("https://x/42".to_string()),
            })
        );
        assert_eq!(payload.release, None);
        assert_eq!(payload.issue, None);
    }

    #[test]
    fn skips_malformed_commits() {
        let payload = EventPayload::from_value(&json!({
            "commits": [
                {"id": "a1", "message": "first"},
                {"id": "b2", "message": 7},
                {"message": "third"}
            ]
        }));

        let messages = payload
            .commits
            .iter()
            .map(|commit| commit.message.as_str())
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["first", "third"]);
    }

    #[test]
    fn blank_action_is_treated_as_absent() {
        let payload = EventPayload::from_value(&json!({"action": "  "}));
        assert_eq!(payload.action, None);
    }

    #[test]
    fn non_object_payload_is_empty() {
        assert_eq!(EventPayload::from_value(&json!([1, 2])), EventPayload::default());
    }

    #[test]
    fn repository_accessors_ignore_blank_values() {
        let mut context = EventContext::new("push");
        context.repository = Some(Repository {
            full_name: Some("org/repo".to_string()),
            html_url: Some(" ".to_string()),
        });

        assert_eq!(context.repository_name(), Some("org/repo"));
        assert_eq!(context.repository_url(), None);
    }

    #[test]
    fn overrides_include_details_by_default() {
        assert!(Overrides::default().include_details);
    }
}
