use notify_core::{EventContext, EventPayload, Repository};
use serde_json::Value;
use std::env;
use std::fs;
use tracing::{debug, warn};

const DEFAULT_SERVER_URL: &str = "https://github.com";
const UNKNOWN_EVENT: &str = "unknown";

/// Reads the run context GitHub Actions exposes through `GITHUB_*` variables
/// and the event file at `GITHUB_EVENT_PATH`.
pub fn load_event_context() -> EventContext {
    event_context_from_vars(|name| env::var(name).ok())
}

pub fn event_context_from_vars<F>(lookup: F) -> EventContext
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let payload_value = var("GITHUB_EVENT_PATH")
        .map(|path| read_event_file(&path))
        .unwrap_or(Value::Null);
    let payload = EventPayload::from_value(&payload_value);

    let server_url = var("GITHUB_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let repository = resolve_repository(
        payload.repository.clone(),
        var("GITHUB_REPOSITORY"),
        &server_url,
    );

    let context = EventContext {
        event_kind: var("GITHUB_EVENT_NAME").unwrap_or_else(|| UNKNOWN_EVENT.to_string()),
        workflow_name: var("GITHUB_WORKFLOW"),
        run_number: var("GITHUB_RUN_NUMBER"),
        run_id: var("GITHUB_RUN_ID"),
        actor: var("GITHUB_ACTOR"),
        git_ref: var("GITHUB_REF"),
        commit_sha: var("GITHUB_SHA"),
        repository,
        payload,
    };

    debug!(
        event_kind = %context.event_kind,
        repository = context.repository_name().unwrap_or_default(),
        run_id = context.run_id.as_deref().unwrap_or_default(),
        "loaded event context"
    );

    context
}

fn read_event_file(path: &str) -> Value {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(path, error = %error, "event file unreadable, continuing without payload");
            return Value::Null;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(error) => {
            warn!(path, error = %error, "event file is not valid json, continuing without payload");
            Value::Null
        }
    }
}

fn resolve_repository(
    from_payload: Option<Repository>,
    env_repository: Option<String>,
    server_url: &str,
) -> Option<Repository> {
    let from_payload = from_payload.unwrap_or_default();
    let full_name = from_payload.full_name.or_else(|| env_repository.clone());
    let html_url = from_payload.html_url.or_else(|| {
        env_repository.map(|name| format!("{}/{name}", server_url.trim_end_matches('/')))
    });

    if full_name.is_none() && html_url.is_none() {
        return None;
    }
    Some(Repository {
        full_name,
        html_url,
    })
}
