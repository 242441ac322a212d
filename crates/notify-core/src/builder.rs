use crate::color::parse_hex_color;
use crate::embed::{EmbedField, EmbedFooter, NotificationPayload};
use crate::metadata::{EventMetadata, event_metadata};
use crate::model::{EventContext, EventPayload, Overrides, non_empty};
use crate::status::JobStatus;
use crate::truncate::truncate_chars;
use chrono::{DateTime, SecondsFormat, Utc};

pub const PLATFORM_LABEL: &str = "GitHub Actions";
const UNKNOWN_REPOSITORY: &str = "Unknown Repository";
const UNKNOWN: &str = "Unknown";
const MISSING_RUN_NUMBER: &str = "#N/A";
const SHORT_SHA_CHARS: usize = 7;
const MAX_LISTED_COMMITS: usize = 3;
const COMMIT_MESSAGE_MAX_CHARS: usize = 100;

pub fn build_notification(
    context: &EventContext,
    status: &JobStatus,
    overrides: &Overrides,
) -> NotificationPayload {
    build_notification_at(context, status, overrides, Utc::now())
}

/// Same as [`build_notification`] with the timestamp supplied by the caller.
pub fn build_notification_at(
    context: &EventContext,
    status: &JobStatus,
    overrides: &Overrides,
    now: DateTime<Utc>,
) -> NotificationPayload {
    let event = event_metadata(&context.event_kind);
    let workflow_name = workflow_name(context);

    let mut fields = if overrides.include_details {
        detail_fields(context)
    } else {
        Vec::new()
    };
    fields.extend(run_link_field(context));

    NotificationPayload {
        title: resolve_title(&event, status, overrides),
        description: resolve_description(context, &event, status, overrides),
        color: resolve_color(&event, status, overrides),
        fields,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        footer: EmbedFooter {
            text: format!("{PLATFORM_LABEL} • {workflow_name}"),
        },
    }
    .enforce_limits()
}

/// Ref with its `refs/heads/` or `refs/tags/` prefix removed.
pub fn display_ref(git_ref: &str) -> &str {
    git_ref
        .strip_prefix("refs/heads/")
        .or_else(|| git_ref.strip_prefix("refs/tags/"))
        .unwrap_or(git_ref)
}

fn workflow_name(context: &EventContext) -> &str {
    non_empty(context.workflow_name.as_deref()).unwrap_or(PLATFORM_LABEL)
}

fn resolve_color(event: &EventMetadata, status: &JobStatus, overrides: &Overrides) -> u32 {
    if let Some(color) = overrides.custom_color.as_deref().and_then(parse_hex_color) {
        return color;
    }
    if !status.is_success() {
        return status.styling().color;
    }
    event.color
}

fn resolve_title(event: &EventMetadata, status: &JobStatus, overrides: &Overrides) -> String {
    if let Some(title) = overrides.custom_title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    if status.is_success() {
        format!("{} {}", event.emoji, event.title)
    } else {
        let style = status.styling();
        format!(
            "{} {} {} {}",
            style.emoji, event.emoji, event.title, style.label
        )
    }
}

fn resolve_description(
    context: &EventContext,
    event: &EventMetadata,
    status: &JobStatus,
    overrides: &Overrides,
) -> String {
    if let Some(description) = overrides
        .custom_description
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        return description.to_string();
    }

    let workflow = workflow_name(context);
    let event_description = event.description.render(&context.payload);
    if status.is_success() {
        format!("**{workflow}** • {event_description}")
    } else {
        let outcome = status.styling().label.to_lowercase();
        format!("**{workflow}** workflow {outcome} • {event_description}")
    }
}

fn detail_fields(context: &EventContext) -> Vec<EmbedField> {
    let repository_url = context.repository_url();
    let repository_name = context.repository_name().unwrap_or(UNKNOWN_REPOSITORY);

    let mut fields = vec![
        EmbedField::inline("Repository", link(repository_name, repository_url)),
        EmbedField::inline("Event", context.event_kind.as_str()),
        EmbedField::inline(
            "Actor",
            non_empty(context.actor.as_deref()).unwrap_or(UNKNOWN),
        ),
        EmbedField::inline(
            "Ref",
            non_empty(context.git_ref.as_deref())
                .map(display_ref)
                .unwrap_or(UNKNOWN),
        ),
        EmbedField::inline(
            "Run Number",
            non_empty(context.run_number.as_deref())
                .map(|number| format!("#{number}"))
                .unwrap_or_else(|| MISSING_RUN_NUMBER.to_string()),
        ),
    ];

    if let Some(sha) = non_empty(context.commit_sha.as_deref()) {
        let short_sha = truncate_chars(sha, SHORT_SHA_CHARS);
        let commit_url = repository_url.map(|url| format!("{url}/commit/{sha}"));
        fields.push(EmbedField::inline(
            "Commit",
            link(short_sha, commit_url.as_deref()),
        ));
    }

    fields.extend(event_field(&context.event_kind, &context.payload));
    fields
}

fn event_field(event_kind: &str, payload: &EventPayload) -> Option<EmbedField> {
    match event_kind {
        "pull_request" => payload.pull_request.as_ref().map(|pull_request| {
            let text = numbered_title(pull_request.number, pull_request.title.as_deref());
            EmbedField::block(
                "Pull Request",
                link(&text, pull_request.html_url.as_deref()),
            )
        }),
        "push" => commit_list(payload).map(|list| EmbedField::block("Commits", list)),
        "release" => payload.release.as_ref().map(|release| {
            let tag = non_empty(release.tag_name.as_deref()).unwrap_or(UNKNOWN);
            let name = non_empty(release.name.as_deref()).unwrap_or(tag);
            let text = format!("{tag} - {name}");
            EmbedField::block("Release", link(&text, release.html_url.as_deref()))
        }),
        "issues" => payload.issue.as_ref().map(|issue| {
            let text = numbered_title(issue.number, issue.title.as_deref());
            EmbedField::block("Issue", link(&text, issue.html_url.as_deref()))
        }),
        _ => None,
    }
}

fn commit_list(payload: &EventPayload) -> Option<String> {
    if payload.commits.is_empty() {
        return None;
    }

    let lines = payload
        .commits
        .iter()
        .take(MAX_LISTED_COMMITS)
        .map(|commit| {
            let first_line = commit.message.lines().next().unwrap_or_default();
            format!("• {}", truncate_chars(first_line, COMMIT_MESSAGE_MAX_CHARS))
        })
        .collect::<Vec<_>>();
    Some(lines.join("\n"))
}

fn run_link_field(context: &EventContext) -> Option<EmbedField> {
    let run_id = non_empty(context.run_id.as_deref())?;
    let repository_url = context.repository_url()?;
    Some(EmbedField::block(
        "Workflow Run",
        format!("[View Details]({repository_url}/actions/runs/{run_id})"),
    ))
}

fn numbered_title(number: Option<u64>, title: Option<&str>) -> String {
    let title = non_empty(title).unwrap_or("Untitled");
    match number {
        Some(number) => format!("#{number} - {title}"),
        None => title.to_string(),
    }
}

fn link(text: &str, url: Option<&str>) -> String {
    match non_empty(url) {
        Some(url) => format!("[{text}]({url})"),
        None => text.to_string(),
    }
}
