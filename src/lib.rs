pub mod cli;
pub mod config;
pub mod context;
pub mod delivery;

use config::Config;
use delivery::{DeliveryError, WebhookClient, parse_webhook_url};
use notify_core::{
    EventContext, JobStatus, Overrides, WebhookMessage, build_notification,
};

/// Builds the embed for `context` and posts it to `webhook_url`.
///
/// The URL is validated before anything is built, so an unusable destination
/// never results in a request.
pub async fn build_and_send(
    client: &WebhookClient,
    webhook_url: &str,
    context: &EventContext,
    status: &JobStatus,
    overrides: &Overrides,
) -> Result<(), DeliveryError> {
    let url = parse_webhook_url(webhook_url)?;
    let message = WebhookMessage::new(build_notification(context, status, overrides));
    client.deliver(&url, &message).await
}

/// The full webhook message for a configured run, sender identity included.
pub fn compose_message(context: &EventContext, config: &Config) -> WebhookMessage {
    let payload = build_notification(context, &config.status, &config.overrides);
    WebhookMessage::new(payload)
        .with_username(config.username.clone())
        .with_avatar_url(config.avatar_url.clone())
}
