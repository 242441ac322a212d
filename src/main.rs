use anyhow::{Context, Result};
use ci_notify::cli::Args;
use ci_notify::config::Config;
use ci_notify::context::load_event_context;
use ci_notify::delivery::WebhookClient;
use ci_notify::compose_message;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let config = Config::from_args(Args::parse()).context("load notification config")?;
    let context = load_event_context();
    let message = compose_message(&context, &config);

    let title = message
        .embeds
        .first()
        .map(|embed| embed.title.as_str())
        .unwrap_or_default();
    info!(
        event_kind = %context.event_kind,
        status = %config.status,
        title,
        "notification built"
    );

    if config.dry_run {
        let rendered =
            serde_json::to_string_pretty(&message).context("serialize webhook message")?;
        println!("{rendered}");
        info!("dry run, webhook not called");
        return Ok(());
    }

    let client = WebhookClient::new(config.http_timeout).context("initialize webhook client")?;
    if let Err(delivery_error) = client.deliver(&config.webhook_url, &message).await {
        error!(
            host = config.webhook_url.host_str().unwrap_or_default(),
            status = delivery_error.status(),
            error = %delivery_error,
            "notification delivery failed"
        );
        return Err(delivery_error).context("deliver notification");
    }

    info!(
        host = config.webhook_url.host_str().unwrap_or_default(),
        "notification sent"
    );
    Ok(())
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
