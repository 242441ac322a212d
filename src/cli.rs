use clap::Parser;

/// Every input doubles as a GitHub Actions `INPUT_*` variable, so the binary
/// runs unchanged as an action step. Unset action inputs arrive as empty
/// strings, which is why they are all taken as raw text and normalised by
/// [`crate::config::Config::from_args`].
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ci-notify",
    version,
    about = "Post a CI/CD event notification to a chat webhook."
)]
pub struct Args {
    /// Destination webhook URL.
    #[arg(long, env = "INPUT_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Job outcome: success, failure, cancelled or skipped.
    #[arg(long, env = "INPUT_STATUS")]
    pub status: Option<String>,

    #[arg(long, env = "INPUT_TITLE")]
    pub title: Option<String>,

    #[arg(long, env = "INPUT_DESCRIPTION")]
    pub description: Option<String>,

    /// Embed color as hex digits, e.g. 00ff00.
    #[arg(long, env = "INPUT_COLOR")]
    pub color: Option<String>,

    /// Include the repository/actor/ref/commit fields (default true).
    #[arg(long, env = "INPUT_INCLUDE_DETAILS")]
    pub include_details: Option<String>,

    #[arg(long, env = "INPUT_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "INPUT_AVATAR_URL")]
    pub avatar_url: Option<String>,

    #[arg(long, env = "INPUT_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<String>,

    /// Print the webhook message instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_flags() {
        let args = Args::try_parse_from([
            "ci-notify",
            "--webhook-url",
            "https://chat.example/hook",
            "--status",
            "failure",
            "--include-details",
            "false",
            "--dry-run",
        ])
        .expect("parse args");

        assert_eq!(args.webhook_url.as_deref(), Some("https://chat.example/hook"));
        assert_eq!(args.status.as_deref(), Some("failure"));
        assert_eq!(args.include_details.as_deref(), Some("false"));
        assert!(args.dry_run);
    }
}
