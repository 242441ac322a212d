use crate::cli::Args;
use crate::delivery::parse_webhook_url;
use anyhow::{Context, Result, anyhow};
use notify_core::{JobStatus, Overrides, parse_hex_color};
use reqwest::Url;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: Url,
    pub status: JobStatus,
    pub overrides: Overrides,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub http_timeout: Duration,
    pub dry_run: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let raw_url = required("webhook-url", args.webhook_url)?;
        let webhook_url = parse_webhook_url(&raw_url).context("invalid webhook-url")?;

        let custom_color = optional(args.color);
        if let Some(color) = custom_color.as_deref() {
            if parse_hex_color(color).is_none() {
                return Err(anyhow!(
                    "color must be one to six hex digits (e.g. 00ff00), got {color:?}"
                ));
            }
        }

        let status = optional(args.status)
            .map(|raw| raw.parse::<JobStatus>().unwrap_or_default())
            .unwrap_or_default();

        let timeout_seconds = parse_u64(
            "timeout-seconds",
            args.timeout_seconds,
            DEFAULT_TIMEOUT_SECONDS,
        )?;
        if timeout_seconds == 0 {
            return Err(anyhow!("timeout-seconds must be greater than 0"));
        }

        Ok(Self {
            webhook_url,
            status,
            overrides: Overrides {
                custom_title: optional(args.title),
                custom_description: optional(args.description),
                custom_color,
                include_details: parse_bool(args.include_details, true),
            },
            username: optional(args.username),
            avatar_url: optional(args.avatar_url),
            http_timeout: Duration::from_secs(timeout_seconds),
            dry_run: args.dry_run,
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    let value = value.with_context(|| format!("missing required input: {name}"))?;
    if value.trim().is_empty() {
        return Err(anyhow!("required input {name} cannot be empty"));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_u64(name: &str, value: Option<String>, default: u64) -> Result<u64> {
    optional(value)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid u64 for {name}"))
        })
        .transpose()
        .map(|value| value.unwrap_or(default))
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match optional(value) {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            webhook_url: Some("https://chat.example/api/webhooks/1/token".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn defaults_apply_for_unset_inputs() {
        let config = Config::from_args(args()).expect("config");

        assert_eq!(config.status, JobStatus::Success);
        assert_eq!(config.overrides, Overrides::default());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.username, None);
        assert!(!config.dry_run);
    }

    #[test]
    fn empty_action_inputs_are_treated_as_unset() {
        let config = Config::from_args(Args {
            status: Some(String::new()),
            title: Some(String::new()),
            color: Some(" ".to_string()),
            include_details: Some(String::new()),
            timeout_seconds: Some(String::new()),
            ..args()
        })
        .expect("config");

        assert_eq!(config.status, JobStatus::Success);
        assert_eq!(config.overrides.custom_title, None);
        assert_eq!(config.overrides.custom_color, None);
        assert!(config.overrides.include_details);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_args(Args {
            status: Some("Cancelled".to_string()),
            title: Some("Nightly".to_string()),
            description: Some("Done".to_string()),
            color: Some("ff8800".to_string()),
            include_details: Some("FALSE".to_string()),
            username: Some("CI Bot".to_string()),
            timeout_seconds: Some("5".to_string()),
            dry_run: true,
            ..args()
        })
        .expect("config");

        assert_eq!(config.status, JobStatus::Cancelled);
        assert_eq!(config.overrides.custom_title.as_deref(), Some("Nightly"));
        assert_eq!(config.overrides.custom_description.as_deref(), Some("Done"));
        assert_eq!(config.overrides.custom_color.as_deref(), Some("ff8800"));
        assert!(!config.overrides.include_details);
        assert_eq!(config.username.as_deref(), Some("CI Bot"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert!(config.dry_run);
    }

    #[test]
    fn missing_webhook_url_is_rejected() {
        let error = Config::from_args(Args::default()).expect_err("missing url");
        assert!(error.to_string().contains("webhook-url"));

        let blank = Args {
            webhook_url: Some("  ".to_string()),
            ..Args::default()
        };
        assert!(Config::from_args(blank).is_err());
    }

    #[test]
    fn unparsable_webhook_url_is_rejected() {
        let relative = Args {
            webhook_url: Some("/api/webhooks/1".to_string()),
            ..Args::default()
        };
        assert!(Config::from_args(relative).is_err());

        let wrong_scheme = Args {
            webhook_url: Some("ftp://chat.example/hook".to_string()),
            ..Args::default()
        };
        assert!(Config::from_args(wrong_scheme).is_err());
    }

    #[test]
    fn invalid_color_is_rejected() {
        let error = Config::from_args(Args {
            color: Some("green".to_string()),
            ..args()
        })
        .expect_err("invalid color");
        assert!(error.to_string().contains("hex"));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for raw in ["0", "soon"] {
            let result = Config::from_args(Args {
                timeout_seconds: Some(raw.to_string()),
                ..args()
            });
            assert!(result.is_err(), "timeout {raw:?} should be rejected");
        }
    }
}
