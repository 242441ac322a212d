use notify_core::WebhookMessage;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The destination is not an absolute http(s) URL. No request was sent.
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),

    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("serialize webhook message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request never got an HTTP response (DNS, connect, TLS, timeout).
    #[error("webhook transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The webhook answered with a non-2xx status.
    #[error("webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl DeliveryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub fn parse_webhook_url(raw: &str) -> Result<Url, DeliveryError> {
    let url = Url::parse(raw.trim()).map_err(|error| DeliveryError::InvalidUrl(error.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DeliveryError::InvalidUrl(format!(
            "unsupported scheme {scheme}"
        ))),
    }
}

/// Posts webhook messages. Sends exactly one request per call; retrying is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;

        Ok(Self { client })
    }

    pub async fn deliver(&self, url: &Url, message: &WebhookMessage) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(message)?;
        let host = url.host_str().unwrap_or_default();
        debug!(host, bytes = body.len(), "posting webhook message");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(host, status = status.as_u16(), "webhook accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_else(|error| {
            warn!(host, error = %error, "failed to read webhook error body");
            String::new()
        });

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(parse_webhook_url("https://chat.example/api/webhooks/1/token").is_ok());
        assert!(parse_webhook_url(" http://127.0.0.1:8080/hook ").is_ok());
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        for raw in ["", "not a url", "/api/webhooks/1", "mailto:ci@example.com"] {
            assert!(
                matches!(parse_webhook_url(raw), Err(DeliveryError::InvalidUrl(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejected_error_exposes_status() {
        let error = DeliveryError::Rejected {
            status: 500,
            body: "oops".to_string(),
        };
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.to_string(), "webhook returned 500: oops");
        assert_eq!(DeliveryError::InvalidUrl("x".to_string()).status(), None);
    }
}
