use crate::config::AlertConfig;
use crate::enrichment::domain::{DeliveryReceipt, NotificationMessage};
use crate::ports::outbound::NotificationChannel;
use crate::shared::error::AlertError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Receipt id used when the channel acknowledged the publish without
/// returning a message id of its own.
const UNCONFIRMED_RECEIPT: &str = "unconfirmed";

/// WebhookChannel adapter publishing alerts to an HTTP pub/sub topic
///
/// Sends one `POST` with a `{subject, message}` JSON document per publish.
/// Rejections are surfaced as [`AlertError::Publish`] and never retried
/// here; redelivery is the platform's concern.
pub struct WebhookChannel {
    client: reqwest::Client,
    topic_url: String,
}

impl WebhookChannel {
    pub fn new(config: &AlertConfig) -> crate::shared::Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("scan-alert/{}", version);
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            topic_url: config.topic_url.clone(),
        })
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn publish(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, AlertError> {
        let body = PublishRequest {
            subject: &message.subject,
            message: &message.body,
        };

        debug!(topic = %self.topic_url, subject = %message.subject, "publishing notification");

        let response = self
            .client
            .post(&self.topic_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AlertError::Publish {
                reason: if e.is_timeout() {
                    "publish request timed out".to_string()
                } else {
                    format!("publish request failed: {}", e)
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::Publish {
                reason: format!("notification channel returned status {}", status),
            });
        }

        // The channel acknowledged; a missing or undecodable message id is
        // not a failure.
        let message_id = response
            .json::<PublishResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id)
            .unwrap_or_else(|| UNCONFIRMED_RECEIPT.to_string());

        Ok(DeliveryReceipt::new(message_id))
    }
}

// Notification channel request/response structures

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    #[serde(rename = "messageId", default)]
    message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AlertConfig {
        AlertConfig::new(
            "https://alerts.example.com/topics/security",
            "https://models.example.com",
            "titan-text-express-v1",
        )
    }

    #[test]
    fn test_webhook_channel_creation() {
        let channel = WebhookChannel::new(&config());
        assert!(channel.is_ok());
    }

    #[test]
    fn test_publish_request_serialize() {
        let request = PublishRequest {
            subject: "[HIGH] i-abc openssl",
            message: "remediation details",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"subject\":\"[HIGH] i-abc openssl\""));
        assert!(json.contains("\"message\":\"remediation details\""));
    }

    #[test]
    fn test_publish_response_deserialize() {
        let json = r#"{"messageId": "7b1e4c3a"}"#;
        let response: PublishResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message_id.as_deref(), Some("7b1e4c3a"));
    }

    #[test]
    fn test_publish_response_deserialize_without_id() {
        let json = r#"{}"#;
        let response: PublishResponse = serde_json::from_str(json).unwrap();
        assert!(response.message_id.is_none());
    }
}
