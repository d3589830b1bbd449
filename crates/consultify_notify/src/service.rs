// --- File: crates/consultify_notify/src/service.rs ---

use consultify_common::services::{BoxFuture, NotificationEvent, NotificationSink};
use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::info;

/// Shared HTTP client for webhook delivery. Reqwest clients pool
/// connections internally, so one per process is enough.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Notification-delivery error types.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error occurred while performing the webhook request
    #[error("Webhook request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the webhook endpoint
    #[error("Webhook returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },
}

/// Delivers events by POSTing JSON to a configured webhook URL.
///
/// The receiving end (a chat integration, an ops relay) decides how to fan
/// the message out; this sink only guarantees the narrow fire-and-forget
/// contract the scheduling core expects.
pub struct WebhookNotifier {
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
        }
    }
}

/// Builds the webhook body for one event.
fn render_payload(event: &NotificationEvent) -> serde_json::Value {
    serde_json::json!({
        "kind": event.kind,
        "content": event.message,
        "recipient": event.recipient,
    })
}

impl NotificationSink for WebhookNotifier {
    type Error = NotifyError;

    fn publish(&self, event: NotificationEvent) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            let response = HTTP_CLIENT
                .post(&self.webhook_url)
                .json(&render_payload(&event))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(NotifyError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            Ok(())
        })
    }
}

/// Logs events instead of delivering them. Used when no webhook is
/// configured or delivery is disabled at runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    type Error = NotifyError;

    fn publish(&self, event: NotificationEvent) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            info!(
                kind = %event.kind,
                recipient = ?event.recipient,
                "notification: {}",
                event.message
            );
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consultify_common::services::EventKind;

    #[test]
    fn payload_carries_kind_content_and_recipient() {
        let event = NotificationEvent {
            kind: EventKind::Booked,
            message: "New consultation booked".to_string(),
            recipient: Some("user-1".to_string()),
        };

        let payload = render_payload(&event);
        assert_eq!(payload["kind"], "booked");
        assert_eq!(payload["content"], "New consultation booked");
        assert_eq!(payload["recipient"], "user-1");
    }

    #[tokio::test]
    async fn tracing_notifier_always_succeeds() {
        let sink = TracingNotifier;
        let event = NotificationEvent {
            kind: EventKind::Reminder,
            message: "Upcoming consultation".to_string(),
            recipient: None,
        };
        assert!(sink.publish(event).await.is_ok());
    }
}
