use crate::enrichment::domain::{DeliveryReceipt, NotificationMessage};
use crate::shared::error::AlertError;
use async_trait::async_trait;

/// NotificationChannel port for alert delivery
///
/// Publishing is treated as idempotent at the channel level: the upstream
/// event source delivers at least once, so duplicate publishes for the
/// same finding are acceptable and consumers must tolerate them.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers the message and returns the channel's receipt.
    ///
    /// # Errors
    /// Returns [`AlertError::Publish`] on channel rejection. Failures are
    /// surfaced, never retried here; redelivery is a platform concern.
    async fn publish(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, AlertError>;
}
