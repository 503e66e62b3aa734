use async_trait::async_trait;
use scan_alert::prelude::*;
use std::result::Result;
use std::sync::{Arc, Mutex};

/// Mock NotificationChannel for testing
///
/// Records every published message; can be configured to reject instead.
pub struct MockNotificationChannel {
    published: Arc<Mutex<Vec<NotificationMessage>>>,
    reject_reason: Option<String>,
}

impl MockNotificationChannel {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            reject_reason: None,
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            reject_reason: Some(reason.to_string()),
        }
    }

    /// Shared record of published messages, usable after the mock moved
    /// into a use case.
    pub fn published(&self) -> Arc<Mutex<Vec<NotificationMessage>>> {
        self.published.clone()
    }
}

impl Default for MockNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for MockNotificationChannel {
    async fn publish(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, AlertError> {
        if let Some(reason) = &self.reject_reason {
            return Err(AlertError::Publish {
                reason: reason.clone(),
            });
        }
        self.published.lock().unwrap().push(message.clone());
        Ok(DeliveryReceipt::new("mock-message-id"))
    }
}
