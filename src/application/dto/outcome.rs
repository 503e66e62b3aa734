use crate::enrichment::domain::DeliveryReceipt;
use std::time::Duration;
use uuid::Uuid;

/// Context supplied by the invoking platform for one invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: String,
    remaining_time: Option<Duration>,
}

impl InvocationContext {
    /// Context with a generated request id and no deadline.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            remaining_time: None,
        }
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            remaining_time: None,
        }
    }

    /// Remaining execution budget granted by the platform. The pipeline
    /// fails fast when it is too small to complete, and is cancelled when
    /// it elapses mid-flight.
    pub fn with_remaining_time(mut self, remaining: Duration) -> Self {
        self.remaining_time = Some(remaining);
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn remaining_time(&self) -> Option<Duration> {
        self.remaining_time
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one successful invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// The alert was delivered; carries the channel receipt.
    Published {
        finding_id: String,
        receipt: DeliveryReceipt,
    },
    /// The event was acknowledged without a notification (e.g. the finding
    /// is no longer active).
    Skipped { reason: String },
}

impl AlertOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, AlertOutcome::Published { .. })
    }
}
