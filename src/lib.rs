//! scan-alert - LLM-enriched alerting for vulnerability scan findings
//!
//! This library turns a raw scan-finding event into a human-readable
//! operator alert: the event is validated and flattened, rendered into a
//! bounded model prompt, enriched with remediation guidance from a
//! generative-model service, and published to a notification channel.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Enrichment core** (`enrichment`): Pure domain models, services, and
//!   retry policies
//! - **Application Layer** (`application`): The pipeline use case, DTOs,
//!   and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common result and error types
//!
//! Each invocation is isolated: all state is created fresh per event and
//! discarded afterwards, so one use-case value can serve concurrent
//! invocations. Redelivered events are processed independently: the
//! pipeline does not deduplicate, and channel consumers must tolerate
//! duplicate alerts for the same finding.
//!
//! # Example
//!
//! ```no_run
//! use scan_alert::prelude::*;
//!
//! # async fn demo(payload: &str) -> scan_alert::shared::Result<()> {
//! // Configuration is read once and stays immutable
//! let config = AlertConfig::from_env()?;
//!
//! // Create adapters
//! let model = HttpModelClient::new(&config)?;
//! let channel = WebhookChannel::new(&config)?;
//!
//! // Create use case
//! let use_case = ProcessFindingUseCase::new(&config, model, channel);
//!
//! // Process one event from the platform
//! let event: RawEvent = serde_json::from_str(payload)?;
//! let outcome = use_case.handle(&event, &InvocationContext::new()).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod enrichment;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::network::{HttpModelClient, WebhookChannel};
    pub use crate::application::dto::{AlertOutcome, InvocationContext, RawEvent};
    pub use crate::application::services::{EventNormalizer, ModelInvoker};
    pub use crate::application::use_cases::ProcessFindingUseCase;
    pub use crate::config::AlertConfig;
    pub use crate::enrichment::domain::{
        DeliveryReceipt, FindingId, ModelResponse, NormalizedFinding, NotificationMessage,
        PromptContext, ResourceId, Severity,
    };
    pub use crate::enrichment::policies::{no_jitter, BackoffPolicy};
    pub use crate::enrichment::services::{PromptBuilder, ResponseFormatter};
    pub use crate::ports::outbound::{ModelCallError, NotificationChannel, RemediationModel};
    pub use crate::shared::error::{AlertError, PipelineError, Stage};
    pub use crate::shared::Result;
}
