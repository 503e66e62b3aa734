use crate::application::dto::{AlertOutcome, InvocationContext, RawEvent};
use crate::application::services::{EventNormalizer, ModelInvoker};
use crate::config::AlertConfig;
use crate::enrichment::domain::UNKNOWN;
use crate::enrichment::services::{PromptBuilder, ResponseFormatter};
use crate::ports::outbound::{NotificationChannel, RemediationModel};
use crate::shared::error::{AlertError, PipelineError, Stage};
use std::time::Duration;
use tracing::{info, warn};

/// Only findings in this status produce a notification; anything else is
/// acknowledged without alerting.
const ACTIVE_STATUS: &str = "ACTIVE";

/// Fail fast when the platform grants less execution budget than a model
/// call could plausibly need.
const MIN_REMAINING_TIME: Duration = Duration::from_secs(30);

/// ProcessFindingUseCase - the finding-enrichment pipeline entry point
///
/// Sequences normalize → build prompt → invoke model → format → publish,
/// strictly in that order; any stage failure surfaces as a
/// [`PipelineError`] tagged with the failing stage and the finding id.
/// The whole invocation runs under the platform-supplied deadline.
///
/// # Type Parameters
/// * `M` - RemediationModel implementation
/// * `N` - NotificationChannel implementation
///
/// Instances hold no per-invocation state, so one use case value may serve
/// any number of concurrent invocations.
pub struct ProcessFindingUseCase<M, N> {
    invoker: ModelInvoker<M>,
    channel: N,
}

impl<M, N> ProcessFindingUseCase<M, N>
where
    M: RemediationModel,
    N: NotificationChannel,
{
    /// Creates the use case with the model-call retry policy derived from
    /// the configuration.
    pub fn new(config: &AlertConfig, model: M, channel: N) -> Self {
        Self {
            invoker: ModelInvoker::new(model, config.backoff_policy()),
            channel,
        }
    }

    /// Creates the use case with a fully custom invoker, e.g. to inject a
    /// deterministic jitter function.
    pub fn with_invoker(invoker: ModelInvoker<M>, channel: N) -> Self {
        Self { invoker, channel }
    }

    /// Processes one scan-finding event end to end.
    ///
    /// Returns [`AlertOutcome::Published`] with the delivery receipt,
    /// [`AlertOutcome::Skipped`] for events that need no notification, or
    /// a [`PipelineError`] for the platform's redelivery/dead-letter
    /// machinery. Redelivered events are processed independently; the
    /// pipeline does not deduplicate.
    pub async fn handle(
        &self,
        event: &RawEvent,
        ctx: &InvocationContext,
    ) -> Result<AlertOutcome, PipelineError> {
        let correlation = event.finding_arn().unwrap_or(UNKNOWN).to_string();

        let Some(remaining) = ctx.remaining_time() else {
            return self.run(event, ctx, &correlation).await;
        };

        if remaining < MIN_REMAINING_TIME {
            warn!(
                finding = %correlation,
                remaining_ms = remaining.as_millis() as u64,
                "insufficient invocation time remaining"
            );
            return Err(PipelineError::new(
                Stage::Received,
                correlation,
                AlertError::TransientService {
                    attempts: 0,
                    reason: format!(
                        "insufficient invocation time remaining: {}ms",
                        remaining.as_millis()
                    ),
                },
            ));
        }

        match tokio::time::timeout(remaining, self.run(event, ctx, &correlation)).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::new(
                Stage::Received,
                correlation,
                AlertError::TransientService {
                    attempts: 0,
                    reason: "invocation deadline exceeded".to_string(),
                },
            )),
        }
    }

    async fn run(
        &self,
        event: &RawEvent,
        ctx: &InvocationContext,
        correlation: &str,
    ) -> Result<AlertOutcome, PipelineError> {
        info!(
            finding = %correlation,
            request = %ctx.request_id(),
            source = event.source.as_deref().unwrap_or(UNKNOWN),
            "received scan finding event"
        );

        if let Some(status) = event.status() {
            if !status.eq_ignore_ascii_case(ACTIVE_STATUS) {
                info!(finding = %correlation, %status, "skipping non-active finding");
                return Ok(AlertOutcome::Skipped {
                    reason: format!("finding status is {}", status),
                });
            }
        }

        let finding = EventNormalizer::normalize(event)
            .map_err(|e| PipelineError::new(Stage::Normalized, correlation, e))?;
        info!(finding = %finding.finding_id, severity = %finding.severity, "event normalized");

        let prompt = PromptBuilder::build(&finding);
        info!(
            finding = %finding.finding_id,
            prompt_chars = prompt.len(),
            truncated = prompt.truncated(),
            "prompt built"
        );

        let response = self
            .invoker
            .invoke(&prompt)
            .await
            .map_err(|e| PipelineError::new(Stage::ModelInvoked, finding.finding_id.as_str(), e))?;
        info!(
            finding = %finding.finding_id,
            guidance_chars = response.text.chars().count(),
            "model invocation complete"
        );

        let message = ResponseFormatter::format(&finding, &response);
        info!(finding = %finding.finding_id, subject = %message.subject, "notification formatted");

        let receipt = self
            .channel
            .publish(&message)
            .await
            .map_err(|e| PipelineError::new(Stage::Published, finding.finding_id.as_str(), e))?;
        info!(
            finding = %finding.finding_id,
            receipt = %receipt.message_id,
            "notification published"
        );

        Ok(AlertOutcome::Published {
            finding_id: finding.finding_id.as_str().to_string(),
            receipt,
        })
    }
}
