use std::fmt;
use thiserror::Error;

/// Pipeline stages, in execution order.
///
/// The orchestrator advances through these states one at a time; a failure
/// is tagged with the stage it failed to reach so platform-side failure
/// records can be filtered without parsing message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Normalized,
    PromptBuilt,
    ModelInvoked,
    Formatted,
    Published,
    Completed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Normalized => "normalized",
            Stage::PromptBuilt => "prompt_built",
            Stage::ModelInvoked => "model_invoked",
            Stage::Formatted => "formatted",
            Stage::Published => "published",
            Stage::Completed => "completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified failures of the finding-enrichment pipeline.
///
/// The class is the contract: `Validation` and `PermanentService` can never
/// succeed on redelivery of the same event, `TransientService` already
/// consumed the local retry budget, and `Publish` is left to the platform's
/// own redelivery mechanism.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("event validation failed: {reason}")]
    Validation { reason: String },

    #[error("model service unavailable after {attempts} attempt(s): {reason}")]
    TransientService { attempts: u32, reason: String },

    #[error("model service rejected the request: {reason}")]
    PermanentService { reason: String },

    #[error("notification channel rejected the publish: {reason}")]
    Publish { reason: String },
}

impl AlertError {
    pub fn validation(reason: impl Into<String>) -> Self {
        AlertError::Validation {
            reason: reason.into(),
        }
    }
}

/// A pipeline failure tagged with its originating stage and correlation id.
///
/// The correlation id is the finding identifier, or `"unknown"` when the
/// failure happened before normalization could extract one.
#[derive(Debug, Error)]
#[error("finding {finding_id}: pipeline failed at stage {stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub finding_id: String,
    #[source]
    pub source: AlertError,
}

impl PipelineError {
    pub fn new(stage: Stage, finding_id: impl Into<String>, source: AlertError) -> Self {
        Self {
            stage,
            finding_id: finding_id.into(),
            source,
        }
    }
}
