use crate::enrichment::domain::{ModelResponse, PromptContext};
use async_trait::async_trait;
use thiserror::Error;

/// Classified failure of one model call attempt.
///
/// Adapters classify at the transport boundary; the invoker decides
/// whether to retry purely from the class, never from transport details.
#[derive(Debug, Clone, Error)]
pub enum ModelCallError {
    /// Worth retrying: throttling, timeouts, 5xx-class service errors.
    #[error("transient model failure: {reason}")]
    Transient { reason: String },

    /// Retry cannot succeed: bad credentials, unknown model, malformed request.
    #[error("permanent model failure: {reason}")]
    Permanent { reason: String },
}

impl ModelCallError {
    pub fn transient(reason: impl Into<String>) -> Self {
        ModelCallError::Transient {
            reason: reason.into(),
        }
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        ModelCallError::Permanent {
            reason: reason.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ModelCallError::Transient { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            ModelCallError::Transient { reason } | ModelCallError::Permanent { reason } => reason,
        }
    }
}

/// RemediationModel port for the generative-model service
///
/// One call produces one network request; retrying is the caller's
/// responsibility. Implementations must bound each attempt with their own
/// timeout and must be `Send + Sync` so invocations can run concurrently.
#[async_trait]
pub trait RemediationModel: Send + Sync {
    /// Generates remediation guidance for the rendered prompt.
    ///
    /// # Errors
    /// Returns a classified [`ModelCallError`]; the classification decides
    /// whether the invoker spends retry budget on the failure.
    async fn generate(&self, prompt: &PromptContext) -> Result<ModelResponse, ModelCallError>;

    /// Identifier of the backing model, for log correlation.
    fn model_id(&self) -> &str;
}
