use crate::enrichment::domain::{ModelResponse, PromptContext};
use crate::enrichment::policies::BackoffPolicy;
use crate::ports::outbound::{ModelCallError, RemediationModel};
use crate::shared::error::AlertError;
use tracing::{debug, error, warn};

/// ModelInvoker owns the retry loop around the model port.
///
/// Transient failures are retried per the injected [`BackoffPolicy`];
/// permanent failures fail immediately without consuming retry budget.
/// The invoker never inspects transport details; classification happened
/// at the port boundary.
pub struct ModelInvoker<M> {
    model: M,
    policy: BackoffPolicy,
}

impl<M: RemediationModel> ModelInvoker<M> {
    pub fn new(model: M, policy: BackoffPolicy) -> Self {
        Self { model, policy }
    }

    /// Calls the model, retrying transient failures.
    ///
    /// # Errors
    /// - [`AlertError::PermanentService`] on the first permanent failure
    /// - [`AlertError::TransientService`] once the attempt budget is
    ///   exhausted, carrying the last underlying cause
    pub async fn invoke(&self, prompt: &PromptContext) -> Result<ModelResponse, AlertError> {
        let max_attempts = self.policy.max_attempts();
        let mut last_reason: Option<String> = None;

        for attempt in 1..=max_attempts {
            debug!(
                attempt,
                max_attempts,
                model = self.model.model_id(),
                "invoking remediation model"
            );

            match self.model.generate(prompt).await {
                Ok(mut response) => {
                    if prompt.truncated() {
                        response.truncated = true;
                    }
                    return Ok(response);
                }
                Err(ModelCallError::Permanent { reason }) => {
                    error!(%reason, "permanent model failure, not retrying");
                    return Err(AlertError::PermanentService { reason });
                }
                Err(ModelCallError::Transient { reason }) => {
                    warn!(attempt, max_attempts, %reason, "transient model failure");
                    last_reason = Some(reason);
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }

        Err(AlertError::TransientService {
            attempts: max_attempts,
            reason: last_reason.unwrap_or_else(|| "no attempt was made".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::domain::{FindingId, NormalizedFinding, ResourceId, Severity, UNKNOWN};
    use crate::enrichment::policies::no_jitter;
    use crate::enrichment::services::PromptBuilder;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Mock model failing transiently a scripted number of times before
    /// succeeding, or always failing with a fixed error.
    struct ScriptedModel {
        calls: AtomicU32,
        transient_failures: u32,
        permanent: bool,
        text: String,
    }

    impl ScriptedModel {
        fn succeeding_after(transient_failures: u32, text: &str) -> Self {
            Self {
                calls: AtomicU32::new(0),
                transient_failures,
                permanent: false,
                text: text.to_string(),
            }
        }

        fn always_transient() -> Self {
            Self::succeeding_after(u32::MAX, "")
        }

        fn permanent() -> Self {
            Self {
                calls: AtomicU32::new(0),
                transient_failures: 0,
                permanent: true,
                text: String::new(),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemediationModel for ScriptedModel {
        async fn generate(&self, _prompt: &PromptContext) -> Result<ModelResponse, ModelCallError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.permanent {
                return Err(ModelCallError::permanent("status 403"));
            }
            if call <= self.transient_failures {
                return Err(ModelCallError::transient("status 503"));
            }
            Ok(ModelResponse::new(self.text.clone(), false))
        }

        fn model_id(&self) -> &str {
            "scripted-model"
        }
    }

    fn prompt() -> PromptContext {
        let finding = NormalizedFinding {
            finding_id: FindingId::new("arn:finding/abc".to_string()).unwrap(),
            severity: Severity::High,
            title: "Outdated OpenSSL package".to_string(),
            description: "description".to_string(),
            resource_id: ResourceId::new("i-0123456789abcdef0".to_string()).unwrap(),
            package_name: "openssl".to_string(),
            package_version: "1.0.2k".to_string(),
            vulnerability_id: "CVE-2024-5535".to_string(),
            account: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            inspector_score: None,
            first_observed_at: None,
        };
        PromptBuilder::build(&finding)
    }

    fn fast_policy(max_attempts: u32) -> BackoffPolicy {
        BackoffPolicy::with_jitter(max_attempts, Duration::from_millis(1), no_jitter)
    }

    #[tokio::test]
    async fn test_invoke_succeeds_first_try() {
        let model = ScriptedModel::succeeding_after(0, "patch the package");
        let invoker = ModelInvoker::new(model, fast_policy(3));
        let response = invoker.invoke(&prompt()).await.unwrap();
        assert_eq!(response.text, "patch the package");
        assert_eq!(invoker.model.calls(), 1);
    }

    #[tokio::test]
    async fn test_invoke_retries_k_transient_failures_then_succeeds() {
        let model = ScriptedModel::succeeding_after(2, "patch the package");
        let invoker = ModelInvoker::new(model, fast_policy(5));
        let response = invoker.invoke(&prompt()).await.unwrap();
        assert_eq!(response.text, "patch the package");
        assert_eq!(invoker.model.calls(), 3);
    }

    #[tokio::test]
    async fn test_invoke_exhausts_budget_with_transient_error() {
        let model = ScriptedModel::always_transient();
        let invoker = ModelInvoker::new(model, fast_policy(3));
        let err = invoker.invoke(&prompt()).await.unwrap_err();
        assert_eq!(invoker.model.calls(), 3);
        match err {
            AlertError::TransientService { attempts, reason } => {
                assert_eq!(attempts, 3);
                assert!(reason.contains("status 503"));
            }
            other => panic!("expected TransientService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_permanent_failure_makes_one_call() {
        let model = ScriptedModel::permanent();
        let invoker = ModelInvoker::new(model, fast_policy(5));
        let err = invoker.invoke(&prompt()).await.unwrap_err();
        assert_eq!(invoker.model.calls(), 1);
        assert!(matches!(err, AlertError::PermanentService { .. }));
    }

    #[tokio::test]
    async fn test_invoke_marks_response_truncated_for_capped_prompt() {
        let finding = NormalizedFinding {
            finding_id: FindingId::new("arn:finding/abc".to_string()).unwrap(),
            severity: Severity::High,
            title: "t".repeat(5000),
            description: "d".repeat(20000),
            resource_id: ResourceId::unknown(),
            package_name: UNKNOWN.to_string(),
            package_version: UNKNOWN.to_string(),
            vulnerability_id: UNKNOWN.to_string(),
            account: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            inspector_score: None,
            first_observed_at: None,
        };
        let capped = PromptBuilder::build(&finding);
        assert!(capped.truncated());

        let model = ScriptedModel::succeeding_after(0, "guidance");
        let invoker = ModelInvoker::new(model, fast_policy(1));
        let response = invoker.invoke(&capped).await.unwrap();
        assert!(response.truncated);
    }
}
