use async_trait::async_trait;
use scan_alert::prelude::*;
use std::collections::VecDeque;
use std::result::Result;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Mock RemediationModel for testing
///
/// Serves a scripted sequence of failures before answering with the
/// configured guidance text, and counts every call.
pub struct MockRemediationModel {
    calls: Arc<AtomicU32>,
    script: Mutex<VecDeque<ModelCallError>>,
    text: String,
}

impl MockRemediationModel {
    pub fn new(text: &str) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            script: Mutex::new(VecDeque::new()),
            text: text.to_string(),
        }
    }

    /// Queues `count` transient failures ahead of the first success.
    pub fn with_transient_failures(self, count: u32, reason: &str) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            for _ in 0..count {
                script.push_back(ModelCallError::transient(reason));
            }
        }
        self
    }

    /// Queues a permanent failure as the first answer.
    pub fn with_permanent_failure(self, reason: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ModelCallError::permanent(reason));
        self
    }

    /// Shared call counter, usable after the mock moved into a use case.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl RemediationModel for MockRemediationModel {
    async fn generate(&self, _prompt: &PromptContext) -> Result<ModelResponse, ModelCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.script.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(ModelResponse::new(self.text.clone(), false))
    }

    fn model_id(&self) -> &str {
        "mock-remediation-model"
    }
}
