use crate::config::AlertConfig;
use crate::enrichment::domain::{ModelResponse, PromptContext};
use crate::ports::outbound::{ModelCallError, RemediationModel};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TEMPERATURE: f32 = 0.3;
const TOP_P: f32 = 0.9;
const MAX_TOKEN_COUNT: u32 = 2048;

/// HttpModelClient adapter for the generative-model REST service
///
/// Issues one `POST {endpoint}/model/{model_id}/invoke` per call; the
/// client-level timeout bounds each attempt with a fresh window, so the
/// invoker's retries never share a deadline.
///
/// Classification at this boundary:
/// - 429, 408, 5xx, and transport/timeout errors are transient
/// - 401/403 (credentials), 404 (unknown model), and remaining 4xx
///   (malformed request) are permanent
pub struct HttpModelClient {
    client: reqwest::Client,
    invoke_url: String,
    model_id: String,
    api_key: Option<String>,
}

impl HttpModelClient {
    pub fn new(config: &AlertConfig) -> crate::shared::Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("scan-alert/{}", version);
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(user_agent)
            .build()?;

        // URL-encode the model id so it is safe as a path segment.
        let invoke_url = format!(
            "{}/model/{}/invoke",
            config.model_endpoint.trim_end_matches('/'),
            urlencoding::encode(&config.model_id)
        );

        Ok(Self {
            client,
            invoke_url,
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn classify_status(status: StatusCode) -> ModelCallError {
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::REQUEST_TIMEOUT {
            return ModelCallError::transient(format!("model service throttled: {}", status));
        }
        if status.is_server_error() {
            return ModelCallError::transient(format!("model service error: {}", status));
        }
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ModelCallError::permanent(format!("model service authentication failed: {}", status))
            }
            StatusCode::NOT_FOUND => {
                ModelCallError::permanent(format!("unknown model identifier: {}", status))
            }
            _ => ModelCallError::permanent(format!("model service rejected the request: {}", status)),
        }
    }

    fn classify_transport(error: reqwest::Error) -> ModelCallError {
        if error.is_timeout() {
            return ModelCallError::transient("model request timed out");
        }
        ModelCallError::transient(format!("model request failed: {}", error))
    }
}

#[async_trait]
impl RemediationModel for HttpModelClient {
    async fn generate(&self, prompt: &PromptContext) -> Result<ModelResponse, ModelCallError> {
        let body = InvokeRequest {
            input_text: prompt.text(),
            text_generation_config: TextGenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_token_count: MAX_TOKEN_COUNT,
            },
        };

        debug!(model = %self.model_id, prompt_chars = prompt.len(), "calling remediation model");

        let mut request = self.client.post(&self.invoke_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(Self::classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_status(status));
        }

        let payload: InvokeResponse = response
            .json()
            .await
            .map_err(|e| ModelCallError::transient(format!("undecodable model response: {}", e)))?;

        // An empty result set is not an error; the formatter substitutes
        // its fallback guidance for empty text.
        let text = payload
            .results
            .into_iter()
            .next()
            .map(|r| r.output_text)
            .unwrap_or_default();

        Ok(ModelResponse::new(text.trim().to_string(), prompt.truncated()))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Model service request/response structures

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
    #[serde(rename = "textGenerationConfig")]
    text_generation_config: TextGenerationConfig,
}

#[derive(Debug, Serialize)]
struct TextGenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxTokenCount")]
    max_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    results: Vec<InvokeResult>,
}

#[derive(Debug, Deserialize)]
struct InvokeResult {
    #[serde(rename = "outputText", default)]
    output_text: String,
}
