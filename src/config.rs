//! Runtime configuration for the alert pipeline.
//!
//! Configuration is read once at process start and is immutable
//! thereafter; every component receives it (or values derived from it)
//! through its constructor, never from ambient globals.

use anyhow::{bail, Context};
use std::time::Duration;

use crate::enrichment::policies::BackoffPolicy;
use crate::shared::Result;

const ENV_TOPIC_URL: &str = "SCAN_ALERT_TOPIC_URL";
const ENV_MODEL_ENDPOINT: &str = "SCAN_ALERT_MODEL_ENDPOINT";
const ENV_MODEL_ID: &str = "SCAN_ALERT_MODEL_ID";
const ENV_API_KEY: &str = "SCAN_ALERT_API_KEY";
const ENV_REQUEST_TIMEOUT_SECS: &str = "SCAN_ALERT_REQUEST_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "SCAN_ALERT_MAX_ATTEMPTS";
const ENV_BACKOFF_BASE_MS: &str = "SCAN_ALERT_BACKOFF_BASE_MS";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);

/// Immutable pipeline configuration.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Notification-channel topic endpoint the alert is published to.
    pub topic_url: String,
    /// Base URL of the generative-model service.
    pub model_endpoint: String,
    /// Identifier of the model to invoke.
    pub model_id: String,
    /// Optional bearer token for the model service.
    pub api_key: Option<String>,
    /// Per-attempt timeout for both external calls.
    pub request_timeout: Duration,
    /// Maximum model-call attempts, including the first.
    pub max_attempts: u32,
    /// Base delay of the exponential model-call backoff.
    pub backoff_base: Duration,
}

impl AlertConfig {
    pub fn new(
        topic_url: impl Into<String>,
        model_endpoint: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            topic_url: topic_url.into(),
            model_endpoint: model_endpoint.into(),
            model_id: model_id.into(),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }

    /// Loads and validates configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            topic_url: require_env(ENV_TOPIC_URL)?,
            model_endpoint: require_env(ENV_MODEL_ENDPOINT)?,
            model_id: require_env(ENV_MODEL_ID)?,
            api_key: optional_env(ENV_API_KEY),
            request_timeout: Duration::from_secs(
                parse_env(ENV_REQUEST_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT.as_secs())?,
            ),
            max_attempts: parse_env(ENV_MAX_ATTEMPTS, u64::from(DEFAULT_MAX_ATTEMPTS))? as u32,
            backoff_base: Duration::from_millis(parse_env(
                ENV_BACKOFF_BASE_MS,
                DEFAULT_BACKOFF_BASE.as_millis() as u64,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_endpoint(&self.topic_url, "topic URL")?;
        validate_endpoint(&self.model_endpoint, "model endpoint")?;
        if self.model_id.trim().is_empty() {
            bail!("Invalid config: model id must not be empty.\n\n💡 Hint: set {} to the identifier of the remediation model.", ENV_MODEL_ID);
        }
        if self.max_attempts == 0 {
            bail!("Invalid config: max attempts must be at least 1.");
        }
        if self.request_timeout.is_zero() {
            bail!("Invalid config: request timeout must be greater than zero.");
        }
        Ok(())
    }

    /// The model-call retry policy derived from this configuration.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(self.max_attempts, self.backoff_base)
    }
}

fn validate_endpoint(value: &str, description: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("Invalid config: {} must not be empty.", description);
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        bail!(
            "Invalid config: {} must be an http(s) URL, got: {}",
            description,
            value
        );
    }
    Ok(())
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| {
        format!(
            "Required environment variable {} is not set.\n\n💡 Hint: the alert pipeline cannot start without it.",
            name
        )
    })
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().with_context(|| {
            format!(
                "Environment variable {} must be a positive integer, got: {}",
                name, raw
            )
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AlertConfig {
        AlertConfig::new(
            "https://alerts.example.com/topics/security",
            "https://models.example.com",
            "titan-text-express-v1",
        )
    }

    #[test]
    fn test_new_applies_defaults() {
        let config = valid_config();
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.backoff_base, DEFAULT_BACKOFF_BASE);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_topic_url_fails_validation() {
        let mut config = valid_config();
        config.topic_url = String::new();
        let err = format!("{}", config.validate().unwrap_err());
        assert!(err.contains("topic URL"));
    }

    #[test]
    fn test_non_http_endpoint_fails_validation() {
        let mut config = valid_config();
        config.model_endpoint = "ftp://models.example.com".to_string();
        let err = format!("{}", config.validate().unwrap_err());
        assert!(err.contains("http(s)"));
    }

    #[test]
    fn test_empty_model_id_fails_validation() {
        let mut config = valid_config();
        config.model_id = "   ".to_string();
        let err = format!("{}", config.validate().unwrap_err());
        assert!(err.contains("model id"));
    }

    #[test]
    fn test_zero_attempts_fails_validation() {
        let mut config = valid_config();
        config.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let mut config = valid_config();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_policy_reflects_config() {
        let mut config = valid_config();
        config.max_attempts = 5;
        config.backoff_base = Duration::from_millis(100);
        let policy = config.backoff_policy();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.base_delay(), Duration::from_millis(100));
    }
}
