/// Remediation guidance returned by the generative-model service.
///
/// `truncated` is set when the prompt was cut to fit the budget, so the
/// notification can tell operators the guidance saw partial input. A fresh
/// value is produced per invocation; no retry state lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub text: String,
    pub truncated: bool,
}

impl ModelResponse {
    pub fn new(text: impl Into<String>, truncated: bool) -> Self {
        Self {
            text: text.into(),
            truncated,
        }
    }
}

/// The message delivered to the notification channel.
///
/// The subject always encodes severity and resource id so operators can
/// triage from the subject line alone.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Opaque confirmation returned by the notification channel on publish.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

impl DeliveryReceipt {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }
}
