use crate::enrichment::domain::{ModelResponse, NormalizedFinding, NotificationMessage, UNKNOWN};

/// Maximum subject length accepted by the notification channel.
pub const SUBJECT_MAX_LEN: usize = 100;

/// Maximum characters of model guidance carried into the body.
pub const MAX_GUIDANCE_LEN: usize = 4000;

/// Body line substituted when the model returned no usable text.
pub const FALLBACK_GUIDANCE: &str = "No remediation recommendations available at this time.";

const TRUNCATION_MARKER: &str = "… [truncated]";

/// ResponseFormatter shapes a finding plus model guidance into the
/// notification message.
///
/// The subject format is fixed (`[SEVERITY] resource-id title`) so
/// downstream filtering rules stay stable across runs.
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn format(finding: &NormalizedFinding, response: &ModelResponse) -> NotificationMessage {
        NotificationMessage::new(Self::subject(finding), Self::body(finding, response))
    }

    fn subject(finding: &NormalizedFinding) -> String {
        // Squeeze the title onto one line for the subject slot.
        let title: String = finding.title.split_whitespace().collect::<Vec<_>>().join(" ");
        let subject = format!("[{}] {} {}", finding.severity, finding.resource_id, title);
        if subject.chars().count() <= SUBJECT_MAX_LEN {
            return subject;
        }
        subject.chars().take(SUBJECT_MAX_LEN - 1).collect::<String>() + "…"
    }

    fn body(finding: &NormalizedFinding, response: &ModelResponse) -> String {
        let trimmed = response.text.trim();
        let guidance = if trimmed.is_empty() {
            FALLBACK_GUIDANCE.to_string()
        } else if trimmed.chars().count() > MAX_GUIDANCE_LEN {
            let kept: String = trimmed.chars().take(MAX_GUIDANCE_LEN).collect();
            format!("{}{}", kept, TRUNCATION_MARKER)
        } else {
            trimmed.to_string()
        };

        let observed = finding
            .first_observed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut lines = vec![
            "New vulnerability finding".to_string(),
            "=".repeat(60),
            String::new(),
            format!("Account: {}", finding.account),
            format!("Region: {}", finding.region),
            String::new(),
            format!("Severity: {}", finding.severity),
            format!("Finding: {}", finding.finding_id),
            format!("Resource: {}", finding.resource_id),
            format!("Vulnerability: {}", finding.vulnerability_id),
            format!(
                "Package: {} {}",
                finding.package_name, finding.package_version
            ),
            format!("First observed: {}", observed),
            String::new(),
            format!("Title: {}", finding.title),
            format!("Description: {}", finding.description),
            String::new(),
            "AI-generated remediation guidance:".to_string(),
            "-".repeat(60),
            guidance,
        ];

        if response.truncated {
            lines.push(String::new());
            lines.push(
                "Note: the finding text was truncated before analysis; guidance may be partial."
                    .to_string(),
            );
        }

        lines.push(String::new());
        lines.push("Note: AI recommendations should be validated before implementation.".to_string());

        lines.join("\n")
    }
}
