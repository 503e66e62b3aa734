use crate::shared::error::AlertError;
use chrono::{DateTime, Utc};

/// Sentinel for optional fields the scanner did not supply.
///
/// Downstream formatting is total because absent values are always this
/// sentinel, never an empty string or a missing key.
pub const UNKNOWN: &str = "unknown";

/// Maximum length for finding identifiers (security limit)
const MAX_FINDING_ID_LENGTH: usize = 2048;

/// Maximum length for resource identifiers (security limit)
const MAX_RESOURCE_ID_LENGTH: usize = 512;

/// NewType wrapper for the finding identifier with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingId(String);

impl FindingId {
    pub fn new(id: String) -> Result<Self, AlertError> {
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(AlertError::validation("finding identifier is missing or empty"));
        }

        if id.len() > MAX_FINDING_ID_LENGTH {
            return Err(AlertError::validation(format!(
                "finding identifier is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_FINDING_ID_LENGTH
            )));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for the affected-resource identifier with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: String) -> Result<Self, AlertError> {
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(AlertError::validation("resource identifier must not be empty"));
        }

        if id.len() > MAX_RESOURCE_ID_LENGTH {
            return Err(AlertError::validation(format!(
                "resource identifier is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_RESOURCE_ID_LENGTH
            )));
        }

        Ok(Self(id))
    }

    /// Sentinel resource id for events whose resource list is absent.
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finding severity as reported by the scanner.
///
/// Anything outside the four known levels (including the scanner's
/// INFORMATIONAL and UNTRIAGED values) maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    pub fn parse(value: &str) -> Severity {
        match value.trim().to_uppercase().as_str() {
            "LOW" => Severity::Low,
            "MEDIUM" => Severity::Medium,
            "HIGH" => Severity::High,
            "CRITICAL" => Severity::Critical,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical record of one scan finding.
///
/// Every downstream stage consumes this record and nothing else from the
/// raw event. `finding_id` and `resource_id` are guaranteed non-empty by
/// their newtypes; the remaining string fields carry the [`UNKNOWN`]
/// sentinel when the scanner omitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFinding {
    pub finding_id: FindingId,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub resource_id: ResourceId,
    pub package_name: String,
    pub package_version: String,
    pub vulnerability_id: String,
    pub account: String,
    pub region: String,
    pub inspector_score: Option<f64>,
    pub first_observed_at: Option<DateTime<Utc>>,
}
