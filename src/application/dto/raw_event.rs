use serde::Deserialize;

/// RawEvent - the unmodified inbound scan-finding payload
///
/// Every field is optional with a default: scanner schema drift must never
/// fail deserialization. Validity is decided by the normalizer, not by
/// serde.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "detail-type", default)]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub detail: Option<FindingDetail>,
}

impl RawEvent {
    /// Finding identifier for log correlation, if the event carries one.
    /// Available even for events that fail validation later.
    pub fn finding_arn(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.finding_arn.as_deref())
            .filter(|arn| !arn.trim().is_empty())
    }

    pub fn status(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.status.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// The nested finding detail of a scan event.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingDetail {
    #[serde(rename = "findingArn", default)]
    pub finding_arn: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "inspectorScore", default)]
    pub inspector_score: Option<f64>,
    #[serde(rename = "firstObservedAt", default)]
    pub first_observed_at: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceRef>,
    #[serde(rename = "packageVulnerabilityDetails", default)]
    pub package_vulnerability_details: Option<PackageVulnerabilityDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageVulnerabilityDetails {
    #[serde(rename = "vulnerabilityId", default)]
    pub vulnerability_id: Option<String>,
    #[serde(rename = "vulnerablePackages", default)]
    pub vulnerable_packages: Vec<VulnerablePackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VulnerablePackage {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
