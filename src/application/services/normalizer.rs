use crate::application::dto::RawEvent;
use crate::enrichment::domain::{FindingId, NormalizedFinding, ResourceId, Severity, UNKNOWN};
use crate::shared::error::AlertError;
use chrono::{DateTime, Utc};

/// Scanner source tag this pipeline accepts.
pub const EXPECTED_SOURCE: &str = "aws.inspector2";

/// Event detail-type this pipeline accepts.
pub const EXPECTED_DETAIL_TYPE: &str = "Inspector2 Finding";

/// EventNormalizer validates and flattens a raw scan event into the
/// canonical finding record.
///
/// Pure function: no I/O, no side effects, identical input yields
/// identical output. Only four conditions fail (wrong source, wrong
/// detail-type, missing detail, missing finding identifier); every other
/// absent field degrades to the `"unknown"` sentinel so downstream
/// formatting stays total.
pub struct EventNormalizer;

impl EventNormalizer {
    pub fn normalize(event: &RawEvent) -> Result<NormalizedFinding, AlertError> {
        match event.source.as_deref() {
            Some(EXPECTED_SOURCE) => {}
            Some(other) => {
                return Err(AlertError::validation(format!(
                    "unexpected event source: {}",
                    other
                )))
            }
            None => return Err(AlertError::validation("event source is missing")),
        }

        match event.detail_type.as_deref() {
            Some(EXPECTED_DETAIL_TYPE) => {}
            Some(other) => {
                return Err(AlertError::validation(format!(
                    "unexpected detail-type: {}",
                    other
                )))
            }
            None => return Err(AlertError::validation("event detail-type is missing")),
        }

        let detail = event
            .detail
            .as_ref()
            .ok_or_else(|| AlertError::validation("event is missing the finding detail"))?;

        let finding_id = FindingId::new(detail.finding_arn.clone().unwrap_or_default())?;

        let severity = detail
            .severity
            .as_deref()
            .map(Severity::parse)
            .unwrap_or(Severity::Unknown);

        let resource_id = match detail
            .resources
            .first()
            .and_then(|r| r.id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => ResourceId::new(id.to_string())?,
            None => ResourceId::unknown(),
        };

        let packages = detail.package_vulnerability_details.as_ref();
        let first_package = packages.and_then(|p| p.vulnerable_packages.first());

        Ok(NormalizedFinding {
            finding_id,
            severity,
            title: text_or_unknown(detail.title.as_deref()),
            description: text_or_unknown(detail.description.as_deref()),
            resource_id,
            package_name: text_or_unknown(first_package.and_then(|p| p.name.as_deref())),
            package_version: text_or_unknown(first_package.and_then(|p| p.version.as_deref())),
            vulnerability_id: text_or_unknown(packages.and_then(|p| p.vulnerability_id.as_deref())),
            account: text_or_unknown(event.account.as_deref()),
            region: text_or_unknown(event.region.as_deref()),
            inspector_score: detail.inspector_score,
            first_observed_at: detail
                .first_observed_at
                .as_deref()
                .and_then(parse_timestamp),
        })
    }
}

fn text_or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => UNKNOWN.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
