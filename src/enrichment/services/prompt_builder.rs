use crate::enrichment::domain::{NormalizedFinding, PromptContext, UNKNOWN};

/// Per-field character budgets. Oversized fields are cut with an explicit
/// ellipsis marker, never silently dropped.
const TITLE_BUDGET: usize = 200;
const DESCRIPTION_BUDGET: usize = 1000;
const PACKAGE_BUDGET: usize = 100;

/// Hard cap on the rendered prompt, in characters.
pub const MAX_PROMPT_LEN: usize = 2400;

/// Marker appended wherever text was cut to fit its budget.
pub const ELLIPSIS: &str = "…";

/// Character sequences that resemble prompt-instruction syntax. They are
/// blanked before finding text is embedded, so a hostile finding title
/// cannot smuggle directives into the model prompt.
const INSTRUCTION_MARKERS: [&str; 6] = ["```", "###", "<|", "|>", "{{", "}}"];

/// PromptBuilder renders a NormalizedFinding into a bounded model prompt.
///
/// Rendering is deterministic: identical findings yield byte-identical
/// prompt text. All finding-supplied text passes through [`sanitize`]
/// before it is embedded.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(finding: &NormalizedFinding) -> PromptContext {
        let (title, title_cut) = clip(&sanitize(&finding.title), TITLE_BUDGET);
        let (description, description_cut) =
            clip(&sanitize(&finding.description), DESCRIPTION_BUDGET);
        let (package_name, name_cut) = clip(&sanitize(&finding.package_name), PACKAGE_BUDGET);
        let (package_version, version_cut) =
            clip(&sanitize(&finding.package_version), PACKAGE_BUDGET);

        let observed = finding
            .first_observed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let score = finding
            .inspector_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut text = String::new();
        text.push_str("You are an experienced cloud security engineer.\n\n");
        text.push_str(
            "You are given a vulnerability-scan finding for a cloud compute resource.\n",
        );
        text.push_str("1. Explain the vulnerability in clear, concise language.\n");
        text.push_str("2. Provide specific remediation steps, including relevant Linux commands.\n");
        text.push_str("3. Keep the answer under 600 words.\n\n");
        text.push_str("Finding:\n");
        text.push_str(&format!("- id: {}\n", finding.finding_id));
        text.push_str(&format!("- severity: {}\n", finding.severity));
        text.push_str(&format!("- score: {}\n", score));
        text.push_str(&format!("- title: {}\n", title));
        text.push_str(&format!("- description: {}\n", description));
        text.push_str(&format!("- resource: {}\n", finding.resource_id));
        text.push_str(&format!("- package: {} {}\n", package_name, package_version));
        text.push_str(&format!("- vulnerability: {}\n", finding.vulnerability_id));
        text.push_str(&format!("- first observed: {}\n", observed));

        let (text, total_cut) = clip(&text, MAX_PROMPT_LEN);
        let truncated = title_cut || description_cut || name_cut || version_cut || total_cut;

        PromptContext::new(text, truncated)
    }
}

/// Blanks control characters and instruction-like markers, then collapses
/// whitespace runs into single spaces.
fn sanitize(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    for marker in INSTRUCTION_MARKERS {
        cleaned = cleaned.replace(marker, " ");
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `input` to at most `budget` characters, appending the ellipsis
/// marker when anything was removed. Operates on characters, not bytes,
/// so multi-byte text is never split mid-codepoint.
fn clip(input: &str, budget: usize) -> (String, bool) {
    if input.chars().count() <= budget {
        return (input.to_string(), false);
    }
    let kept: String = input.chars().take(budget.saturating_sub(1)).collect();
    (format!("{}{}", kept, ELLIPSIS), true)
}
