//! Drift detector: verify that prompt text still honors the contract.
//!
//! The detector rebuilds every expected line from the spec through the
//! same vocabulary the compiler used, then checks the text that actually
//! reached the renderer (the revised prompt when there is one).
//!
//! A missing section heading aborts with [`DetectError`]. Everything else
//! is collected as a soft finding; each finding yields exactly one
//! violation and one paired fix.

use inkpage_spec::ColoringPageSpec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DetectError;
use crate::heading::{FORBIDDEN_TOKENS, Heading, NEGATIVE_PROMPT_HEADING};
use crate::sections::SectionIndex;
use crate::vocabulary::{self, REQUIRED_PHRASES};

/// Violations that take the confidence score to zero.
pub const CONFIDENCE_DECAY_SPAN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    MissingAlignmentPhrase,
    MissingPageSize,
    MissingAlignmentLine,
    MissingRequiredPhrase,
    MissingOptionLine,
    MissingNegativeLine,
    ForbiddenToken,
    ForbiddenHeading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixCode {
    AddAlignmentPhrase,
    AddPageSize,
    AddAlignmentLine,
    AddRequiredPhrase,
    AddOptionLine,
    AddNegativeLine,
    RemoveForbiddenToken,
    RemoveForbiddenHeading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedFix {
    pub code: FixCode,
    pub message: String,
}

/// Result of one verification call. Computed fresh, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub violations: Vec<Violation>,
    pub confidence_score: f64,
    pub recommended_fixes: Vec<RecommendedFix>,
}

impl DriftReport {
    fn from_findings(findings: &[Finding]) -> Self {
        Self {
            violations: findings.iter().map(Finding::violation).collect(),
            confidence_score: confidence_score(findings.len()),
            recommended_fixes: findings.iter().map(Finding::fix).collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity == severity)
            .count()
    }
}

/// Linear decay with violation count. A coarse UI hint, not a probability.
pub fn confidence_score(violation_count: usize) -> f64 {
    (1.0 - violation_count as f64 / CONFIDENCE_DECAY_SPAN as f64).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Finding {
    MissingAlignmentPhrase(&'static str),
    MissingPageSize(&'static str),
    MissingAlignmentLine(String),
    MissingRequiredPhrase(&'static str),
    MissingOptionLine(String),
    MissingNegativeLine(&'static str),
    ForbiddenToken(&'static str),
    ForbiddenHeading(String),
}

impl Finding {
    fn violation(&self) -> Violation {
        let (code, message, severity) = match self {
            Finding::MissingAlignmentPhrase(text) => (
                ViolationCode::MissingAlignmentPhrase,
                format!("Alignment phrase missing: {text}"),
                Severity::Error,
            ),
            Finding::MissingPageSize(text) => (
                ViolationCode::MissingPageSize,
                format!("Page size line missing: {text}"),
                Severity::Error,
            ),
            Finding::MissingAlignmentLine(text) => (
                ViolationCode::MissingAlignmentLine,
                format!("Alignment line missing: {text}"),
                Severity::Error,
            ),
            Finding::MissingRequiredPhrase(text) => (
                ViolationCode::MissingRequiredPhrase,
                format!("Required phrase missing: {text}"),
                Severity::Error,
            ),
            Finding::MissingOptionLine(text) => (
                ViolationCode::MissingOptionLine,
                format!("Missing option line: {text}"),
                Severity::Error,
            ),
            Finding::MissingNegativeLine(text) => (
                ViolationCode::MissingNegativeLine,
                format!("Missing negative line: {text}"),
                Severity::Error,
            ),
            Finding::ForbiddenToken(token) => (
                ViolationCode::ForbiddenToken,
                format!("Forbidden token present: {token}"),
                Severity::Error,
            ),
            Finding::ForbiddenHeading(heading) => (
                ViolationCode::ForbiddenHeading,
                format!("Forbidden heading present: {heading}"),
                Severity::Warning,
            ),
        };
        Violation {
            code,
            message,
            severity,
        }
    }

    fn fix(&self) -> RecommendedFix {
        let (code, message) = match self {
            Finding::MissingAlignmentPhrase(text) => (
                FixCode::AddAlignmentPhrase,
                format!("Add alignment phrase: {text}"),
            ),
            Finding::MissingPageSize(text) => {
                (FixCode::AddPageSize, format!("Add page size line: {text}"))
            }
            Finding::MissingAlignmentLine(text) => (
                FixCode::AddAlignmentLine,
                format!("Add alignment line: {text}"),
            ),
            Finding::MissingRequiredPhrase(text) => (
                FixCode::AddRequiredPhrase,
                format!("Add required phrase: {text}"),
            ),
            Finding::MissingOptionLine(text) => {
                (FixCode::AddOptionLine, format!("Add option line: {text}"))
            }
            Finding::MissingNegativeLine(text) => (
                FixCode::AddNegativeLine,
                format!("Add negative line: {text}"),
            ),
            Finding::ForbiddenToken(token) => (
                FixCode::RemoveForbiddenToken,
                format!("Remove forbidden token: {token}"),
            ),
            Finding::ForbiddenHeading(heading) => (
                FixCode::RemoveForbiddenHeading,
                format!("Remove heading: {heading}"),
            ),
        };
        RecommendedFix { code, message }
    }
}

/// The text that reached the renderer: the revision when non-empty.
pub fn checked_text<'a>(prompt_sent: &'a str, revised_prompt: Option<&'a str>) -> &'a str {
    revised_prompt
        .filter(|revised| !revised.is_empty())
        .unwrap_or(prompt_sent)
}

fn missing_heading(text: &str) -> Option<Heading> {
    Heading::ALL
        .iter()
        .copied()
        .find(|heading| !text.contains(heading.as_str()))
}

/// The text with one occurrence of each verbatim user line removed.
///
/// Matching is by whole trimmed line, so user text never masks contract
/// text that merely contains it, and a duplicated user line still counts.
fn without_user_lines(text: &str, spec: &ColoringPageSpec) -> String {
    let mut pending = vocabulary::user_text_lines(spec);
    text.split('\n')
        .filter(|line| match pending.iter().position(|user| user == line.trim()) {
            Some(found) => {
                pending.swap_remove(found);
                false
            }
            None => true,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `style:` heading lines and `font style:` lines are structural, not tokens.
fn is_exempt_from_token_scan(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    lowered == "style:" || lowered.starts_with("font style:")
}

fn forbidden_tokens(contract_text: &str) -> Vec<&'static str> {
    let lowered = contract_text
        .split('\n')
        .filter(|line| !is_exempt_from_token_scan(line))
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();
    FORBIDDEN_TOKENS
        .iter()
        .copied()
        .filter(|token| lowered.contains(token))
        .collect()
}

/// Verify `prompt_sent` (or its non-empty revision) against `spec`.
pub fn detect(
    spec: &ColoringPageSpec,
    prompt_sent: &str,
    revised_prompt: Option<&str>,
) -> Result<DriftReport, DetectError> {
    let text = checked_text(prompt_sent, revised_prompt);

    if let Some(heading) = missing_heading(text) {
        warn!(%heading, "prompt lost a required section");
        return Err(DetectError::MissingRequiredSection { heading });
    }

    let mut findings = Vec::new();

    let alignment = vocabulary::alignment_phrase(spec.alignment);
    if !text.contains(alignment) {
        findings.push(Finding::MissingAlignmentPhrase(alignment));
    }

    let page_size = vocabulary::page_size_line(spec.page_size);
    if !text.contains(page_size) {
        findings.push(Finding::MissingPageSize(page_size));
    }

    let alignment_sentence = vocabulary::alignment_sentence(spec);
    if !text.contains(&alignment_sentence) {
        findings.push(Finding::MissingAlignmentLine(alignment_sentence));
    }

    for phrase in REQUIRED_PHRASES {
        if !text.contains(phrase) {
            findings.push(Finding::MissingRequiredPhrase(phrase));
        }
    }

    for line in vocabulary::option_lines(spec) {
        if !text.contains(&line) {
            findings.push(Finding::MissingOptionLine(line));
        }
    }

    let index = SectionIndex::new(text);
    let negative_section = index.section_body(NEGATIVE_PROMPT_HEADING);
    for line in vocabulary::negative_lines(spec) {
        if !negative_section.contains(&line) {
            findings.push(Finding::MissingNegativeLine(line));
        }
    }

    let contract_text = without_user_lines(text, spec);
    for token in forbidden_tokens(&contract_text) {
        findings.push(Finding::ForbiddenToken(token));
    }

    for heading in SectionIndex::new(&contract_text).heading_lines() {
        if !Heading::is_allowed(heading) {
            findings.push(Finding::ForbiddenHeading(heading.to_string()));
        }
    }

    let report = DriftReport::from_findings(&findings);
    debug!(
        violations = report.violations.len(),
        confidence = report.confidence_score,
        revised = (text != prompt_sent),
        "drift check complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use inkpage_spec::{Alignment, ColorMode, ColoringPageItem, PageSize};

    fn dream_big() -> ColoringPageSpec {
        ColoringPageSpec::new(
            "Dream Big",
            vec![ColoringPageItem::new(1, "Shine"), ColoringPageItem::new(2, "Grow")],
        )
    }

    fn codes(report: &DriftReport) -> Vec<ViolationCode> {
        report.violations.iter().map(|v| v.code).collect()
    }

    #[test]
    fn compiled_prompt_is_clean() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let report = detect(&spec, &compiled.prompt, None).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.confidence_score, 1.0);
        assert!(report.recommended_fixes.is_empty());
    }

    #[test]
    fn missing_heading_aborts() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let broken = compiled.prompt.replace("OUTPUT:\n", "");

        let err = detect(&spec, &broken, None).unwrap_err();
        assert_eq!(
            err,
            DetectError::MissingRequiredSection {
                heading: Heading::Output
            }
        );
    }

    #[test]
    fn missing_decoration_line_is_one_paired_violation() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let drifted = compiled.prompt.replace("Decorations: none. ", "");

        let report = detect(&spec, &compiled.prompt, Some(drifted.as_str())).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::MissingOptionLine]);
        assert_eq!(report.violations[0].message, "Missing option line: Decorations: none.");
        assert_eq!(report.violations[0].severity, Severity::Error);
        assert_eq!(
            report.recommended_fixes,
            vec![RecommendedFix {
                code: FixCode::AddOptionLine,
                message: "Add option line: Decorations: none.".to_string(),
            }]
        );
        assert!((report.confidence_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn empty_revision_falls_back_to_prompt_sent() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let report = detect(&spec, &compiled.prompt, Some("")).unwrap();
        assert!(report.is_clean());
        assert_eq!(checked_text("sent", Some("")), "sent");
        assert_eq!(checked_text("sent", Some("revised")), "revised");
        assert_eq!(checked_text("sent", None), "sent");
    }

    #[test]
    fn negative_lines_are_checked_inside_their_section_only() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let moved = compiled
            .prompt
            .replace("\nno grayscale", "")
            .replace("Bold bubble letters;", "no grayscale\nBold bubble letters;");

        let report = detect(&spec, &moved, None).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::MissingNegativeLine]);
        assert_eq!(report.recommended_fixes[0].message, "Add negative line: no grayscale");
    }

    #[test]
    fn heading_shaped_title_does_not_hide_the_negative_section() {
        let spec = ColoringPageSpec::title_only("NEGATIVE PROMPT:");
        let compiled = compile(&spec, None).unwrap();
        assert!(detect(&spec, &compiled.prompt, None).unwrap().is_clean());

        let trimmed = compiled.prompt.replace("\nno gradients", "");
        let report = detect(&spec, &trimmed, None).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::MissingNegativeLine]);
        assert_eq!(report.recommended_fixes[0].message, "Add negative line: no gradients");
    }

    #[test]
    fn forbidden_tokens_respect_structural_exemptions() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let drifted = compiled
            .prompt
            .replace("OUTPUT:\n", "OUTPUT:\nFont style: chunky\nquality: hd\n");

        let report = detect(&spec, &drifted, None).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::ForbiddenToken]);
        assert_eq!(report.violations[0].message, "Forbidden token present: quality:");
        assert_eq!(report.recommended_fixes[0].code, FixCode::RemoveForbiddenToken);
    }

    #[test]
    fn extra_heading_is_a_warning() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let drifted = compiled.prompt.replace("OUTPUT:\n", "MOOD:\ncalm\nOUTPUT:\n");

        let report = detect(&spec, &drifted, None).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::ForbiddenHeading]);
        assert_eq!(report.violations[0].severity, Severity::Warning);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.recommended_fixes[0].message, "Remove heading: MOOD:");
    }

    #[test]
    fn user_text_never_trips_token_or_heading_scans() {
        let mut spec = ColoringPageSpec::new(
            "HAPPY DAYS:",
            vec![ColoringPageItem::new(1, "Size: big"), ColoringPageItem::new(2, "Quality: time")],
        );
        spec.footer_item = Some(ColoringPageItem::new(3, "Style: yours"));

        let compiled = compile(&spec, None).unwrap();
        let report = detect(&spec, &compiled.prompt, None).unwrap();
        assert!(report.is_clean(), "unexpected: {:?}", report.violations);
    }

    #[test]
    fn short_user_text_does_not_mask_injected_drift() {
        let mut spec = ColoringPageSpec::new("S", vec![ColoringPageItem::new(1, "O")]);
        spec.footer_item = Some(ColoringPageItem::new(2, "O"));
        let compiled = compile(&spec, None).unwrap();
        assert!(detect(&spec, &compiled.prompt, None).unwrap().is_clean());

        let drifted = compiled
            .prompt
            .replace("OUTPUT:\n", "MOOD:\nSize: 4k, quality: hd\nOUTPUT:\n");
        let report = detect(&spec, &drifted, None).unwrap();
        assert_eq!(
            codes(&report),
            vec![
                ViolationCode::ForbiddenToken,
                ViolationCode::ForbiddenToken,
                ViolationCode::ForbiddenHeading,
            ]
        );
        assert_eq!(report.recommended_fixes[2].message, "Remove heading: MOOD:");
    }

    #[test]
    fn title_does_not_mask_heading_words() {
        let spec = ColoringPageSpec::title_only("PROMPT");
        let compiled = compile(&spec, None).unwrap();
        assert!(detect(&spec, &compiled.prompt, None).unwrap().is_clean());

        let drifted = compiled.prompt.replace("OUTPUT:\n", "PROMPT NOTES:\nOUTPUT:\n");
        let report = detect(&spec, &drifted, None).unwrap();
        assert_eq!(codes(&report), vec![ViolationCode::ForbiddenHeading]);
        assert_eq!(report.recommended_fixes[0].message, "Remove heading: PROMPT NOTES:");
    }

    #[test]
    fn repeated_user_line_is_scanned_like_any_other() {
        let spec = ColoringPageSpec::title_only("QUALITY:");
        let compiled = compile(&spec, None).unwrap();
        assert!(detect(&spec, &compiled.prompt, None).unwrap().is_clean());

        let drifted = compiled.prompt.replace("OUTPUT:\n", "QUALITY:\nOUTPUT:\n");
        let report = detect(&spec, &drifted, None).unwrap();
        assert_eq!(
            codes(&report),
            vec![ViolationCode::ForbiddenToken, ViolationCode::ForbiddenHeading]
        );
    }

    #[test]
    fn wholesale_rewrite_collects_every_finding_in_order() {
        let mut spec = dream_big();
        spec.alignment = Alignment::Center;
        spec.page_size = PageSize::A4;
        spec.color_mode = ColorMode::Grayscale;
        let revised = "STYLE:\nTEXT (exact):\nTYPOGRAPHY:\nLAYOUT:\nDECORATIONS:\nOUTPUT:\nNEGATIVE PROMPT:\nno color";

        let report = detect(&spec, "unused", Some(revised)).unwrap();
        let found = codes(&report);
        assert_eq!(found[0], ViolationCode::MissingAlignmentPhrase);
        assert_eq!(found[1], ViolationCode::MissingPageSize);
        assert_eq!(found[2], ViolationCode::MissingAlignmentLine);
        assert_eq!(found[3..7], [ViolationCode::MissingRequiredPhrase; 4]);
        assert_eq!(report.violations.len(), report.recommended_fixes.len());
        assert_eq!(report.confidence_score, 0.0);
    }

    #[test]
    fn confidence_decays_linearly_and_floors_at_zero() {
        assert_eq!(confidence_score(0), 1.0);
        assert!((confidence_score(3) - 0.7).abs() < 1e-9);
        assert_eq!(confidence_score(10), 0.0);
        assert_eq!(confidence_score(14), 0.0);
    }

    #[test]
    fn report_serializes_camel_case_wire_shape() {
        let spec = dream_big();
        let compiled = compile(&spec, None).unwrap();
        let drifted = compiled.prompt.replace("Decorations: none. ", "");
        let report = detect(&spec, &drifted, None).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["violations"][0]["code"], "MISSING_OPTION_LINE");
        assert_eq!(json["violations"][0]["severity"], "error");
        assert_eq!(json["recommendedFixes"][0]["code"], "ADD_OPTION_LINE");
        assert_eq!(json["confidenceScore"], 0.9);
    }
}
