//! Invariant validation for coloring page specs.
//!
//! Validation never stops at the first problem: every issue is reported,
//! in field order, so a caller can surface all of them at once.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use crate::options::{Decorations, Illustrations, ListMode, Shading};
use crate::spec::{
    BORDER_THICKNESS_RANGE, ColoringPageItem, ColoringPageSpec, ITEM_NUMBER_RANGE,
    MAX_DEDICATION_LENGTH, MAX_LABEL_LENGTH, MAX_SPEC_ITEMS, TEXT_STROKE_RANGE, VARIATIONS_RANGE,
    WHITESPACE_SCALE_RANGE,
};

pub const SPEC_INVALID: &str = "SPEC_INVALID";
pub const ITEMS_TOO_MANY: &str = "ITEMS_TOO_MANY";
pub const ITEM_NUMBER_OUT_OF_RANGE: &str = "ITEM_NUMBER_OUT_OF_RANGE";
pub const LABEL_LENGTH_OUT_OF_RANGE: &str = "LABEL_LENGTH_OUT_OF_RANGE";
pub const LABEL_INVALID_CHARS: &str = "LABEL_INVALID_CHARS";

/// One failed spec constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecIssue {
    pub code: String,
    pub field: String,
    pub message: String,
}

impl SpecIssue {
    fn new(code: &str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecValidation {
    pub ok: bool,
    pub issues: Vec<SpecIssue>,
}

impl SpecValidation {
    pub fn first_issue(&self) -> Option<&SpecIssue> {
        self.issues.first()
    }
}

fn allowed_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^[A-Za-z0-9 .,!?'":;\-()]+$"#).expect("allowed text regex must compile")
    })
}

/// Whether `text` uses only the restricted label/dedication charset.
pub fn is_allowed_text(text: &str) -> bool {
    allowed_text_re().is_match(text)
}

fn check_range(
    issues: &mut Vec<SpecIssue>,
    field: &str,
    value: u32,
    range: RangeInclusive<u32>,
) {
    if !range.contains(&value) {
        issues.push(SpecIssue::new(
            SPEC_INVALID,
            field,
            format!(
                "{field} must be between {} and {}.",
                range.start(),
                range.end()
            ),
        ));
    }
}

fn check_item(issues: &mut Vec<SpecIssue>, field: &str, item: &ColoringPageItem) {
    if !ITEM_NUMBER_RANGE.contains(&item.number) {
        issues.push(SpecIssue::new(
            ITEM_NUMBER_OUT_OF_RANGE,
            format!("{field}.number"),
            "Item number must be between 1 and 999.",
        ));
    }

    let label_len = item.label.chars().count();
    if label_len == 0 || label_len > MAX_LABEL_LENGTH {
        issues.push(SpecIssue::new(
            LABEL_LENGTH_OUT_OF_RANGE,
            format!("{field}.label"),
            format!("Label must be between 1 and {MAX_LABEL_LENGTH} characters."),
        ));
    } else if !is_allowed_text(&item.label) {
        issues.push(SpecIssue::new(
            LABEL_INVALID_CHARS,
            format!("{field}.label"),
            "Label contains invalid characters.",
        ));
    }
}

impl ColoringPageSpec {
    /// Check every shape, range, and cross-field invariant.
    pub fn validate(&self) -> SpecValidation {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(SpecIssue::new(SPEC_INVALID, "title", "Title must not be empty."));
        }

        if self.items.len() > MAX_SPEC_ITEMS {
            issues.push(SpecIssue::new(
                ITEMS_TOO_MANY,
                "items",
                format!("List cannot exceed {MAX_SPEC_ITEMS} items."),
            ));
        }
        for (index, item) in self.items.iter().enumerate() {
            check_item(&mut issues, &format!("items[{index}]"), item);
        }
        if let Some(footer) = &self.footer_item {
            check_item(&mut issues, "footerItem", footer);
        }

        if let Some(dedication) = &self.dedication {
            let len = dedication.chars().count();
            if len == 0 || len > MAX_DEDICATION_LENGTH {
                issues.push(SpecIssue::new(
                    SPEC_INVALID,
                    "dedication",
                    format!("Dedication must be between 1 and {MAX_DEDICATION_LENGTH} characters."),
                ));
            } else if !is_allowed_text(dedication) {
                issues.push(SpecIssue::new(
                    SPEC_INVALID,
                    "dedication",
                    "Dedication contains invalid characters.",
                ));
            }
        }

        check_range(&mut issues, "whitespaceScale", self.whitespace_scale, WHITESPACE_SCALE_RANGE);
        check_range(&mut issues, "textStrokeWidth", self.text_stroke_width, TEXT_STROKE_RANGE);
        check_range(&mut issues, "borderThickness", self.border_thickness, BORDER_THICKNESS_RANGE);
        check_range(&mut issues, "variations", self.variations, VARIATIONS_RANGE);

        match self.list_mode {
            ListMode::List if self.items.is_empty() => {
                issues.push(SpecIssue::new(
                    SPEC_INVALID,
                    "items",
                    "List mode requires at least one item.",
                ));
            }
            ListMode::TitleOnly => {
                if !self.items.is_empty() {
                    issues.push(SpecIssue::new(
                        SPEC_INVALID,
                        "items",
                        "Title-only mode does not allow list items.",
                    ));
                }
                if self.footer_item.is_some() {
                    issues.push(SpecIssue::new(
                        SPEC_INVALID,
                        "footerItem",
                        "Title-only mode does not allow a footer item.",
                    ));
                }
            }
            ListMode::List => {}
        }

        if self.shading != Shading::None
            && self.decorations == Decorations::None
            && self.illustrations == Illustrations::None
        {
            issues.push(SpecIssue::new(
                SPEC_INVALID,
                "shading",
                "Shading requires decorations or illustrations.",
            ));
        }

        SpecValidation {
            ok: issues.is_empty(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dream_big() -> ColoringPageSpec {
        ColoringPageSpec::new(
            "Dream Big",
            vec![ColoringPageItem::new(1, "Shine"), ColoringPageItem::new(2, "Grow")],
        )
    }

    fn codes(validation: &SpecValidation) -> Vec<(&str, &str)> {
        validation
            .issues
            .iter()
            .map(|issue| (issue.code.as_str(), issue.field.as_str()))
            .collect()
    }

    #[test]
    fn default_list_spec_is_valid() {
        let validation = dream_big().validate();
        assert!(validation.ok, "unexpected issues: {:?}", validation.issues);
        assert!(validation.first_issue().is_none());
    }

    #[test]
    fn list_mode_requires_items() {
        let spec = ColoringPageSpec::new("Empty", Vec::new());
        let validation = spec.validate();
        assert!(!validation.ok);
        assert_eq!(codes(&validation), vec![(SPEC_INVALID, "items")]);
    }

    #[test]
    fn title_only_forbids_items_and_footer() {
        let mut spec = ColoringPageSpec::title_only("Hello");
        spec.items.push(ColoringPageItem::new(1, "One"));
        spec.footer_item = Some(ColoringPageItem::new(2, "Two"));

        assert_eq!(
            codes(&spec.validate()),
            vec![(SPEC_INVALID, "items"), (SPEC_INVALID, "footerItem")]
        );
    }

    #[test]
    fn shading_needs_decorations_or_illustrations() {
        let mut spec = dream_big();
        spec.shading = Shading::Hatch;
        assert_eq!(codes(&spec.validate()), vec![(SPEC_INVALID, "shading")]);

        spec.illustrations = Illustrations::Simple;
        assert!(spec.validate().ok);
    }

    #[test]
    fn item_issues_carry_indexed_fields() {
        let mut spec = dream_big();
        spec.items.push(ColoringPageItem::new(0, "Bad<label>"));
        spec.items.push(ColoringPageItem::new(5, "x".repeat(41)));

        assert_eq!(
            codes(&spec.validate()),
            vec![
                (ITEM_NUMBER_OUT_OF_RANGE, "items[2].number"),
                (LABEL_INVALID_CHARS, "items[2].label"),
                (LABEL_LENGTH_OUT_OF_RANGE, "items[3].label"),
            ]
        );
    }

    #[test]
    fn too_many_items() {
        let items = (1..=21)
            .map(|n| ColoringPageItem::new(n, format!("Item {n}")))
            .collect();
        let spec = ColoringPageSpec::new("Lots", items);
        assert_eq!(codes(&spec.validate()), vec![(ITEMS_TOO_MANY, "items")]);
    }

    #[test]
    fn numeric_ranges_are_checked() {
        let mut spec = dream_big();
        spec.text_stroke_width = 3;
        spec.border_thickness = 17;
        spec.variations = 0;
        spec.whitespace_scale = 101;

        assert_eq!(
            codes(&spec.validate()),
            vec![
                (SPEC_INVALID, "whitespaceScale"),
                (SPEC_INVALID, "textStrokeWidth"),
                (SPEC_INVALID, "borderThickness"),
                (SPEC_INVALID, "variations"),
            ]
        );
    }

    #[test]
    fn dedication_charset_and_length() {
        let mut spec = dream_big();
        spec.dedication = Some("Grandma & Grandpa".to_string());
        assert_eq!(codes(&spec.validate()), vec![(SPEC_INVALID, "dedication")]);

        spec.dedication = Some("a".repeat(61));
        assert_eq!(codes(&spec.validate()), vec![(SPEC_INVALID, "dedication")]);

        spec.dedication = Some("Grandma, with love!".to_string());
        assert!(spec.validate().ok);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut spec = dream_big();
        spec.title = "   ".to_string();
        assert_eq!(codes(&spec.validate()), vec![(SPEC_INVALID, "title")]);
    }
}
