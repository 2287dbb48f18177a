//! The line vocabulary: every spec option rendered as exactly one line.
//!
//! Both the compiler and the drift detector build their text from this
//! module and nowhere else. Each function is total over its axis and
//! draws from a small enumerable set of literals; the only interpolated
//! values are user labels, dedication text, and numeric widths. That is
//! what lets the detector verify by exact substring instead of fuzzy
//! matching.

use inkpage_spec::{
    Alignment, Border, ColorMode, ColoringPageItem, ColoringPageSpec, Decorations, FontStyle,
    Illustrations, ListMode, NumberAlignment, PageSize, Shading,
};

use crate::heading::NEGATIVE_PROMPT_HEADING;

/// Identifies this revision of the vocabulary and heading order.
pub const TEMPLATE_VERSION: &str = "v2";

// ── Fixed phrases ──

pub const BASE_PAGE_PHRASE: &str = "Black-and-white coloring book page";
pub const OUTLINE_ONLY_PHRASE: &str = "outline-only";
pub const EASY_TO_COLOR_PHRASE: &str = "easy to color";
pub const VECTOR_LINEWORK_PHRASE: &str = "Crisp vector-like linework";

/// Phrases that must survive any rewrite verbatim.
pub const REQUIRED_PHRASES: [&str; 5] = [
    BASE_PAGE_PHRASE,
    OUTLINE_ONLY_PHRASE,
    EASY_TO_COLOR_PHRASE,
    VECTOR_LINEWORK_PHRASE,
    NEGATIVE_PROMPT_HEADING,
];

pub const DEFAULT_VIBE: &str = "clean worksheet clarity,";
pub const STYLE_GUIDANCE_LINE: &str = "[Describe the vibe. Include outline-only and easy to color.]";
pub const MAIN_QUOTE_MARKER: &str = "[Main quote EXACT — do not alter text.]";
pub const SECONDARY_LINE_MARKER: &str = "[Secondary line EXACT — omit if none.]";
pub const LETTERING_LINE: &str = "Bold bubble letters; thick outlines.";
pub const GLITTER_LINE: &str = "Glitter outline only (no shading).";
pub const WHITESPACE_LINE: &str = "Keep generous whitespace; treat blank space intentional.";
pub const HEADLINE_PLACEMENT: &str = "Line 1 headline; line 2 below.";
pub const SPACING_CLAUSE: &str = "treat blank space as intentional; do not fill empty space.";
pub const NO_LIST_LINE: &str = "No list.";

/// Prohibitions appended to every negative section.
pub const CLOSING_NEGATIVE_LINES: [&str; 3] = ["no gradients", "no filled shapes", "no extra words"];

// ── One line per axis ──

pub fn color_mode_line(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::BlackAndWhiteOnly => "Color: black and white only.",
        ColorMode::Grayscale => "Color: grayscale.",
        ColorMode::Color => "Color: color.",
    }
}

pub fn page_size_line(size: PageSize) -> &'static str {
    match size {
        PageSize::UsLetter => "US Letter 8.5x11 portrait.",
        PageSize::A4 => "A4 8.27x11.69 portrait.",
    }
}

pub fn alignment_phrase(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "Left-align the quote.",
        Alignment::Center => "Center the quote.",
    }
}

pub fn font_style_line(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Rounded => "Font: rounded.",
        FontStyle::Block => "Font: block.",
        FontStyle::Hand => "Font: hand.",
    }
}

pub fn text_stroke_line(width: u32) -> String {
    format!("Stroke: {width}px.")
}

pub fn decoration_line(decorations: Decorations) -> &'static str {
    match decorations {
        Decorations::None => "Decorations: none.",
        Decorations::Minimal => "Decorations: minimal outline icons.",
        Decorations::Dense => "Decorations: dense outline icons.",
    }
}

pub fn illustration_line(illustrations: Illustrations) -> &'static str {
    match illustrations {
        Illustrations::None => "Illustrations: none.",
        Illustrations::Simple => "Illustrations: simple outlines.",
        Illustrations::Scene => "Illustrations: scene outlines.",
    }
}

pub fn shading_line(shading: Shading) -> &'static str {
    match shading {
        Shading::None => "Shading: none.",
        Shading::Hatch => "Shading: hatch.",
        Shading::Stippling => "Shading: stippling.",
    }
}

pub fn border_line(border: Border, thickness: u32) -> String {
    match border {
        Border::None => "Border: none.".to_string(),
        Border::Plain => format!("Border: plain {thickness}px."),
        Border::Decorative => format!("Border: decorative {thickness}px."),
    }
}

/// Starts with [`VECTOR_LINEWORK_PHRASE`].
pub fn output_line(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::BlackAndWhiteOnly => {
            "Crisp vector-like linework. Black outlines on white. Printable."
        }
        ColorMode::Grayscale => "Crisp vector-like linework. Grayscale outlines on white. Printable.",
        ColorMode::Color => "Crisp vector-like linework. Colored outlines on white. Printable.",
    }
}

/// `None` when there is no dedication to render.
pub fn dedication_line(dedication: Option<&str>) -> Option<String> {
    dedication
        .filter(|text| !text.is_empty())
        .map(|text| format!("Add dedication: \"Dedicated to {text}\"."))
}

pub fn format_list_items(items: &[ColoringPageItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}. {}", item.number, item.label))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn list_line(spec: &ColoringPageSpec) -> String {
    match spec.list_mode {
        ListMode::List => format!(
            "List items: {} (Gutter: {}).",
            format_list_items(&spec.items),
            spec.list_gutter
        ),
        ListMode::TitleOnly => NO_LIST_LINE.to_string(),
    }
}

/// Numbering strictness and text alignment, closed by the spacing clause.
pub fn alignment_sentence(spec: &ColoringPageSpec) -> String {
    let text_clause = match spec.alignment {
        Alignment::Center => "text centered; ",
        Alignment::Left => "all text left-aligned; ",
    };
    match spec.list_mode {
        ListMode::TitleOnly => format!("{text_clause}{SPACING_CLAUSE}"),
        ListMode::List => {
            let number_clause = match spec.number_alignment {
                NumberAlignment::Strict => "all numbers vertically aligned; ",
                NumberAlignment::Loose => "numbers readable; ",
            };
            format!("{number_clause}{text_clause}{SPACING_CLAUSE}")
        }
    }
}

/// Prohibition lines for the NEGATIVE PROMPT section, in order.
pub fn negative_lines(spec: &ColoringPageSpec) -> Vec<&'static str> {
    let mut lines = Vec::with_capacity(6);
    if spec.color_mode != ColorMode::Color {
        lines.push("no color");
    }
    if spec.color_mode == ColorMode::BlackAndWhiteOnly {
        lines.push("no grayscale");
    }
    if spec.shading == Shading::None {
        lines.push("no shading");
    }
    lines.extend(CLOSING_NEGATIVE_LINES);
    lines
}

// ── Composite lines ──

/// The STYLE section's vibe line.
///
/// A hint has its whitespace collapsed so it can never open a new line.
pub fn style_line(mode: ColorMode, style_hint: Option<&str>) -> String {
    let color = color_mode_line(mode);
    match style_hint.map(collapse_whitespace).filter(|hint| !hint.is_empty()) {
        Some(hint) => {
            format!("Vibe: {hint} {OUTLINE_ONLY_PHRASE}, {EASY_TO_COLOR_PHRASE}. {color}")
        }
        None => format!(
            "Vibe: {DEFAULT_VIBE} {OUTLINE_ONLY_PHRASE}, {EASY_TO_COLOR_PHRASE}. {color}"
        ),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn typography_line(spec: &ColoringPageSpec) -> String {
    format!(
        "{} {}",
        font_style_line(spec.font_style),
        text_stroke_line(spec.text_stroke_width)
    )
}

pub fn headline_line(spec: &ColoringPageSpec) -> String {
    format!(
        "{} {} {HEADLINE_PLACEMENT}",
        page_size_line(spec.page_size),
        alignment_phrase(spec.alignment)
    )
}

pub fn decorations_line(spec: &ColoringPageSpec) -> String {
    format!(
        "{} {} {} {}",
        decoration_line(spec.decorations),
        illustration_line(spec.illustrations),
        shading_line(spec.shading),
        border_line(spec.border, spec.border_thickness)
    )
}

/// Every option line a faithful prompt for `spec` must contain.
pub fn option_lines(spec: &ColoringPageSpec) -> Vec<String> {
    let mut lines = vec![
        color_mode_line(spec.color_mode).to_string(),
        list_line(spec),
        font_style_line(spec.font_style).to_string(),
        text_stroke_line(spec.text_stroke_width),
        decoration_line(spec.decorations).to_string(),
        illustration_line(spec.illustrations).to_string(),
        shading_line(spec.shading).to_string(),
        border_line(spec.border, spec.border_thickness),
        output_line(spec.color_mode).to_string(),
    ];
    lines.extend(dedication_line(spec.dedication_text()));
    lines
}

/// Lines the compiler copies verbatim from user input.
///
/// The detector skips one occurrence of each when scanning for tokens and
/// headings. A title with embedded newlines yields one entry per line.
pub fn user_text_lines(spec: &ColoringPageSpec) -> Vec<String> {
    let mut fragments = vec![spec.title.clone()];
    if let Some(label) = spec.footer_label() {
        fragments.push(label.to_string());
    }
    if spec.has_list() {
        fragments.push(list_line(spec));
    }
    fragments.extend(dedication_line(spec.dedication_text()));

    fragments
        .iter()
        .flat_map(|fragment| fragment.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_spec::ListGutter;

    fn dream_big() -> ColoringPageSpec {
        ColoringPageSpec::new(
            "Dream Big",
            vec![ColoringPageItem::new(1, "Shine"), ColoringPageItem::new(2, "Grow")],
        )
    }

    #[test]
    fn list_line_renders_items_and_gutter() {
        let mut spec = dream_big();
        assert_eq!(list_line(&spec), "List items: 1. Shine; 2. Grow (Gutter: normal).");

        spec.list_gutter = ListGutter::Tight;
        assert_eq!(list_line(&spec), "List items: 1. Shine; 2. Grow (Gutter: tight).");

        assert_eq!(list_line(&ColoringPageSpec::title_only("Hi")), "No list.");
    }

    #[test]
    fn alignment_sentence_variants() {
        let mut spec = dream_big();
        assert_eq!(
            alignment_sentence(&spec),
            "all numbers vertically aligned; all text left-aligned; treat blank space as intentional; do not fill empty space."
        );

        spec.number_alignment = NumberAlignment::Loose;
        spec.alignment = Alignment::Center;
        assert_eq!(
            alignment_sentence(&spec),
            "numbers readable; text centered; treat blank space as intentional; do not fill empty space."
        );

        let mut title_only = ColoringPageSpec::title_only("Hi");
        title_only.alignment = Alignment::Center;
        assert_eq!(
            alignment_sentence(&title_only),
            "text centered; treat blank space as intentional; do not fill empty space."
        );
    }

    #[test]
    fn negative_lines_follow_color_and_shading() {
        let mut spec = dream_big();
        assert_eq!(
            negative_lines(&spec),
            vec![
                "no color",
                "no grayscale",
                "no shading",
                "no gradients",
                "no filled shapes",
                "no extra words",
            ]
        );

        spec.color_mode = ColorMode::Grayscale;
        assert_eq!(negative_lines(&spec)[..2], ["no color", "no shading"]);

        spec.color_mode = ColorMode::Color;
        spec.shading = Shading::Hatch;
        assert_eq!(negative_lines(&spec), CLOSING_NEGATIVE_LINES.to_vec());
    }

    #[test]
    fn output_lines_carry_linework_phrase() {
        for mode in ColorMode::ALL {
            assert!(output_line(*mode).starts_with(VECTOR_LINEWORK_PHRASE));
        }
    }

    #[test]
    fn border_and_stroke_interpolate_widths() {
        assert_eq!(border_line(Border::Plain, 8), "Border: plain 8px.");
        assert_eq!(border_line(Border::Decorative, 16), "Border: decorative 16px.");
        assert_eq!(border_line(Border::None, 16), "Border: none.");
        assert_eq!(text_stroke_line(6), "Stroke: 6px.");
    }

    #[test]
    fn dedication_line_is_optional() {
        assert_eq!(dedication_line(None), None);
        assert_eq!(dedication_line(Some("")), None);
        assert_eq!(
            dedication_line(Some("Mia")).as_deref(),
            Some("Add dedication: \"Dedicated to Mia\".")
        );
    }

    #[test]
    fn style_line_collapses_hint_whitespace() {
        assert_eq!(
            style_line(ColorMode::Color, Some("  soft\n pastel  ")),
            "Vibe: soft pastel outline-only, easy to color. Color: color."
        );
        assert_eq!(
            style_line(ColorMode::BlackAndWhiteOnly, Some(" \n ")),
            "Vibe: clean worksheet clarity, outline-only, easy to color. Color: black and white only."
        );
    }

    #[test]
    fn option_lines_include_dedication_only_when_present() {
        let mut spec = dream_big();
        assert_eq!(option_lines(&spec).len(), 9);
        spec.dedication = Some("Mia".to_string());
        let lines = option_lines(&spec);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9], "Add dedication: \"Dedicated to Mia\".");
    }

    #[test]
    fn user_text_lines_cover_all_verbatim_text() {
        let mut spec = dream_big();
        spec.footer_item = Some(ColoringPageItem::new(3, "Rest"));
        spec.dedication = Some("Mia".to_string());
        assert_eq!(
            user_text_lines(&spec),
            vec![
                "Dream Big".to_string(),
                "Rest".to_string(),
                "List items: 1. Shine; 2. Grow (Gutter: normal).".to_string(),
                "Add dedication: \"Dedicated to Mia\".".to_string(),
            ]
        );
    }

    #[test]
    fn multi_line_title_yields_one_entry_per_line() {
        let spec = ColoringPageSpec::title_only("Rise\n  and Shine ");
        assert_eq!(user_text_lines(&spec), vec!["Rise".to_string(), "and Shine".to_string()]);
    }
}
