//! The coloring page spec: the unit of intent.

use serde::{Deserialize, Serialize};

use crate::options::{
    Alignment, Border, ColorMode, Decorations, FontStyle, Illustrations, ListGutter, ListMode,
    NumberAlignment, OutputFormat, PageSize, Shading, TextSize,
};

pub const MAX_SPEC_ITEMS: usize = 20;
pub const MAX_LABEL_LENGTH: usize = 40;
pub const MAX_DEDICATION_LENGTH: usize = 60;
pub const ITEM_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=999;
pub const TEXT_STROKE_RANGE: std::ops::RangeInclusive<u32> = 4..=12;
pub const BORDER_THICKNESS_RANGE: std::ops::RangeInclusive<u32> = 2..=16;
pub const VARIATIONS_RANGE: std::ops::RangeInclusive<u32> = 1..=4;
pub const WHITESPACE_SCALE_RANGE: std::ops::RangeInclusive<u32> = 0..=100;

/// One numbered list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringPageItem {
    pub number: u32,
    pub label: String,
}

impl ColoringPageItem {
    pub fn new(number: u32, label: impl Into<String>) -> Self {
        Self {
            number,
            label: label.into(),
        }
    }
}

/// A structured description of a printable coloring page.
///
/// Absent fields take the default policy during deserialization, so a
/// sparse upstream payload and a fully spelled-out one produce the same
/// value. Numeric fields are carried unclamped; range checks live in
/// [`ColoringPageSpec::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoringPageSpec {
    // ── Text ──
    pub title: String,
    #[serde(default)]
    pub items: Vec<ColoringPageItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_item: Option<ColoringPageItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedication: Option<String>,

    // ── Layout ──
    #[serde(default = "default_list_mode")]
    pub list_mode: ListMode,
    #[serde(default = "default_alignment")]
    pub alignment: Alignment,
    #[serde(default = "default_number_alignment")]
    pub number_alignment: NumberAlignment,
    #[serde(default = "default_list_gutter")]
    pub list_gutter: ListGutter,
    #[serde(default = "default_whitespace_scale")]
    pub whitespace_scale: u32,

    // ── Typography ──
    #[serde(default = "default_text_size")]
    pub text_size: TextSize,
    #[serde(default = "default_font_style")]
    pub font_style: FontStyle,
    #[serde(default = "default_text_stroke_width")]
    pub text_stroke_width: u32,

    // ── Decoration ──
    #[serde(default = "default_color_mode")]
    pub color_mode: ColorMode,
    #[serde(default = "default_decorations")]
    pub decorations: Decorations,
    #[serde(default = "default_illustrations")]
    pub illustrations: Illustrations,
    #[serde(default = "default_shading")]
    pub shading: Shading,
    #[serde(default = "default_border")]
    pub border: Border,
    #[serde(default = "default_border_thickness")]
    pub border_thickness: u32,

    // ── Output ──
    #[serde(default = "default_variations")]
    pub variations: u32,
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
    #[serde(default = "default_page_size")]
    pub page_size: PageSize,
}

fn default_list_mode() -> ListMode {
    ListMode::List
}

fn default_alignment() -> Alignment {
    Alignment::Left
}

fn default_number_alignment() -> NumberAlignment {
    NumberAlignment::Strict
}

fn default_list_gutter() -> ListGutter {
    ListGutter::Normal
}

fn default_whitespace_scale() -> u32 {
    50
}

fn default_text_size() -> TextSize {
    TextSize::Small
}

fn default_font_style() -> FontStyle {
    FontStyle::Rounded
}

fn default_text_stroke_width() -> u32 {
    6
}

fn default_color_mode() -> ColorMode {
    ColorMode::BlackAndWhiteOnly
}

fn default_decorations() -> Decorations {
    Decorations::None
}

fn default_illustrations() -> Illustrations {
    Illustrations::None
}

fn default_shading() -> Shading {
    Shading::None
}

fn default_border() -> Border {
    Border::Plain
}

fn default_border_thickness() -> u32 {
    8
}

fn default_variations() -> u32 {
    1
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Pdf
}

fn default_page_size() -> PageSize {
    PageSize::UsLetter
}

impl ColoringPageSpec {
    /// A list-mode spec with every option at its default.
    pub fn new(title: impl Into<String>, items: Vec<ColoringPageItem>) -> Self {
        Self {
            title: title.into(),
            items,
            footer_item: None,
            dedication: None,
            list_mode: default_list_mode(),
            alignment: default_alignment(),
            number_alignment: default_number_alignment(),
            list_gutter: default_list_gutter(),
            whitespace_scale: default_whitespace_scale(),
            text_size: default_text_size(),
            font_style: default_font_style(),
            text_stroke_width: default_text_stroke_width(),
            color_mode: default_color_mode(),
            decorations: default_decorations(),
            illustrations: default_illustrations(),
            shading: default_shading(),
            border: default_border(),
            border_thickness: default_border_thickness(),
            variations: default_variations(),
            output_format: default_output_format(),
            page_size: default_page_size(),
        }
    }

    /// A title-only spec with every option at its default.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            list_mode: ListMode::TitleOnly,
            ..Self::new(title, Vec::new())
        }
    }

    /// Dedication text, treating an empty string as absent.
    pub fn dedication_text(&self) -> Option<&str> {
        self.dedication.as_deref().filter(|text| !text.is_empty())
    }

    /// Label of the secondary line, if any.
    pub fn footer_label(&self) -> Option<&str> {
        self.footer_item.as_ref().map(|item| item.label.as_str())
    }

    pub fn has_list(&self) -> bool {
        self.list_mode == ListMode::List
    }
}
