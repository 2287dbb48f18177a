//! # Inkpage Spec
//!
//! The structured description of a printable coloring page and the
//! default policy applied to fields the user did not specify.
//!
//! This crate is pure data plus invariant enforcement. It knows nothing
//! about prompts: the line vocabulary in `inkpage-prompt` is the only
//! place that turns an option value into text.

pub mod options;
pub mod spec;
pub mod validate;

pub use options::{
    Alignment, Border, ColorMode, Decorations, FontStyle, Illustrations, ListGutter, ListMode,
    NumberAlignment, OutputFormat, PageSize, Shading, TextSize, UnknownOption,
};
pub use spec::{
    ColoringPageItem, ColoringPageSpec, MAX_DEDICATION_LENGTH, MAX_LABEL_LENGTH, MAX_SPEC_ITEMS,
    TEXT_STROKE_RANGE,
};
pub use validate::{SpecIssue, SpecValidation, is_allowed_text};
