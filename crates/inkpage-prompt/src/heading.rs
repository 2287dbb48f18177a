//! Section headings of the canonical prompt.

use regex::Regex;
use std::sync::OnceLock;

pub const NEGATIVE_PROMPT_HEADING: &str = "NEGATIVE PROMPT:";

/// Tokens the downstream generator could read as a parameter override.
pub const FORBIDDEN_TOKENS: [&str; 3] = ["size:", "quality:", "style:"];

/// The seven sections, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Style,
    Text,
    Typography,
    Layout,
    Decorations,
    Output,
    NegativePrompt,
}

impl Heading {
    pub const ALL: [Heading; 7] = [
        Heading::Style,
        Heading::Text,
        Heading::Typography,
        Heading::Layout,
        Heading::Decorations,
        Heading::Output,
        Heading::NegativePrompt,
    ];

    /// The literal heading line as it appears in the prompt.
    pub const fn as_str(self) -> &'static str {
        match self {
            Heading::Style => "STYLE:",
            Heading::Text => "TEXT (exact):",
            Heading::Typography => "TYPOGRAPHY:",
            Heading::Layout => "LAYOUT:",
            Heading::Decorations => "DECORATIONS:",
            Heading::Output => "OUTPUT:",
            Heading::NegativePrompt => NEGATIVE_PROMPT_HEADING,
        }
    }

    /// Whether `line` (already trimmed) is exactly one of the headings.
    pub fn is_allowed(line: &str) -> bool {
        Self::ALL.iter().any(|heading| heading.as_str() == line)
    }

    /// Case-insensitive containment, as used to screen user style hints.
    pub fn appears_in_ignoring_case(self, text: &str) -> bool {
        text.to_uppercase().contains(&self.as_str().to_uppercase())
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn heading_shape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z][A-Z ()-]*:$").expect("heading shape regex must compile")
    })
}

/// Whether a trimmed line looks like a section heading (`ALLCAPS:`).
pub fn is_heading_shaped(line: &str) -> bool {
    heading_shape_re().is_match(line)
}
