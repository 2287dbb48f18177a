//! Prompt compiler: spec + optional style hint → canonical prompt text.
//!
//! Compilation is a pure function of its inputs with exactly two
//! rejections (reserved style hint, over-long prompt). Every line comes
//! from the vocabulary, so the drift detector can rebuild the same
//! expectations from the spec alone.

use inkpage_spec::ColoringPageSpec;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::CompileError;
use crate::heading::{FORBIDDEN_TOKENS, Heading};
use crate::vocabulary::{self, BASE_PAGE_PHRASE, TEMPLATE_VERSION};

/// The external provider's hard limit, in characters.
pub const MAX_PROMPT_LENGTH: usize = 1024;

/// A compiled, immutable prompt tagged with its vocabulary revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPrompt {
    pub prompt: String,
    pub template_version: String,
}

impl CompiledPrompt {
    /// `sha256:` digest of the prompt text.
    pub fn digest(&self) -> String {
        prompt_digest(&self.prompt)
    }

    pub fn char_len(&self) -> usize {
        self.prompt.chars().count()
    }
}

pub fn prompt_digest(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

#[derive(Debug)]
struct Section {
    heading: Heading,
    lines: Vec<String>,
}

impl Section {
    fn new(heading: Heading) -> Self {
        Self {
            heading,
            lines: Vec::new(),
        }
    }

    fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }
}

/// Screen a user style hint before it is placed in the STYLE section.
///
/// Returns the offending heading or token, if any.
pub fn reserved_match(style_hint: &str) -> Option<&'static str> {
    if let Some(heading) = Heading::ALL
        .iter()
        .find(|heading| heading.appears_in_ignoring_case(style_hint))
    {
        return Some(heading.as_str());
    }
    let lowered = style_hint.to_lowercase();
    FORBIDDEN_TOKENS
        .iter()
        .copied()
        .find(|token| lowered.contains(token))
}

fn build_sections(spec: &ColoringPageSpec, style_hint: Option<&str>) -> Vec<Section> {
    vec![
        Section::new(Heading::Style)
            .line(vocabulary::STYLE_GUIDANCE_LINE)
            .line(vocabulary::style_line(spec.color_mode, style_hint)),
        Section::new(Heading::Text)
            .line(vocabulary::MAIN_QUOTE_MARKER)
            .line(spec.title.as_str())
            .line(vocabulary::SECONDARY_LINE_MARKER)
            .lines(spec.footer_label()),
        Section::new(Heading::Typography)
            .line(vocabulary::LETTERING_LINE)
            .line(vocabulary::GLITTER_LINE)
            .line(vocabulary::typography_line(spec)),
        Section::new(Heading::Layout)
            .line(vocabulary::headline_line(spec))
            .line(vocabulary::WHITESPACE_LINE)
            .line(vocabulary::list_line(spec))
            .line(vocabulary::alignment_sentence(spec))
            .lines(vocabulary::dedication_line(spec.dedication_text())),
        Section::new(Heading::Decorations).line(vocabulary::decorations_line(spec)),
        Section::new(Heading::Output).line(vocabulary::output_line(spec.color_mode)),
        Section::new(Heading::NegativePrompt).lines(vocabulary::negative_lines(spec)),
    ]
}

fn render(sections: &[Section]) -> String {
    let mut out = vec![format!("{BASE_PAGE_PHRASE} for print.")];
    for section in sections {
        out.push(section.heading.as_str().to_string());
        out.extend(section.lines.iter().cloned());
    }
    out.join("\n")
}

/// Compile `spec` into its canonical prompt.
///
/// `spec` is expected to have passed [`ColoringPageSpec::validate`]; the
/// compiler itself is total over any spec value.
pub fn compile(
    spec: &ColoringPageSpec,
    style_hint: Option<&str>,
) -> Result<CompiledPrompt, CompileError> {
    if let Some(hint) = style_hint
        && let Some(matched) = reserved_match(hint)
    {
        warn!(matched, "style hint rejected");
        return Err(CompileError::StyleHintReservedHeading {
            matched: matched.to_string(),
        });
    }

    let prompt = render(&build_sections(spec, style_hint));
    let length = prompt.chars().count();
    if length > MAX_PROMPT_LENGTH {
        warn!(length, limit = MAX_PROMPT_LENGTH, "compiled prompt too long");
        return Err(CompileError::PromptTooLong {
            length,
            limit: MAX_PROMPT_LENGTH,
        });
    }

    debug!(template_version = TEMPLATE_VERSION, length, "compiled prompt");
    Ok(CompiledPrompt {
        prompt,
        template_version: TEMPLATE_VERSION.to_string(),
    })
}
