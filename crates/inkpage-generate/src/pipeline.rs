//! Generation pipeline: validate → compile → provider → detect.
//!
//! Each stage either hands its output to the next or stops the run with a
//! [`PipelineError`] carrying a stable code. A successful run always carries
//! the drift report for whatever prompt the provider actually rendered.

use inkpage_prompt::vocabulary::{REQUIRED_PHRASES, page_size_line};
use inkpage_prompt::{
    CompileError, ContractError, DetectError, RecommendedFix, Violation, compile, detect,
};
use inkpage_spec::{ColoringPageSpec, PageSize};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::provider::{GeneratedImage, ImageProvider, ImageRequest, ModelMetadata, ProviderError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub spec: ColoringPageSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_hint: Option<String>,
}

impl GenerateRequest {
    pub fn new(spec: ColoringPageSpec) -> Self {
        Self {
            spec,
            style_hint: None,
        }
    }

    pub fn with_style_hint(mut self, style_hint: impl Into<String>) -> Self {
        self.style_hint = Some(style_hint.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub prompt: String,
    pub template_version: String,
    pub prompt_digest: String,
    pub images: Vec<GeneratedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_metadata: Option<ModelMetadata>,
    pub violations: Vec<Violation>,
    pub recommended_fixes: Vec<RecommendedFix>,
    pub confidence_score: f64,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{message}")]
    SpecInvalid { message: String, issue_count: usize },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Prompt missing required phrases for deterministic generation.")]
    PromptMissingRequiredPhrases { missing: Vec<String> },

    #[error("image provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Image generation response did not match contract: {reason}")]
    ImageResponseInvalid { reason: String },

    #[error(transparent)]
    Drift(#[from] DetectError),
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::SpecInvalid { .. } => "SPEC_INVALID",
            PipelineError::Compile(err) => err.code(),
            PipelineError::PromptMissingRequiredPhrases { .. } => "PROMPT_MISSING_REQUIRED_PHRASES",
            PipelineError::Provider(_) => "PROVIDER_FAILED",
            PipelineError::ImageResponseInvalid { .. } => "IMAGE_RESPONSE_INVALID",
            PipelineError::Drift(err) => err.code(),
        }
    }

    pub fn to_contract(&self) -> ContractError {
        let contract = ContractError::new(self.code(), self.to_string());
        match self {
            PipelineError::SpecInvalid { issue_count, .. } => {
                contract.with_detail("issueCount", issue_count.to_string())
            }
            PipelineError::PromptMissingRequiredPhrases { missing } => {
                contract.with_detail("missing", missing.join(" | "))
            }
            _ => contract,
        }
    }
}

/// Phrases a prompt must carry before it is worth sending, compared
/// case-insensitively.
pub fn missing_required_phrases(prompt: &str, page_size: PageSize) -> Vec<String> {
    let lowered = prompt.to_lowercase();
    REQUIRED_PHRASES
        .iter()
        .copied()
        .chain(std::iter::once(page_size_line(page_size)))
        .filter(|phrase| !lowered.contains(&phrase.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn check_images(images: &[GeneratedImage]) -> Result<(), PipelineError> {
    if images.is_empty() {
        return Err(PipelineError::ImageResponseInvalid {
            reason: "no images returned".to_string(),
        });
    }
    if let Some(position) = images
        .iter()
        .position(|image| image.id.trim().is_empty() || image.data.is_empty())
    {
        return Err(PipelineError::ImageResponseInvalid {
            reason: format!("image {position} is missing an id or data"),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GenerationPipeline<P: ImageProvider> {
    provider: P,
}

impl<P: ImageProvider> GenerationPipeline<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn run(&self, request: &GenerateRequest) -> Result<GenerateResult, PipelineError> {
        let spec = &request.spec;

        let validation = spec.validate();
        if !validation.ok {
            let message = validation
                .first_issue()
                .map(|issue| issue.message.clone())
                .unwrap_or_else(|| "Spec validation failed.".to_string());
            warn!(issues = validation.issues.len(), "spec rejected");
            return Err(PipelineError::SpecInvalid {
                message,
                issue_count: validation.issues.len(),
            });
        }

        let compiled = compile(spec, request.style_hint.as_deref())?;

        let missing = missing_required_phrases(&compiled.prompt, spec.page_size);
        if !missing.is_empty() {
            warn!(missing = missing.len(), "prompt lost required phrases");
            return Err(PipelineError::PromptMissingRequiredPhrases { missing });
        }

        let image_request = ImageRequest {
            prompt: compiled.prompt.clone(),
            variations: spec.variations,
            output_format: spec.output_format,
            page_size: spec.page_size,
        };
        let response = self.provider.generate(&image_request).inspect_err(|err| {
            warn!(error = %err, "image provider failed");
        })?;
        check_images(&response.images)?;

        let report = detect(spec, &compiled.prompt, response.revised_prompt.as_deref())?;
        debug!(
            images = response.images.len(),
            violations = report.violations.len(),
            confidence = report.confidence_score,
            "generation finished"
        );

        Ok(GenerateResult {
            prompt_digest: compiled.digest(),
            prompt: compiled.prompt,
            template_version: compiled.template_version,
            images: response.images,
            revised_prompt: response.revised_prompt,
            model_metadata: response.model_metadata,
            violations: report.violations,
            recommended_fixes: report.recommended_fixes,
            confidence_score: report.confidence_score,
        })
    }
}
