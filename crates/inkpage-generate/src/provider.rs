//! The image provider seam.
//!
//! Everything network-facing lives behind [`ImageProvider`]. This crate
//! ships only [`ReplayProvider`], which serves a captured response from
//! disk so a past generation can be re-audited offline.

use inkpage_spec::{OutputFormat, PageSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// What the pipeline asks a provider to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub prompt: String,
    pub variations: u32,
    pub output_format: OutputFormat,
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    Utf8,
    Base64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub format: ImageFormat,
    pub mime_type: String,
    pub data: String,
    pub encoding: ImageEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub provider: String,
    pub model: String,
}

/// A provider's answer. `revised_prompt` is set when the provider
/// rewrote the prompt before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_metadata: Option<ModelMetadata>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read provider capture: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse provider capture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider request failed: {0}")]
    Failed(String),
}

pub trait ImageProvider {
    fn generate(&self, request: &ImageRequest) -> Result<ImageResponse, ProviderError>;
}

/// Serves one captured [`ImageResponse`] for every request.
#[derive(Debug, Clone)]
pub struct ReplayProvider {
    response: ImageResponse,
}

impl ReplayProvider {
    pub fn from_response(response: ImageResponse) -> Self {
        Self { response }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let bytes = fs::read(path)?;
        let response = serde_json::from_slice::<ImageResponse>(&bytes)?;
        Ok(Self::from_response(response))
    }
}

impl ImageProvider for ReplayProvider {
    fn generate(&self, _request: &ImageRequest) -> Result<ImageResponse, ProviderError> {
        Ok(self.response.clone())
    }
}
