//! # Inkpage Generate
//!
//! Runs one spec through the whole contract: validation, compilation, an
//! external image provider, and drift detection over whatever prompt the
//! provider reports it actually used.
//!
//! Providers are adapters behind [`ImageProvider`]; this crate owns the
//! orchestration and the result shape, not any network code.

pub mod pipeline;
pub mod provider;

pub use pipeline::{
    GenerateRequest, GenerateResult, GenerationPipeline, PipelineError, missing_required_phrases,
};
pub use provider::{
    GeneratedImage, ImageEncoding, ImageFormat, ImageProvider, ImageRequest, ImageResponse,
    ModelMetadata, ProviderError, ReplayProvider,
};
