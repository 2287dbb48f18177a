//! Error types for prompt compilation and drift detection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::heading::Heading;

/// Hard rejections from the prompt compiler.
///
/// Both are deterministic and fully preventable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The style hint could inject a section or override a generation parameter.
    #[error("Style hint contains a reserved prompt heading.")]
    StyleHintReservedHeading { matched: String },

    /// The assembled prompt exceeds the provider's hard limit.
    #[error("Prompt exceeds provider length limit ({limit}).")]
    PromptTooLong { length: usize, limit: usize },
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::StyleHintReservedHeading { .. } => "STYLE_HINT_CONTAINS_RESERVED_HEADING",
            CompileError::PromptTooLong { .. } => "PROMPT_TOO_LONG",
        }
    }
}

/// Hard failure from the drift detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// The generator discarded structure wholesale; no partial report is produced.
    #[error("Required section missing: {heading}")]
    MissingRequiredSection { heading: Heading },
}

impl DetectError {
    pub fn code(&self) -> &'static str {
        match self {
            DetectError::MissingRequiredSection { .. } => "MISSING_REQUIRED_SECTION",
        }
    }
}

/// Wire shape of a contract failure: a stable code and a human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ContractError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<&CompileError> for ContractError {
    fn from(err: &CompileError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<&DetectError> for ContractError {
    fn from(err: &DetectError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
