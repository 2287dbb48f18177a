//! # Inkpage Prompt
//!
//! The prompt contract engine. A spec is compiled into one canonical
//! prompt; after an external generator possibly rewrites it, the drift
//! detector checks that the rewrite still satisfies the contract.
//!
//! ## Architecture
//!
//! ```text
//! ColoringPageSpec      ← inkpage-spec
//!     │
//! vocabulary            ← one line per option value (single source of truth)
//!     │            ╲
//! compiler            drift
//!     │                 │
//! CompiledPrompt  →  DriftReport
//! ```
//!
//! The compiler and the detector never construct option text themselves;
//! both go through [`vocabulary`], so they cannot disagree about wording.

pub mod compiler;
pub mod drift;
pub mod error;
pub mod heading;
pub mod sections;
pub mod vocabulary;

pub use compiler::{CompiledPrompt, MAX_PROMPT_LENGTH, compile, prompt_digest};
pub use drift::{
    DriftReport, FixCode, RecommendedFix, Severity, Violation, ViolationCode, confidence_score,
    detect,
};
pub use error::{CompileError, ContractError, DetectError};
pub use heading::{FORBIDDEN_TOKENS, Heading};
pub use sections::SectionIndex;
pub use vocabulary::TEMPLATE_VERSION;
