//! Deterministic grounding verifier for retrieval-augmented answers.
//!
//! Given an answer, the chunks it was allowed to cite, and the `[C<n>]`
//! markers inside it, [`Guardrails::evaluate`] decides whether the answer is
//! adequately evidenced and returns ALLOW, WARN or BLOCK with reasons.
//!
//! ```text
//! answer ──► citations ─┐
//!        └─► claims ──► filter ──► evidence mapping ──► metrics ──► base rules ──► extensions ──► result
//! chunks ──► lookup ────┘                                                       (ALLOW→WARN only)
//! ```
//!
//! Scoring is purely lexical: token overlap plus literal matching of
//! percentages, year durations and absolute qualifiers.

pub mod config;
pub mod decision;
pub mod engine;
pub mod errors;
pub mod extensions;
pub mod mapping;
pub mod metrics;
pub mod model;
pub mod text;

pub use config::{ExtensionFlags, FlagOverrides, GuardrailsConfig, Thresholds};
pub use engine::{build_result, evaluate, GroundingRequest, Guardrails};
pub use errors::{GuardError, Result};
pub use model::{Chunk, Claim, GroundingResult, Reason, ReasonCode, Status};
