//! Optional stricter checks layered on top of the base verdict.
//!
//! Each check only appends a reason. The caller applies [`escalate`] once all
//! enabled checks have run, which can turn ALLOW into WARN and nothing else.

mod alignment;
mod dedup;
mod semantic;
mod strict;

pub use alignment::ClaimCitationAlignment;
pub use dedup::CitationDedupPenalty;
pub use semantic::SemanticSupport;
pub use strict::StrictClaimExtraction;

use crate::config::{DedupConfig, ExtensionFlags};
use crate::metrics::Metrics;
use crate::model::{Chunk, ChunkLookup, Reason, Status};

/// Everything a check may read. Nothing here is mutated by a check.
pub struct CheckInput<'a> {
    pub answer_text: &'a str,
    pub chunks: &'a [Chunk],
    pub lookup: &'a ChunkLookup<'a>,
    pub metrics: &'a Metrics,
    pub dedup: &'a DedupConfig,
}

pub trait ExtensionCheck: Send + Sync {
    fn name(&self) -> &'static str;

    fn enabled(&self, flags: &ExtensionFlags) -> bool;

    fn run(&self, input: &CheckInput<'_>) -> Option<Reason>;
}

/// Checks in evaluation order: semantic, strict, alignment, dedup.
pub fn default_checks() -> Vec<Box<dyn ExtensionCheck>> {
    vec![
        Box::new(SemanticSupport),
        Box::new(StrictClaimExtraction),
        Box::new(ClaimCitationAlignment),
        Box::new(CitationDedupPenalty),
    ]
}

/// Runs every enabled check in order and collects their reasons.
pub fn run_checks(
    checks: &[Box<dyn ExtensionCheck>],
    flags: &ExtensionFlags,
    input: &CheckInput<'_>,
) -> Vec<Reason> {
    checks
        .iter()
        .filter(|c| c.enabled(flags))
        .filter_map(|c| {
            let reason = c.run(input);
            if let Some(r) = &reason {
                tracing::debug!(check = c.name(), code = %r.code, "extension check flagged answer");
            }
            reason
        })
        .collect()
}

/// ALLOW becomes WARN when any extension reason is present. WARN and BLOCK
/// are returned unchanged.
pub fn escalate(status: Status, reasons: &[Reason]) -> Status {
    if status == Status::Allow && reasons.iter().any(|r| r.code.is_extension()) {
        Status::Warn
    } else {
        status
    }
}

fn unsupported_details(unsupported: &[String]) -> serde_json::Value {
    serde_json::json!({ "unsupported": unsupported })
}
