use super::{CheckInput, ExtensionCheck};
use crate::config::ExtensionFlags;
use crate::model::{Reason, ReasonCode};

/// Penalises answers whose markers pile onto a single chunk.
pub struct CitationDedupPenalty;

impl ExtensionCheck for CitationDedupPenalty {
    fn name(&self) -> &'static str {
        "citation_dedup_penalty"
    }

    fn enabled(&self, flags: &ExtensionFlags) -> bool {
        flags.citation_dedup_penalty
    }

    fn run(&self, input: &CheckInput<'_>) -> Option<Reason> {
        let metrics = input.metrics;
        let threshold = input.dedup.max_single_chunk_share;
        if metrics.citations_count_total < input.dedup.min_total_citations {
            return None;
        }
        let (id, max_share) = metrics.dominant_chunk()?;
        if max_share <= threshold {
            return None;
        }
        Some(
            Reason::new(ReasonCode::CitationDedupDominance)
                .with_related(vec![id.to_string()])
                .with_details(serde_json::json!({
                    "max_share": (max_share * 100.0).round() / 100.0,
                    "threshold": threshold,
                    "citations_count": metrics.citations_count_total,
                })),
        )
    }
}
