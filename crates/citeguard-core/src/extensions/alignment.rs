use super::{unsupported_details, CheckInput, ExtensionCheck};
use crate::config::ExtensionFlags;
use crate::model::{Reason, ReasonCode};
use crate::text::literals::{contains_whole_word, numeric_literals};
use crate::text::{extract_citations, split_into_claims, strip_citation_markers};

/// Numeric literals in a cited claim must appear in one of the chunks that
/// claim cites, not just somewhere in the retrieved set.
pub struct ClaimCitationAlignment;

impl ExtensionCheck for ClaimCitationAlignment {
    fn name(&self) -> &'static str {
        "claim_citation_alignment"
    }

    fn enabled(&self, flags: &ExtensionFlags) -> bool {
        flags.claim_citation_alignment
    }

    fn run(&self, input: &CheckInput<'_>) -> Option<Reason> {
        let mut unsupported: Vec<String> = Vec::new();
        let mut related: Vec<String> = Vec::new();

        // Unfiltered: short cited fragments still carry numbers.
        for claim in split_into_claims(input.answer_text) {
            let cited = extract_citations(&claim);
            if cited.is_empty() {
                continue;
            }
            let literals = numeric_literals(&strip_citation_markers(&claim));
            let cited_texts: Vec<&str> = cited
                .iter()
                .filter_map(|id| input.lookup.get(id))
                .map(|c| c.text.as_str())
                .collect();

            let mut mismatched = false;
            for literal in literals {
                if !cited_texts.iter().any(|t| contains_whole_word(t, &literal)) {
                    unsupported.push(literal);
                    mismatched = true;
                }
            }
            if mismatched {
                for id in cited {
                    if !related.contains(&id) {
                        related.push(id);
                    }
                }
            }
        }

        if unsupported.is_empty() {
            return None;
        }
        Some(
            Reason::new(ReasonCode::ClaimCitationMismatch)
                .with_related(related)
                .with_details(unsupported_details(&unsupported)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DedupConfig;
    use crate::metrics::Metrics;
    use crate::model::{Chunk, ChunkLookup};
    use serde_json::json;

    fn run(answer: &str, chunks: &[Chunk]) -> Option<Reason> {
        let lookup = ChunkLookup::build(chunks);
        let metrics = Metrics::compute(answer, &[], &[], chunks, &lookup);
        let dedup = DedupConfig::default();
        ClaimCitationAlignment.run(&CheckInput {
            answer_text: answer,
            chunks,
            lookup: &lookup,
            metrics: &metrics,
            dedup: &dedup,
        })
    }

    #[test]
    fn literal_must_be_in_the_claims_own_chunk() {
        let chunks = vec![
            Chunk::new("C1", "Uptime is 99%."),
            Chunk::new("C2", "Warranty details are not provided."),
        ];
        let reason = run("Uptime is 99% [C1]. Warranty lasts 2 years [C2].", &chunks).unwrap();
        assert_eq!(reason.code, ReasonCode::ClaimCitationMismatch);
        assert_eq!(reason.related_chunk_ids, vec!["C2"]);
        assert_eq!(reason.details.unwrap()["unsupported"], json!(["2 years"]));
    }

    #[test]
    fn literal_elsewhere_in_corpus_does_not_count() {
        let chunks = vec![
            Chunk::new("C1", "Uptime is reported monthly."),
            Chunk::new("C2", "Uptime is 99%."),
        ];
        let reason = run("Uptime is 99% [C1].", &chunks).unwrap();
        assert_eq!(reason.details.unwrap()["unsupported"], json!(["99%"]));
    }

    #[test]
    fn uncited_claims_are_skipped() {
        let chunks = vec![Chunk::new("C1", "Alpha.")];
        assert!(run("Uptime is 99%. Alpha is first [C1].", &chunks).is_none());
    }

    #[test]
    fn any_cited_chunk_may_carry_the_literal() {
        let chunks = vec![
            Chunk::new("C1", "Nothing numeric."),
            Chunk::new("C2", "Warranty lasts 2 years."),
        ];
        assert!(run("Warranty lasts 2 years [C1][C2].", &chunks).is_none());
    }

    #[test]
    fn unknown_cited_id_mismatches() {
        let chunks = vec![Chunk::new("C1", "Uptime is 95%.")];
        let reason = run("Uptime is 95% [C9].", &chunks).unwrap();
        assert_eq!(reason.related_chunk_ids, vec!["C9"]);
    }
}
