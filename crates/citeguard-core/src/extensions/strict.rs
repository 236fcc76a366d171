use super::{unsupported_details, CheckInput, ExtensionCheck};
use crate::config::ExtensionFlags;
use crate::model::{Reason, ReasonCode};
use crate::text::literals::{absolute_qualifiers, contains_whole_word, numeric_literals};
use crate::text::strip_citation_markers;

/// Percentages, year durations and absolute qualifiers must each appear as
/// a whole word in at least one chunk.
pub struct StrictClaimExtraction;

impl ExtensionCheck for StrictClaimExtraction {
    fn name(&self) -> &'static str {
        "strict_claim_extraction"
    }

    fn enabled(&self, flags: &ExtensionFlags) -> bool {
        flags.strict_claim_extraction
    }

    fn run(&self, input: &CheckInput<'_>) -> Option<Reason> {
        let text = strip_citation_markers(input.answer_text);
        let mut explicit = numeric_literals(&text);
        explicit.extend(absolute_qualifiers(&text));

        let unsupported: Vec<String> = explicit
            .into_iter()
            .filter(|lit| !input.chunks.iter().any(|c| contains_whole_word(&c.text, lit)))
            .collect();

        if unsupported.is_empty() {
            return None;
        }
        Some(
            Reason::new(ReasonCode::UnsupportedExplicitClaim)
                .with_details(unsupported_details(&unsupported)),
        )
    }
}
