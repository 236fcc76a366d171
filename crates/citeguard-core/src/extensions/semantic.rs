use super::{unsupported_details, CheckInput, ExtensionCheck};
use crate::config::ExtensionFlags;
use crate::model::{Reason, ReasonCode};
use crate::text::literals::percent_literals;
use crate::text::{tokenize, TokenSet};

const STOPWORDS: &[&str] = &[
    "the", "and", "or", "is", "are", "was", "were", "a", "an", "to", "of", "in", "on", "for",
    "with", "as", "at", "by", "from", "that", "this", "it", "its", "be", "not", "only",
];

/// Flags percentages absent from every chunk or, when the answer has none,
/// the first content word outside the chunks' vocabulary.
pub struct SemanticSupport;

impl ExtensionCheck for SemanticSupport {
    fn name(&self) -> &'static str {
        "semantic_support_check"
    }

    fn enabled(&self, flags: &ExtensionFlags) -> bool {
        flags.semantic_support_check
    }

    fn run(&self, input: &CheckInput<'_>) -> Option<Reason> {
        let percents = percent_literals(input.answer_text);
        let unsupported = if percents.is_empty() {
            first_unknown_token(input).into_iter().collect()
        } else {
            let corpus = input
                .chunks
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            percents
                .into_iter()
                .filter(|p| !corpus.contains(p.as_str()))
                .collect::<Vec<_>>()
        };

        if unsupported.is_empty() {
            return None;
        }
        Some(Reason::new(ReasonCode::SemanticSupportWeak).with_details(unsupported_details(&unsupported)))
    }
}

fn first_unknown_token(input: &CheckInput<'_>) -> Option<String> {
    let mut vocabulary = TokenSet::new();
    for chunk in input.chunks {
        vocabulary.extend(tokenize(&chunk.text));
    }
    let answer = tokenize(input.answer_text);
    let found = answer
        .iter()
        .filter(|t| !STOPWORDS.contains(t))
        .filter(|t| !is_citation_token(t))
        .find(|t| !vocabulary.contains(t))
        .map(ToString::to_string);
    found
}

/// `c12`: the tokenized form of a `[C12]` marker.
fn is_citation_token(token: &str) -> bool {
    token
        .strip_prefix('c')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
