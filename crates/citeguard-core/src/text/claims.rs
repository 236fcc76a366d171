use crate::config::FilterConfig;

/// Splits answer text into candidate claims on `.`, `?`, `!` and newlines.
///
/// Segments are trimmed; empty segments are dropped and a trailing fragment
/// without a terminator is still a claim.
pub fn split_into_claims(text: &str) -> Vec<String> {
    text.split(['.', '?', '!', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Drops boilerplate and non-substantive claims.
#[derive(Debug, Clone)]
pub struct ClaimFilter {
    min_chars: usize,
    prefixes: Vec<String>,
}

impl ClaimFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_chars: config.min_claim_chars,
            prefixes: config
                .disclaimer_prefixes
                .iter()
                .map(|p| {
                    let normalised = p.trim().to_lowercase();
                    if normalised != *p {
                        tracing::warn!(prefix = %normalised, "disclaimer prefix normalised");
                    }
                    normalised
                })
                .collect(),
        }
    }

    pub fn keeps(&self, claim: &str) -> bool {
        let stripped = claim.trim();
        if stripped.chars().count() < self.min_chars {
            return false;
        }
        if !stripped.chars().any(char::is_alphanumeric) {
            return false;
        }
        let lowered = stripped.to_lowercase();
        !self.prefixes.iter().any(|p| lowered.starts_with(p.as_str()))
    }

    pub fn filter(&self, claims: Vec<String>) -> Vec<String> {
        claims
            .into_iter()
            .filter(|c| self.keeps(c))
            .map(|c| c.trim().to_string())
            .collect()
    }
}

impl Default for ClaimFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
