use std::collections::HashSet;

/// Case-folded alphanumeric tokens with first-seen iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token; returns false if it was already present.
    pub fn insert(&mut self, token: String) -> bool {
        if self.members.contains(&token) {
            return false;
        }
        self.members.insert(token.clone());
        self.order.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Merges another set, keeping this set's order for shared tokens.
    pub fn extend(&mut self, other: TokenSet) {
        for token in other.order {
            self.insert(token);
        }
    }

    /// Recall of `self` against `other`: `|self ∩ other| / max(1, |self|)`.
    ///
    /// Asymmetric on purpose: a long chunk is not penalised for containing
    /// text the claim does not mention.
    pub fn overlap_ratio(&self, other: &TokenSet) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let shared = self.iter().filter(|t| other.contains(t)).count();
        shared as f64 / self.len().max(1) as f64
    }
}

/// Splits `text` into lower-cased runs of ASCII letters and digits.
///
/// Anything else is a separator and never part of a token.
pub fn tokenize(text: &str) -> TokenSet {
    let mut tokens = TokenSet::new();
    let mut buf = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            buf.push(ch.to_ascii_lowercase());
        } else if !buf.is_empty() {
            tokens.insert(std::mem::take(&mut buf));
        }
    }
    if !buf.is_empty() {
        tokens.insert(buf);
    }
    tokens
}
