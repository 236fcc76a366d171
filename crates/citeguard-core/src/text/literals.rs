//! Explicit literals an answer can assert: percentages, durations in years,
//! and absolute qualifiers.

use lazy_static::lazy_static;
use regex::Regex;

/// Absolute qualifiers checked by strict claim extraction, in report order.
pub const ABSOLUTE_QUALIFIERS: [&str; 5] = ["always", "guarantees", "guarantee", "all", "never"];

lazy_static! {
    /// `95%`, `99.9%`; must not continue a preceding word.
    static ref PERCENT: Regex = Regex::new(r"\b[0-9]+(?:\.[0-9]+)?%").expect("percent regex");
    /// `2 years`, `1 Year`.
    static ref YEARS: Regex = Regex::new(r"(?i)\b[0-9]+\s+years?\b").expect("years regex");
    static ref ABSOLUTES: Vec<(&'static str, Regex)> = ABSOLUTE_QUALIFIERS
        .iter()
        .map(|w| (*w, Regex::new(&format!(r"(?i)\b{w}\b")).expect("qualifier regex")))
        .collect();
}

pub fn percent_literals(text: &str) -> Vec<String> {
    PERCENT
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn year_literals(text: &str) -> Vec<String> {
    YEARS
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Percent literals followed by year literals.
pub fn numeric_literals(text: &str) -> Vec<String> {
    let mut out = percent_literals(text);
    out.extend(year_literals(text));
    out
}

/// Qualifiers present in `text` as whole words, reported once each.
pub fn absolute_qualifiers(text: &str) -> Vec<String> {
    ABSOLUTES
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(w, _)| (*w).to_string())
        .collect()
}

/// Case-insensitive search for `literal` where each edge that is a word
/// character must sit on a word boundary in `haystack`.
///
/// `99%` therefore matches `Uptime is 99%.` but not `199%`, and `all`
/// does not match `overall`.
pub fn contains_whole_word(haystack: &str, literal: &str) -> bool {
    let needle = literal.to_lowercase();
    if needle.is_empty() {
        return false;
    }
    let hay = haystack.to_lowercase();
    let need_left = needle.chars().next().is_some_and(is_word_char);
    let need_right = needle.chars().next_back().is_some_and(is_word_char);

    hay.match_indices(needle.as_str()).any(|(start, m)| {
        let end = start + m.len();
        let left_ok = !need_left || !hay[..start].chars().next_back().is_some_and(is_word_char);
        let right_ok = !need_right || !hay[end..].chars().next().is_some_and(is_word_char);
        left_ok && right_ok
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
