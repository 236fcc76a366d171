//! Lexical primitives shared by the scoring pipeline and the extension checks.

pub mod citations;
pub mod claims;
pub mod literals;
pub mod tokenize;

pub use citations::{count_marker, extract_citations, strip_citation_markers};
pub use claims::{split_into_claims, ClaimFilter};
pub use tokenize::{tokenize, TokenSet};
