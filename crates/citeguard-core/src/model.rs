use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GuardError, Result};

/// A retrieved evidence passage.
///
/// Deserialization goes through [`Chunk::from_value`], so typed serde input
/// gets the same lenient field handling as `evaluate_json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Chunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    pub text: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Chunk {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_index(index: i64, text: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Explicit non-empty id, else `C<index>`.
    pub fn resolved_id(&self) -> Option<String> {
        match (&self.id, self.index) {
            (Some(id), _) if !id.is_empty() => Some(id.clone()),
            (_, Some(index)) => Some(format!("C{index}")),
            _ => None,
        }
    }

    /// Builds a chunk from a loosely-typed record.
    ///
    /// Only a non-object record is rejected. Wrongly-typed fields degrade:
    /// non-string `text` becomes empty, non-string `id` and non-integer
    /// `index` become absent.
    pub fn from_value(value: &Value, position: usize) -> Result<Self> {
        Self::parse(value, || format!("retrieved_chunks[{position}]"))
    }

    fn parse(value: &Value, location: impl FnOnce() -> String) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(GuardError::invalid_input(
                location(),
                format!("expected an object, got {}", json_kind(value)),
            ));
        };

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let index = obj
            .get("index")
            .or_else(|| obj.get("chunk_index"))
            .and_then(Value::as_i64);
        let text = obj
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let metadata = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "id" | "index" | "chunk_index" | "text"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id,
            index,
            text,
            metadata,
        })
    }
}

impl TryFrom<Value> for Chunk {
    type Error = GuardError;

    fn try_from(value: Value) -> Result<Self> {
        Self::parse(&value, || "chunk".to_string())
    }
}

/// Parses a JSON array of chunk records.
pub fn chunks_from_json(value: &Value) -> Result<Vec<Chunk>> {
    let Some(items) = value.as_array() else {
        return Err(GuardError::invalid_input(
            "retrieved_chunks",
            format!("expected an array, got {}", json_kind(value)),
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| Chunk::from_value(v, i))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Chunks keyed by resolved id. A later chunk with the same id replaces an
/// earlier one.
#[derive(Debug, Default)]
pub struct ChunkLookup<'a> {
    by_id: HashMap<String, &'a Chunk>,
}

impl<'a> ChunkLookup<'a> {
    pub fn build(chunks: &'a [Chunk]) -> Self {
        let by_id = chunks
            .iter()
            .filter_map(|c| c.resolved_id().map(|id| (id, c)))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Chunk> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// One sentence-like span of the answer and its best evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub text: String,
    /// Markers inside this claim's own text.
    pub local_citations: Vec<String>,
    /// Ids actually scored: the local ones, or the answer-wide list when
    /// the claim cites nothing itself.
    pub cited_chunk_ids: Vec<String>,
    pub best_chunk_id: Option<String>,
    pub best_score: f64,
    pub supported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Allow,
    Warn,
    Block,
}

impl Status {
    /// The stricter of the two; never weakens.
    pub fn escalate(self, to: Status) -> Status {
        self.max(to)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Allow => "ALLOW",
            Status::Warn => "WARN",
            Status::Block => "BLOCK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NoCitations,
    MappingFailed,
    UnsupportedClaims,
    LowCitationDensity,
    PartialCoverage,
    CitationDedupDominance,
    SemanticSupportWeak,
    UnsupportedExplicitClaim,
    ClaimCitationMismatch,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 9] = [
        ReasonCode::NoCitations,
        ReasonCode::MappingFailed,
        ReasonCode::UnsupportedClaims,
        ReasonCode::LowCitationDensity,
        ReasonCode::PartialCoverage,
        ReasonCode::CitationDedupDominance,
        ReasonCode::SemanticSupportWeak,
        ReasonCode::UnsupportedExplicitClaim,
        ReasonCode::ClaimCitationMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::NoCitations => "NO_CITATIONS",
            ReasonCode::MappingFailed => "MAPPING_FAILED",
            ReasonCode::UnsupportedClaims => "UNSUPPORTED_CLAIMS",
            ReasonCode::LowCitationDensity => "LOW_CITATION_DENSITY",
            ReasonCode::PartialCoverage => "PARTIAL_COVERAGE",
            ReasonCode::CitationDedupDominance => "CITATION_DEDUP_DOMINANCE",
            ReasonCode::SemanticSupportWeak => "SEMANTIC_SUPPORT_WEAK",
            ReasonCode::UnsupportedExplicitClaim => "UNSUPPORTED_EXPLICIT_CLAIM",
            ReasonCode::ClaimCitationMismatch => "CLAIM_CITATION_MISMATCH",
        }
    }

    /// Codes produced by the optional extension checks.
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            ReasonCode::CitationDedupDominance
                | ReasonCode::SemanticSupportWeak
                | ReasonCode::UnsupportedExplicitClaim
                | ReasonCode::ClaimCitationMismatch
        )
    }

    /// Status this code implies on its own. Extension codes imply WARN but
    /// only ever escalate an ALLOW.
    pub fn severity(&self) -> Status {
        match self {
            ReasonCode::NoCitations | ReasonCode::MappingFailed | ReasonCode::UnsupportedClaims => {
                Status::Block
            }
            _ => Status::Warn,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ReasonCode::NoCitations => "No citations were found in the answer.",
            ReasonCode::MappingFailed => "Claim-to-evidence mapping failed.",
            ReasonCode::UnsupportedClaims => "Too many claims are not supported by cited chunks.",
            ReasonCode::LowCitationDensity => "Citation density is below the minimum threshold.",
            ReasonCode::PartialCoverage => "Some claims are not supported by cited chunks.",
            ReasonCode::CitationDedupDominance => {
                "Citations are overly concentrated on a single chunk."
            }
            ReasonCode::SemanticSupportWeak => {
                "Answer contains claims not supported by retrieved chunks."
            }
            ReasonCode::UnsupportedExplicitClaim => {
                "Explicit claims are not supported by retrieved chunks."
            }
            ReasonCode::ClaimCitationMismatch => {
                "Cited chunks do not support explicit numeric claims."
            }
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub code: ReasonCode,
    pub message: String,
    pub related_chunk_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Reason {
    pub fn new(code: ReasonCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            related_chunk_ids: Vec::new(),
            details: None,
        }
    }

    pub fn with_related(mut self, ids: Vec<String>) -> Self {
        self.related_chunk_ids = ids;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub citations: Vec<String>,
    pub uncovered_ratio: f64,
    pub mapping_failed: bool,
}

/// Final verdict record returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingResult {
    pub status: Status,
    pub reasons: Vec<Reason>,
    pub uncovered_claims: Vec<String>,
    pub citation_density: f64,
    pub supported_claims: usize,
    pub total_claims: usize,
    pub debug: DebugInfo,
}

impl GroundingResult {
    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reasons.iter().any(|r| r.code == code)
    }

    pub fn reason_codes(&self) -> Vec<ReasonCode> {
        self.reasons.iter().map(|r| r.code).collect()
    }
}
