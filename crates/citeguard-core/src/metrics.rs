use serde::Serialize;

use crate::model::{Chunk, ChunkLookup, Claim};
use crate::text::count_marker;

/// Aggregate counts for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_claims: usize,
    pub supported_claims: usize,
    pub uncovered_claims: Vec<String>,
    pub uncovered_ratio: f64,
    pub citation_density: f64,
    /// Distinct citation ids in first-seen order.
    pub citations: Vec<String>,
    /// Marker occurrences per distinct id, in `citations` order. Ids that
    /// never occur literally are omitted.
    pub citations_by_chunk: Vec<(String, usize)>,
    pub citations_count_total: usize,
    pub mapping_failed: bool,
}

impl Metrics {
    pub fn compute(
        answer_text: &str,
        claims: &[Claim],
        citations: &[String],
        chunks: &[Chunk],
        lookup: &ChunkLookup<'_>,
    ) -> Self {
        let total_claims = claims.len();
        let supported_claims = claims.iter().filter(|c| c.supported).count();
        let uncovered_claims: Vec<String> = claims
            .iter()
            .filter(|c| !c.supported)
            .map(|c| c.text.clone())
            .collect();
        let denominator = total_claims.max(1) as f64;

        let citations_by_chunk: Vec<(String, usize)> = citations
            .iter()
            .map(|id| (id.clone(), count_marker(answer_text, id)))
            .filter(|(_, n)| *n > 0)
            .collect();
        let citations_count_total = citations_by_chunk.iter().map(|(_, n)| n).sum();

        let mapping_failed = total_claims > 0
            && (chunks.is_empty()
                || (!citations.is_empty() && !citations.iter().any(|id| lookup.contains(id))));

        Self {
            total_claims,
            supported_claims,
            uncovered_ratio: uncovered_claims.len() as f64 / denominator,
            uncovered_claims,
            citation_density: citations.len() as f64 / denominator,
            citations: citations.to_vec(),
            citations_by_chunk,
            citations_count_total,
            mapping_failed,
        }
    }

    pub fn uncovered_count(&self) -> usize {
        self.uncovered_claims.len()
    }

    pub fn distinct_citations(&self) -> usize {
        self.citations.len()
    }

    /// Largest single-chunk share of all marker occurrences, with its id.
    pub fn dominant_chunk(&self) -> Option<(&str, f64)> {
        let total = self.citations_count_total.max(1) as f64;
        let mut best: Option<(&str, usize)> = None;
        for (id, n) in &self.citations_by_chunk {
            if best.map_or(true, |(_, b)| *n > b) {
                best = Some((id.as_str(), *n));
            }
        }
        best.map(|(id, n)| (id, n as f64 / total))
    }
}
