use crate::model::{ChunkLookup, Claim};
use crate::text::{extract_citations, tokenize};

/// Maps each claim to its best-overlapping cited chunk.
///
/// Candidates are the claim's own markers, or `global_citations` when it has
/// none. Ids missing from the lookup are skipped. Ties keep the first
/// candidate seen.
pub fn map_claims(
    claims: &[String],
    lookup: &ChunkLookup<'_>,
    global_citations: &[String],
    min_similarity: f64,
) -> Vec<Claim> {
    claims
        .iter()
        .map(|text| map_claim(text, lookup, global_citations, min_similarity))
        .collect()
}

fn map_claim(
    text: &str,
    lookup: &ChunkLookup<'_>,
    global_citations: &[String],
    min_similarity: f64,
) -> Claim {
    let local_citations = extract_citations(text);
    let cited_chunk_ids = if local_citations.is_empty() {
        global_citations.to_vec()
    } else {
        local_citations.clone()
    };

    let claim_tokens = tokenize(text);
    let mut best_chunk_id: Option<String> = None;
    let mut best_score = 0.0;
    for id in &cited_chunk_ids {
        let Some(chunk) = lookup.get(id) else {
            continue;
        };
        let score = claim_tokens.overlap_ratio(&tokenize(&chunk.text));
        if score > best_score {
            best_score = score;
            best_chunk_id = Some(id.clone());
        }
    }

    let supported = !cited_chunk_ids.is_empty() && best_score >= min_similarity;
    Claim {
        text: text.to_string(),
        local_citations,
        cited_chunk_ids,
        best_chunk_id,
        best_score,
        supported,
    }
}
