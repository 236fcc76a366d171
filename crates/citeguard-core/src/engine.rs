use serde_json::Value;

use crate::config::{ExtensionFlags, FlagOverrides, GuardrailsConfig};
use crate::decision::apply_base_rules;
use crate::errors::Result;
use crate::extensions::{self, CheckInput, ExtensionCheck};
use crate::mapping::map_claims;
use crate::metrics::Metrics;
use crate::model::{chunks_from_json, Chunk, ChunkLookup, DebugInfo, GroundingResult, Reason, Status};
use crate::text::{extract_citations, split_into_claims, ClaimFilter};

/// One evaluation call.
#[derive(Debug, Clone, Copy)]
pub struct GroundingRequest<'a> {
    pub answer_text: &'a str,
    pub chunks: &'a [Chunk],
    /// Context string the answer was generated from. Accepted for forward
    /// compatibility; scoring does not read it yet.
    pub prompt_context: &'a str,
    pub flags: FlagOverrides,
}

impl<'a> GroundingRequest<'a> {
    pub fn new(answer_text: &'a str, chunks: &'a [Chunk]) -> Self {
        Self {
            answer_text,
            chunks,
            prompt_context: "",
            flags: FlagOverrides::default(),
        }
    }

    pub fn with_context(mut self, prompt_context: &'a str) -> Self {
        self.prompt_context = prompt_context;
        self
    }

    pub fn with_flags(mut self, flags: FlagOverrides) -> Self {
        self.flags = flags;
        self
    }
}

/// A validated guardrails policy. Evaluation takes `&self` and touches no
/// shared mutable state, so one instance can serve concurrent callers.
pub struct Guardrails {
    config: GuardrailsConfig,
    filter: ClaimFilter,
    checks: Vec<Box<dyn ExtensionCheck>>,
}

impl Guardrails {
    pub fn new(config: GuardrailsConfig) -> Result<Self> {
        config.validate()?;
        let filter = ClaimFilter::new(&config.filter);
        Ok(Self {
            config,
            filter,
            checks: extensions::default_checks(),
        })
    }

    pub fn config(&self) -> &GuardrailsConfig {
        &self.config
    }

    pub fn evaluate(&self, req: &GroundingRequest<'_>) -> GroundingResult {
        // Resolved once; nothing below re-reads configuration flags.
        let flags = req.flags.resolve(self.config.extensions);
        let thresholds = &self.config.thresholds;

        let citations = extract_citations(req.answer_text);
        let claims = self.filter.filter(split_into_claims(req.answer_text));
        let lookup = ChunkLookup::build(req.chunks);
        let mapped = map_claims(
            &claims,
            &lookup,
            &citations,
            thresholds.min_similarity_for_mapping,
        );
        let metrics = Metrics::compute(req.answer_text, &mapped, &citations, req.chunks, &lookup);
        tracing::debug!(
            total_claims = metrics.total_claims,
            supported_claims = metrics.supported_claims,
            citations = metrics.distinct_citations(),
            citations_total = metrics.citations_count_total,
            chunks = req.chunks.len(),
            mapping_failed = metrics.mapping_failed,
            "grounding metrics computed"
        );

        let (rule, base_status, mut reasons) = apply_base_rules(&metrics, thresholds);
        let extension_reasons = self.run_extensions(req, &lookup, &metrics, &flags);
        reasons.extend(extension_reasons);
        let status = extensions::escalate(base_status, &reasons);

        tracing::info!(
            status = %status,
            base_status = %base_status,
            rule = ?rule,
            reasons = ?reasons.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            "grounding verdict"
        );
        build_result(status, reasons, metrics)
    }

    /// Accepts loosely-typed chunk records, validating them first.
    pub fn evaluate_json(
        &self,
        answer_text: &str,
        chunks: &Value,
        prompt_context: &str,
        flags: FlagOverrides,
    ) -> Result<GroundingResult> {
        let chunks = chunks_from_json(chunks)?;
        let req = GroundingRequest::new(answer_text, &chunks)
            .with_context(prompt_context)
            .with_flags(flags);
        Ok(self.evaluate(&req))
    }

    fn run_extensions(
        &self,
        req: &GroundingRequest<'_>,
        lookup: &ChunkLookup<'_>,
        metrics: &Metrics,
        flags: &ExtensionFlags,
    ) -> Vec<Reason> {
        if !flags.any() {
            return Vec::new();
        }
        let input = CheckInput {
            answer_text: req.answer_text,
            chunks: req.chunks,
            lookup,
            metrics,
            dedup: &self.config.dedup,
        };
        extensions::run_checks(&self.checks, flags, &input)
    }
}

impl Default for Guardrails {
    fn default() -> Self {
        Self {
            config: GuardrailsConfig::default(),
            filter: ClaimFilter::default(),
            checks: extensions::default_checks(),
        }
    }
}

/// Evaluates with the default policy.
pub fn evaluate(req: &GroundingRequest<'_>) -> GroundingResult {
    Guardrails::default().evaluate(req)
}

/// Packages the verdict. `reasons` must already be in emission order: the
/// base rule's reason first, then extension reasons.
pub fn build_result(status: Status, reasons: Vec<Reason>, metrics: Metrics) -> GroundingResult {
    GroundingResult {
        status,
        reasons,
        citation_density: metrics.citation_density,
        supported_claims: metrics.supported_claims,
        total_claims: metrics.total_claims,
        debug: DebugInfo {
            citations: metrics.citations,
            uncovered_ratio: metrics.uncovered_ratio,
            mapping_failed: metrics.mapping_failed,
        },
        uncovered_claims: metrics.uncovered_claims,
    }
}
