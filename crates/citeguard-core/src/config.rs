use serde::{Deserialize, Serialize};

use crate::errors::{GuardError, Result};

/// Static policy for one guardrails instance.
///
/// Every section is optional in YAML; omitted fields take the defaults
/// below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardrailsConfig {
    pub thresholds: Thresholds,
    pub dedup: DedupConfig,
    pub extensions: ExtensionFlags,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub refuse_on_no_citations: bool,
    pub min_citation_density: f64,
    pub max_uncovered_claims: usize,
    pub max_uncovered_ratio: f64,
    pub min_similarity_for_mapping: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            refuse_on_no_citations: true,
            min_citation_density: 0.20,
            max_uncovered_claims: 1,
            max_uncovered_ratio: 0.20,
            min_similarity_for_mapping: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DedupConfig {
    pub max_single_chunk_share: f64,
    pub min_total_citations: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            max_single_chunk_share: 0.80,
            min_total_citations: 3,
        }
    }
}

/// Stricter checks that can only escalate ALLOW to WARN. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionFlags {
    pub semantic_support_check: bool,
    pub strict_claim_extraction: bool,
    pub claim_citation_alignment: bool,
    pub citation_dedup_penalty: bool,
}

impl ExtensionFlags {
    pub fn all() -> Self {
        Self {
            semantic_support_check: true,
            strict_claim_extraction: true,
            claim_citation_alignment: true,
            citation_dedup_penalty: true,
        }
    }

    pub fn any(&self) -> bool {
        self.semantic_support_check
            || self.strict_claim_extraction
            || self.claim_citation_alignment
            || self.citation_dedup_penalty
    }
}

/// Per-call flag overrides. `Some` wins over the configured default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOverrides {
    pub semantic_support_check: Option<bool>,
    pub strict_claim_extraction: Option<bool>,
    pub claim_citation_alignment: Option<bool>,
    pub citation_dedup_penalty: Option<bool>,
}

impl FlagOverrides {
    /// Forces every extension to `enabled`.
    pub fn uniform(enabled: bool) -> Self {
        Self {
            semantic_support_check: Some(enabled),
            strict_claim_extraction: Some(enabled),
            claim_citation_alignment: Some(enabled),
            citation_dedup_penalty: Some(enabled),
        }
    }

    /// Snapshot of the effective flags for one evaluation.
    pub fn resolve(&self, defaults: ExtensionFlags) -> ExtensionFlags {
        ExtensionFlags {
            semantic_support_check: self
                .semantic_support_check
                .unwrap_or(defaults.semantic_support_check),
            strict_claim_extraction: self
                .strict_claim_extraction
                .unwrap_or(defaults.strict_claim_extraction),
            claim_citation_alignment: self
                .claim_citation_alignment
                .unwrap_or(defaults.claim_citation_alignment),
            citation_dedup_penalty: self
                .citation_dedup_penalty
                .unwrap_or(defaults.citation_dedup_penalty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub min_claim_chars: usize,
    pub disclaimer_prefixes: Vec<String>,
}

pub const DEFAULT_DISCLAIMER_PREFIXES: &[&str] = &[
    "i cannot",
    "i can't",
    "i can\u{2019}t",
    "cannot find",
    "not found in the context",
    "insufficient context",
    "i don't have",
    "i do not have",
    "as an ai",
    "i am an ai",
];

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_claim_chars: 8,
            disclaimer_prefixes: DEFAULT_DISCLAIMER_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl GuardrailsConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: GuardrailsConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        check_ratio("thresholds.min_citation_density", t.min_citation_density, false)?;
        check_ratio("thresholds.max_uncovered_ratio", t.max_uncovered_ratio, true)?;
        check_ratio(
            "thresholds.min_similarity_for_mapping",
            t.min_similarity_for_mapping,
            true,
        )?;
        check_ratio(
            "dedup.max_single_chunk_share",
            self.dedup.max_single_chunk_share,
            true,
        )?;
        if self.dedup.min_total_citations == 0 {
            return Err(GuardError::invalid_config(
                "dedup.min_total_citations",
                "must be at least 1",
            ));
        }
        if self
            .filter
            .disclaimer_prefixes
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(GuardError::invalid_config(
                "filter.disclaimer_prefixes",
                "entries must not be empty",
            ));
        }
        Ok(())
    }
}

// Density is a count per claim and may legitimately exceed 1.
fn check_ratio(field: &'static str, value: f64, unit_interval: bool) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GuardError::invalid_config(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    if unit_interval && value > 1.0 {
        return Err(GuardError::invalid_config(
            field,
            format!("must be within [0, 1], got {value}"),
        ));
    }
    Ok(())
}
