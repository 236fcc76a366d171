//! Ordered base rule table. The first matching rule decides the verdict.

use serde::Serialize;

use crate::config::Thresholds;
use crate::metrics::Metrics;
use crate::model::{Reason, ReasonCode, Status};

/// The rule that produced a base verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseRule {
    NoCitations,
    MappingFailed,
    UnsupportedClaims,
    LowCitationDensity,
    PartialCoverage,
    Allow,
}

impl BaseRule {
    pub fn status(&self) -> Status {
        match self {
            BaseRule::NoCitations | BaseRule::MappingFailed | BaseRule::UnsupportedClaims => {
                Status::Block
            }
            BaseRule::LowCitationDensity | BaseRule::PartialCoverage => Status::Warn,
            BaseRule::Allow => Status::Allow,
        }
    }

    pub fn code(&self) -> Option<ReasonCode> {
        match self {
            BaseRule::NoCitations => Some(ReasonCode::NoCitations),
            BaseRule::MappingFailed => Some(ReasonCode::MappingFailed),
            BaseRule::UnsupportedClaims => Some(ReasonCode::UnsupportedClaims),
            BaseRule::LowCitationDensity => Some(ReasonCode::LowCitationDensity),
            BaseRule::PartialCoverage => Some(ReasonCode::PartialCoverage),
            BaseRule::Allow => None,
        }
    }
}

pub fn select_rule(metrics: &Metrics, t: &Thresholds) -> BaseRule {
    if t.refuse_on_no_citations && metrics.distinct_citations() == 0 {
        return BaseRule::NoCitations;
    }
    if metrics.mapping_failed {
        return BaseRule::MappingFailed;
    }
    if metrics.uncovered_count() > t.max_uncovered_claims
        || metrics.uncovered_ratio > t.max_uncovered_ratio
    {
        return BaseRule::UnsupportedClaims;
    }
    if metrics.citation_density < t.min_citation_density {
        return BaseRule::LowCitationDensity;
    }
    if metrics.uncovered_count() > 0 {
        return BaseRule::PartialCoverage;
    }
    BaseRule::Allow
}

/// Base verdict and its single reason (none for ALLOW).
pub fn apply_base_rules(metrics: &Metrics, t: &Thresholds) -> (BaseRule, Status, Vec<Reason>) {
    let rule = select_rule(metrics, t);
    let reasons = rule.code().map(Reason::new).into_iter().collect();
    (rule, rule.status(), reasons)
}
