//! Breaking-change weights, raw/normalized scores, and risk tiers.

use crate::types::{ChangeRecord, ChangeType, RiskAssessment, RiskLevel};

/// Points per change type. Only removals and required-parameter additions are
/// emitted today; the remaining rows are scored for callers that submit their
/// own change lists.
pub fn score_of(change_type: ChangeType) -> u32 {
  match change_type {
    ChangeType::EndpointRemoved => 25,
    ChangeType::MethodRemoved => 20,
    ChangeType::ParameterRequiredAdded => 15,
    ChangeType::ParameterRemoved => 25,
    ChangeType::ParameterTypeChanged => 18,
    ChangeType::ParameterMadeRequired => 12,
    ChangeType::ResponseRequiredFieldRemoved => 20,
    ChangeType::ResponseSchemaChanged => 15,
    ChangeType::ResponseRequiredFieldAdded => 8,
    ChangeType::EndpointDeprecatedWithTimeline => 5,
    ChangeType::EndpointDeprecated => 8,
    ChangeType::ParameterOptionalAdded => 0,
    ChangeType::ResponseOptionalFieldAdded => 0,
    ChangeType::EndpointAdded => 0,
    ChangeType::Unknown => 0,
  }
}

/// Score for a raw tag string; unrecognized tags score 0.
pub fn score_of_tag(tag: &str) -> u32 {
  score_of(ChangeType::from_tag(tag))
}

/// Unbounded sum of per-change points (0 for no changes).
pub fn raw_score(changes: &[ChangeRecord]) -> u32 {
  changes
    .iter()
    .map(|c| score_of(c.change_type))
    .fold(0u32, u32::saturating_add)
}

/// Rescale a raw score to 1-10, one decimal place.
///
/// No risk is the floor of 1, never 0. Exact halves round to even, so
/// 1.25 becomes 1.2. `max_reference` must be positive (see `Config::validate`).
pub fn normalize(raw_score: u32, max_reference: f64) -> f64 {
  if raw_score == 0 {
    return 1.0;
  }
  let scaled = (raw_score as f64 / max_reference) * 10.0;
  let clamped = scaled.clamp(1.0, 10.0);
  (clamped * 10.0).round_ties_even() / 10.0
}

/// Fixed advisory text for one risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTier {
  pub level: RiskLevel,
  pub label: &'static str,
  pub message: &'static str,
  pub reviewer_action: &'static str,
}

const LOW: RiskTier = RiskTier {
  level: RiskLevel::Low,
  label: "[LOW]",
  message: "Safe to deploy. No special review required.",
  reviewer_action: "Standard review; merge confidently.",
};

const MEDIUM: RiskTier = RiskTier {
  level: RiskLevel::Medium,
  label: "[MED]",
  message: "Review carefully. Some changes may impact clients.",
  reviewer_action: "Require one reviewer; ensure testing coverage; notify affected teams.",
};

const HIGH: RiskTier = RiskTier {
  level: RiskLevel::High,
  label: "[HIGH]",
  message: "High-risk change. Extra vigilance required.",
  reviewer_action:
    "Require two reviewers; mandate QA verification; consider staged rollout; notify clients.",
};

/// Tier for a normalized score; 3 and 6 are inclusive upper bounds.
pub fn risk_tier(normalized_score: f64) -> RiskTier {
  if normalized_score <= 3.0 {
    LOW
  } else if normalized_score <= 6.0 {
    MEDIUM
  } else {
    HIGH
  }
}

/// Full assessment for a change list.
pub fn assess(changes: &[ChangeRecord], max_reference: f64) -> RiskAssessment {
  let raw = raw_score(changes);
  let normalized_score = normalize(raw, max_reference);
  let tier = risk_tier(normalized_score);
  RiskAssessment {
    raw_score: raw,
    normalized_score,
    risk_level: tier.level,
    label: tier.label.to_string(),
    message: tier.message.to_string(),
    reviewer_action: tier.reviewer_action.to_string(),
  }
}
