//! Plain-text report for the CLI or a PR comment.

use crate::score::score_of;
use crate::types::{Comparison, RiskAssessment};

pub fn render_text(assessment: &RiskAssessment, comparison: &Comparison) -> String {
  let mut lines = vec![
    format!(
      "{} API Risk Score: {}/10",
      assessment.label, assessment.normalized_score
    ),
    format!("Risk Level: {}", assessment.risk_level),
    format!("Summary: {}", assessment.message),
    "Recommended Actions:".to_string(),
    assessment.reviewer_action.clone(),
    String::new(),
    "Changes Detected:".to_string(),
  ];

  if comparison.differences.is_empty() {
    lines.push("No API changes detected.".to_string());
  }
  for change in &comparison.differences {
    let points = score_of(change.change_type);
    let icon = if points > 0 { "[!]" } else { "[OK]" };
    lines.push(format!(
      "- {} {} ({} pts): {} {}",
      icon, change.change_type, points, change.method, change.path
    ));
  }

  lines.join("\n")
}
