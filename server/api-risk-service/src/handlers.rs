//! HTTP handlers for the risk service.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

use api_risk_engine::types::ErrorOutput;
use api_risk_engine::{Analysis, AnalyzeRequest, RiskAssessment, ScoreRequest};

use crate::state::AppState;

pub async fn health() -> &'static str {
  "ok"
}

/// Compare `old_spec` with `new_spec`; non-comparable documents are a 422.
pub async fn analyze(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Analysis>, (StatusCode, Json<ErrorOutput>)> {
  match state.engine.analyze(&payload.old_spec, &payload.new_spec) {
    Ok(analysis) => {
      info!(
        changes = analysis.differences.len(),
        score = analysis.assessment.normalized_score,
        level = %analysis.assessment.risk_level,
        "analyze"
      );
      Ok(Json(analysis))
    }
    Err(e) => {
      warn!("analyze: {}", e);
      Err((
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorOutput::new(e.to_string())),
      ))
    }
  }
}

/// Score a caller-supplied change list. Unknown change types count 0.
pub async fn score(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<ScoreRequest>,
) -> Json<RiskAssessment> {
  Json(state.engine.assess(&payload.differences))
}
