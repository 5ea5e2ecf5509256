//! Structured error types for the API risk engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// The two trees cannot be compared structurally.
  #[error("diff: documents are not comparable: {0}")]
  NotComparable(String),

  #[error("diff: nesting exceeds {max_depth} levels at {path}")]
  TooDeep { max_depth: usize, path: String },

  #[error("config: {field}: {reason}")]
  Config { field: String, reason: String },

  #[error("file {0} not found")]
  NotFound(String),

  #[error("io: {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("parse: {path}: {reason}")]
  Parse { path: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn not_comparable(msg: impl Into<String>) -> Self {
    Self::NotComparable(msg.into())
  }

  pub fn config(field: &str, reason: &str) -> Self {
    Self::Config {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn parse(path: &str, reason: impl ToString) -> Self {
    Self::Parse {
      path: path.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Failures raised by the diff engine (as opposed to loading or config).
  pub fn is_diff_failure(&self) -> bool {
    matches!(self, Self::NotComparable(_) | Self::TooDeep { .. })
  }
}
