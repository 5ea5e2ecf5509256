//! Engine configuration with sane defaults.

use crate::error::EngineError;

/// Raw score treated as "full risk" when normalizing to the 1-10 scale.
pub const DEFAULT_MAX_REFERENCE_SCORE: f64 = 30.0;

/// Tunables for scoring and the structural diff.
#[derive(Debug, Clone)]
pub struct Config {
  /// Raw score that maps to 10 before clamping.
  pub max_reference_score: f64,
  /// Maximum nesting depth the diff will descend into.
  pub max_depth: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_reference_score: DEFAULT_MAX_REFERENCE_SCORE,
      max_depth: 256,
    }
  }
}

impl Config {
  /// Default config with a different normalization reference.
  pub fn with_max_reference(max_reference_score: f64) -> Result<Self, EngineError> {
    let config = Self {
      max_reference_score,
      ..Self::default()
    };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), EngineError> {
    if !self.max_reference_score.is_finite() || self.max_reference_score <= 0.0 {
      return Err(EngineError::config(
        "max_reference_score",
        "must be a positive finite number",
      ));
    }
    if self.max_depth == 0 {
      return Err(EngineError::config("max_depth", "must be at least 1"));
    }
    Ok(())
  }
}
