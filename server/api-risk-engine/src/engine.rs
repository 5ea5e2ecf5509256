//! Orchestration: one diff run, every classifier, then scoring.

use serde_json::Value;
use tracing::debug;

use crate::classify;
use crate::config::Config;
use crate::diff::{DiffEngine, StructuralDiff};
use crate::error::EngineError;
use crate::score;
use crate::types::*;

/// Classify the diff produced by `differ`. Diff failures propagate unchanged.
pub fn compare_with<D: DiffEngine + ?Sized>(
  differ: &D,
  old: &Value,
  new: &Value,
) -> Result<Comparison, EngineError> {
  let events = differ.diff(old, new)?;
  let differences = classify::classify(&events);
  debug!(
    events = events.len(),
    changes = differences.len(),
    "classified diff"
  );
  Ok(Comparison { differences })
}

/// The comparison pipeline. Stateless between calls; share freely.
#[derive(Debug, Clone)]
pub struct Engine<D = StructuralDiff> {
  config: Config,
  differ: D,
}

impl Engine<StructuralDiff> {
  pub fn new(config: Config) -> Result<Self, EngineError> {
    config.validate()?;
    let differ = StructuralDiff::new(&config);
    Ok(Self { config, differ })
  }

  pub fn with_defaults() -> Self {
    Self {
      config: Config::default(),
      differ: StructuralDiff::default(),
    }
  }
}

impl<D: DiffEngine> Engine<D> {
  /// Use a caller-supplied diff engine (fixtures, alternative algorithms).
  pub fn with_differ(config: Config, differ: D) -> Result<Self, EngineError> {
    config.validate()?;
    Ok(Self { config, differ })
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn compare(&self, old: &Value, new: &Value) -> Result<Comparison, EngineError> {
    compare_with(&self.differ, old, new)
  }

  pub fn assess(&self, changes: &[ChangeRecord]) -> RiskAssessment {
    score::assess(changes, self.config.max_reference_score)
  }

  /// Compare and score in one step.
  pub fn analyze(&self, old: &Value, new: &Value) -> Result<Analysis, EngineError> {
    let comparison = self.compare(old, new)?;
    let assessment = self.assess(&comparison.differences);
    Ok(Analysis {
      differences: comparison.differences,
      assessment,
    })
  }
}
