//! API Risk Engine: classify OpenAPI document changes and score their risk.
//!
//! A generic tree diff feeds rule-based classifiers; the resulting change
//! records are weighted, normalized to 1-10, and mapped to a review tier.
//! Used by the binary for stdin/stdout; can also be called as a library.

pub mod anchor;
pub mod classify;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod loader;
pub mod report;
pub mod score;
pub mod types;

pub use config::Config;
pub use diff::{DiffEngine, StructuralDiff};
pub use engine::{compare_with, Engine};
pub use error::EngineError;
pub use types::{
  Analysis, AnalyzeRequest, ChangeRecord, ChangeType, Comparison, RiskAssessment, RiskLevel,
  ScoreRequest,
};

/// Compare two documents with the default engine and return the change list.
pub fn compare(
  old: &serde_json::Value,
  new: &serde_json::Value,
) -> Result<Comparison, EngineError> {
  Engine::with_defaults().compare(old, new)
}

/// Run the default engine on parsed input and return the analysis (no I/O).
pub fn run(input: &AnalyzeRequest) -> Result<Analysis, EngineError> {
  Engine::with_defaults().analyze(&input.old_spec, &input.new_spec)
}

/// Install a stderr `tracing` subscriber honouring `RUST_LOG` (default `warn`).
///
/// stdout is reserved for machine-readable output.
pub fn init_tracing(default_directive: &str) {
  use tracing_subscriber::EnvFilter;
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}
