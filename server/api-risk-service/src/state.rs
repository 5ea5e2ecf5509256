//! Shared handler state.

use api_risk_engine::{Config, Engine, EngineError};

pub struct AppState {
  pub engine: Engine,
}

impl AppState {
  pub fn new(config: Config) -> Result<Self, EngineError> {
    Ok(Self {
      engine: Engine::new(config)?,
    })
  }

  /// Defaults, with `MAX_REFERENCE_SCORE` overriding the normalization reference.
  pub fn from_env() -> Result<Self, EngineError> {
    let config = match std::env::var("MAX_REFERENCE_SCORE") {
      Ok(raw) => {
        let max: f64 = raw
          .parse()
          .map_err(|_| EngineError::config("MAX_REFERENCE_SCORE", "must be a number"))?;
        Config::with_max_reference(max)?
      }
      Err(_) => Config::default(),
    };
    Self::new(config)
  }
}
