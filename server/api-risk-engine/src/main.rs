//! `api-risk-engine`: analyze one pair of parsed OpenAPI documents.
//!
//! stdin carries `{"old_spec": {...}, "new_spec": {...}}` (at most 16 MiB,
//! the same cap the HTTP service applies); stdout receives the `Analysis`
//! JSON with the change list and risk assessment. Failures exit 1 with one
//! line on stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use api_risk_engine::{init_tracing, run, AnalyzeRequest};

const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

fn main() -> ExitCode {
  init_tracing("warn");
  match analyze_stdin() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let _ = writeln!(io::stderr(), "api-risk-engine error: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn analyze_stdin() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = Vec::new();
  io::stdin().lock().take(MAX_INPUT_BYTES + 1).read_to_end(&mut raw)?;
  if raw.len() as u64 > MAX_INPUT_BYTES {
    return Err(format!("input exceeds {} bytes", MAX_INPUT_BYTES).into());
  }
  let request: AnalyzeRequest = serde_json::from_slice(&raw)?;
  let analysis = run(&request)?;

  let mut stdout = io::stdout().lock();
  serde_json::to_writer(&mut stdout, &analysis)?;
  stdout.flush()?;
  Ok(())
}
