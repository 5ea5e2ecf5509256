//! api-risk: API breaking-change risk check for two OpenAPI documents
//!
//! Usage:
//!   api-risk --old v1.yaml --new v2.yaml                # print the text report
//!   api-risk --old v1.yaml --new v2.yaml --format json  # print the analysis JSON
//!   api-risk --old v1.yaml --new v2.yaml -o report.txt  # also save the report
//!
//! Exits 1 when either document cannot be loaded or compared. Use in CI or PR
//! checks to flag risky API changes before merge.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use api_risk_engine::loader::load_document;
use api_risk_engine::report::render_text;
use api_risk_engine::{Analysis, Comparison, Config, Engine};

#[derive(Parser, Debug)]
#[command(name = "api-risk", version, about = "API Breaking Change Risk Vigilance Tool")]
struct Cli {
    /// Path to the original OpenAPI specification file.
    #[arg(long = "old", value_name = "FILE")]
    old_spec: PathBuf,

    /// Path to the new OpenAPI specification file.
    #[arg(long = "new", value_name = "FILE")]
    new_spec: PathBuf,

    /// Path to save the report.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Raw score that maps to 10 on the risk scale.
    #[arg(long, default_value_t = api_risk_engine::config::DEFAULT_MAX_REFERENCE_SCORE)]
    max_reference: f64,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    api_risk_engine::init_tracing(if cli.verbose { "info" } else { "warn" });

    let engine = Engine::new(Config::with_max_reference(cli.max_reference)?)?;
    let (analysis, rendered) = assess(&engine, &cli.old_spec, &cli.new_spec, cli.format)?;
    info!(
        changes = analysis.differences.len(),
        score = analysis.assessment.normalized_score,
        "comparison complete"
    );

    println!("{}", rendered);

    if let Some(path) = &cli.output {
        match fs::write(path, &rendered) {
            Ok(()) => println!("\nReport saved to {}", path.display()),
            Err(e) => error!("cannot save report to {}: {}", path.display(), e),
        }
    }
    Ok(())
}

/// Load both documents, compare, and render in the requested format.
fn assess(
    engine: &Engine,
    old_path: &Path,
    new_path: &Path,
    format: OutputFormat,
) -> anyhow::Result<(Analysis, String)> {
    let old = load_document(old_path).context("failed to load the old spec")?;
    let new = load_document(new_path).context("failed to load the new spec")?;

    let analysis = engine
        .analyze(&old, &new)
        .context("failed to compare specifications")?;

    let rendered = match format {
        OutputFormat::Text => render_text(
            &analysis.assessment,
            &Comparison {
                differences: analysis.differences.clone(),
            },
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&analysis)?,
    };
    Ok((analysis, rendered))
}
