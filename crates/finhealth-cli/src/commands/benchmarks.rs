use clap::Args;
use serde_json::{json, Value};

use super::load_engine;

/// Arguments for showing benchmarks
#[derive(Args)]
pub struct BenchmarksArgs {
    /// Show a single industry (falls back to "general" when unknown)
    #[arg(long)]
    pub industry: Option<String>,

    /// Benchmark table to use instead of the built-in one (JSON or YAML)
    #[arg(long)]
    pub benchmarks: Option<String>,
}

pub fn run_benchmarks(args: BenchmarksArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = load_engine(args.benchmarks.as_deref())?;
    let table = engine.benchmarks();

    match args.industry {
        Some(requested) => {
            let used = table.resolve_industry(&requested);
            let mut warnings = Vec::new();
            if used != requested {
                warnings.push(format!(
                    "Industry '{requested}' has no benchmarks; showing '{used}'."
                ));
            }
            let benchmarks = serde_json::to_value(table.lookup(used))?;
            Ok(json!({
                "result": {
                    "industry": used,
                    "benchmarks": benchmarks,
                },
                "warnings": warnings,
            }))
        }
        None => {
            let industries: Vec<&str> = table.industries().collect();
            Ok(json!({
                "result": serde_json::to_value(table)?,
                "industries": industries,
            }))
        }
    }
}
