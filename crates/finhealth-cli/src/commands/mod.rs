pub mod analysis;
pub mod benchmarks;

use finhealth_core::benchmark::BenchmarkTable;
use finhealth_core::FinancialEngine;
use std::path::Path;

use crate::input;

/// Build the engine, loading a benchmark table from `path` (JSON or YAML)
/// when one is given.
pub fn load_engine(path: Option<&str>) -> Result<FinancialEngine, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(FinancialEngine::default());
    };
    let (resolved, contents) = input::file::read_text(path)?;
    let table = if input::file::is_yaml(Path::new(&resolved)) {
        BenchmarkTable::from_yaml_str(&contents)?
    } else {
        BenchmarkTable::from_json_str(&contents)?
    };
    tracing::info!(
        path = %resolved.display(),
        industries = table.industries().count(),
        "loaded benchmark table"
    );
    Ok(FinancialEngine::new(table))
}
