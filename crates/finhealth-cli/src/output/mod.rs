pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into `(dotted.key, leaf)` rows, in map order.
///
/// Arrays are kept as leaves so list-valued fields (risk factors,
/// recommendations) stay on one row.
pub(crate) fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into(None, map, &mut rows);
    rows
}

fn flatten_into(prefix: Option<&str>, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match val {
            Value::Object(inner) if !inner.is_empty() => flatten_into(Some(&path), inner, rows),
            _ => rows.push((path, val.clone())),
        }
    }
}

/// Render a leaf value as plain text.
pub(crate) fn format_value(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| format_value(v, null))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let value = json!({
            "health_score": 83,
            "ratios": {"liquidity": {"current_ratio": "2", "quick_ratio": "1.5"}},
            "risk_assessment": {"risk_factors": ["Low profit margins"]},
            "benchmark_comparison": {}
        });
        let rows = flatten(value.as_object().unwrap());
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "benchmark_comparison",
                "health_score",
                "ratios.liquidity.current_ratio",
                "ratios.liquidity.quick_ratio",
                "risk_assessment.risk_factors",
            ]
        );
    }

    #[test]
    fn test_format_value_joins_arrays() {
        assert_eq!(format_value(&json!(["a", "b"]), ""), "a; b");
        assert_eq!(format_value(&Value::Null, "-"), "-");
        assert_eq!(format_value(&json!("12.5"), ""), "12.5");
    }
}
