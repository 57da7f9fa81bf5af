use serde_json::Value;

use super::format_value;

/// Headline fields, in order of priority.
const PRIORITY_KEYS: [&str; 4] = ["health_score", "credit_score", "risk_level", "industry"];

/// Print just the headline value from the output.
///
/// The ratios command has no headline score and falls back to the first
/// field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_value(val, "null"));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val, "null"));
            return;
        }
    }

    println!("{}", format_value(result_obj, "null"));
}
