use serde_json::Value;
use std::io;

use super::{flatten, format_value};

/// Write output as `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    for row in csv_rows(value) {
        let _ = wtr.write_record(&row);
    }

    let _ = wtr.flush();
}

/// Result fields flattened to dotted keys, followed by one `warning` row per
/// envelope warning.
fn csv_rows(value: &Value) -> Vec<Vec<String>> {
    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut rows = Vec::new();
    match body {
        Value::Object(map) => {
            rows.push(vec!["field".to_string(), "value".to_string()]);
            for (key, val) in flatten(map) {
                rows.push(vec![key, format_value(&val, "")]);
            }
        }
        other => rows.push(vec![format_value(other, "")]),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        rows.extend(
            warnings
                .iter()
                .filter_map(Value::as_str)
                .map(|w| vec!["warning".to_string(), w.to_string()]),
        );
    }

    rows
}
