use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_value};

/// Format output as a two-column table, nested results flattened to dotted
/// field names.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_fields(result);
                print_envelope_notes(map);
            }
            Some(other) => println!("{}", format_value(other, "null")),
            None => print_fields(map),
        },
        _ => println!("{}", format_value(value, "null")),
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        builder.push_record([key, format_value(&val, "null")]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    for line in envelope_notes(envelope) {
        println!("{}", line);
    }
}

/// Warnings, assumptions and methodology as printable lines.
fn envelope_notes(envelope: &Map<String, Value>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            lines.push(format!("\n{}", "Warnings:".yellow().bold()));
            lines.extend(
                warnings
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|w| format!("  - {}", w)),
            );
        }
    }

    let assumptions: Vec<String> = match envelope.get("assumptions") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, val)| format!("  - {}: {}", key, format_value(val, "null")))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|val| format!("  - {}", format_value(val, "null")))
            .collect(),
        _ => Vec::new(),
    };
    if !assumptions.is_empty() {
        lines.push("\nAssumptions:".to_string());
        lines.extend(assumptions);
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        lines.push(format!("\nMethodology: {}", meth));
    }

    lines
}
