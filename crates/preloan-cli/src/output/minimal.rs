use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field of the object. Arrays print one
/// line per element.
pub fn print_minimal(value: &Value) {
    // Approval envelopes carry the interesting figures one level down.
    let target = value
        .as_object()
        .and_then(|m| m.get("credit"))
        .unwrap_or(value);

    match target {
        Value::Object(_) => print_minimal_object(target),
        Value::Array(arr) => {
            for item in arr {
                print_minimal_object(item);
            }
        }
        _ => println!("{}", format_minimal(target)),
    }
}

fn print_minimal_object(value: &Value) {
    // Priority list of key output fields
    let priority_keys = ["psk", "rate", "monthly_payment", "valid", "reason"];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(value));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
