use serde_json::{Map, Value};
use tabled::{Table, builder::Builder};

/// Format output as tables using the tabled crate.
///
/// Scalar fields print as a Field/Value table; embedded arrays (payment
/// schedules, offer grids, validation errors) get a row table each.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => print_object(map),
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_object(map: &Map<String, Value>) {
    // Approval envelopes carry the credit one level down.
    if let Some(Value::Object(credit)) = map.get("credit") {
        if let Some(Value::String(decision)) = map.get("decision") {
            println!("Decision: {}\n", decision);
        }
        print_object(credit);
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if !matches!(val, Value::Array(_)) {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
    }
    let table = Table::from(builder);
    println!("{}", table);

    for (key, val) in map {
        if let Value::Array(arr) = val {
            if !arr.is_empty() {
                println!("\n{}:", key);
                print_rows(arr);
            }
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers = super::ordered_columns(first);
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
