use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format. In text mode each
/// top-level field of `data` is printed on its own line.
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    let fields = match data {
        Some(Value::Object(map)) => map,
        Some(other) => Map::from_iter([("data".to_string(), other)]),
        None => Map::new(),
    };

    match output_format {
        OutputFormat::Json => {
            let mut response = Map::from_iter([
                ("success".to_string(), json!(true)),
                ("message".to_string(), json!(message)),
            ]);
            response.extend(fields);
            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            for (key, value) in fields {
                match value {
                    Value::String(s) => println!("  {}: {}", key, s),
                    other => println!("  {}: {}", key, other),
                }
            }
        }
    }
    Ok(())
}
