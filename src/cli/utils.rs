use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Print a success message in the selected format. `data` must be a JSON object
/// when given; its keys are merged into the JSON output.
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(obj)) = (data, response.as_object_mut()) {
                obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(Value::Object(extra)) = data {
                for (key, value) in extra {
                    println!("  {}: {}", key, value);
                }
            }
        }
    }
    Ok(())
}
