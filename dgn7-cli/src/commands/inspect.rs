use super::{OutputFormat, decode_file};
use anyhow::Result;
use serde_json::json;
use tracing::info;

pub fn execute(input: &str, format: OutputFormat) -> Result<()> {
    info!("Inspecting file: {}", input);

    let content = decode_file(input)?;

    match format {
        OutputFormat::Text => {
            println!("\n=== Design File ===");
            println!("Element types:   {}", content.types_summary());
            println!("Distinct types:  {}", content.element_types.len());
            println!("Text fragments:  {}", content.text_fragments.len());
        }
        OutputFormat::Json => {
            let summary = json!({
                "element_types": content.element_types,
                "distinct_types": content.element_types.len(),
                "text_fragments": content.text_fragments.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
