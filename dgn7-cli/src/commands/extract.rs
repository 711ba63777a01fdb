use super::{OutputFormat, decode_file};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use tracing::info;

/// JSON-friendly view of the decoded content
#[derive(Serialize)]
struct ExtractedContent {
    element_types: Vec<u8>,
    text_fragments: Vec<String>,
}

pub fn execute(
    input: &str,
    output: Option<&str>,
    separator: &str,
    format: OutputFormat,
) -> Result<()> {
    info!("Extracting text from: {}", input);

    let content = decode_file(input)?;

    let rendered = match format {
        OutputFormat::Text => content.joined_text(separator),
        OutputFormat::Json => {
            let view = ExtractedContent {
                element_types: content.element_types.iter().copied().collect(),
                text_fragments: content.text_fragments,
            };
            serde_json::to_string_pretty(&view)
                .with_context(|| "Failed to serialize decoded content")?
        }
    };

    if let Some(output_path) = output {
        fs::write(output_path, rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Extracted content written to: {}", output_path);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
