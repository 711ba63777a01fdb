pub mod check;
pub mod extract;
pub mod inspect;

use anyhow::{Context, Result};
use dgn7_core::DesignFileContent;
use dgn7_core::decoder::decode_stream_bounded;
use std::fs;
use std::io::BufReader;

/// Output format shared by inspect and extract
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// The full decoded content as JSON
    Json,
}

/// Decode a design file from disk, bounding the scan by the file length
pub(crate) fn decode_file(input: &str) -> Result<DesignFileContent> {
    let file = fs::File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input))?;
    let limit = file
        .metadata()
        .with_context(|| format!("Failed to stat input file: {}", input))?
        .len();

    let content = decode_stream_bounded(BufReader::new(file), Some(limit))
        .with_context(|| format!("Failed to decode design file: {}", input))?;

    Ok(content)
}
