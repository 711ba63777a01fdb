use anyhow::{Context, Result};
use dgn7_core::constants::SIGNATURE_V7;
use dgn7_core::decoder::validate_signature;
use dgn7_core::source::ByteSource;
use std::fs;
use tracing::info;

pub fn execute(input: &str) -> Result<()> {
    info!("Checking signature of: {}", input);

    let file = fs::File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input))?;
    let mut source = ByteSource::new(file);

    let sig = validate_signature(&mut source)
        .with_context(|| format!("Not a supported DGN v7 design file: {}", input))?;

    let variant = if sig == SIGNATURE_V7 {
        "little-endian variant"
    } else {
        "big-endian variant"
    };
    println!("OK: DGN v7 design file ({}, signature 0x{:08x})", variant, sig);

    Ok(())
}
