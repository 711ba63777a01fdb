//! Fuzzing placeholder for the dgn7-core decoder
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder

pub fn fuzz_decode(data: &[u8]) {
    use dgn7_core::decoder::decode_from_bytes;

    // Try to decode - should never panic
    let _ = decode_from_bytes(data);
}
