//! Walk a synthetic stream and show how the type inventory collapses
//! repeated element types

use bytes::Bytes;
use dgn7_core::decoder::decode_from_bytes;
use dgn7_core::encoder::{DesignFileBuilder, ElementBuilder};

fn main() {
    let mut builder = DesignFileBuilder::new();
    // Many lines and arcs, one cell header
    for i in 0u8..50 {
        builder = builder.element(
            ElementBuilder::new(if i % 2 == 0 { 3 } else { 16 })
                .level(i % 63)
                .payload(Bytes::from(vec![0u8; 16]))
                .build()
                .unwrap(),
        );
    }
    builder = builder.element(ElementBuilder::new(2).complex().build().unwrap());

    let content = decode_from_bytes(&builder.finish()).unwrap();
    println!("52 elements decoded (file header included)");
    println!("Distinct types: {}", content.types_summary());
}
