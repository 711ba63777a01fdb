//! Build a small synthetic design file and extract its text

use bytes::Bytes;
use dgn7_core::decoder::decode_from_bytes;
use dgn7_core::encoder::{DesignFileBuilder, ElementBuilder, text_element};

fn main() {
    let stream = DesignFileBuilder::new()
        .element(ElementBuilder::new(3).payload(Bytes::from(vec![0u8; 24])).build().unwrap())
        .element(text_element(b"GENERAL ARRANGEMENT").unwrap())
        .element(text_element(b"SCALE 1:50\x00\x07").unwrap())
        .finish();

    println!("Stream size: {} bytes", stream.len());

    let content = decode_from_bytes(&stream).unwrap();
    println!("Element types: {}", content.types_summary());
    println!("--- extracted text ---");
    println!("{}", content.joined_text("\n"));
}
