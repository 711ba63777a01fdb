//! Decoding benchmarks over synthetic design files

use bytes::Bytes;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dgn7_core::decoder::decode_from_bytes;
use dgn7_core::encoder::{DesignFileBuilder, ElementBuilder, text_element};

fn build_stream(elements: usize, payload_size: usize) -> Bytes {
    let mut builder = DesignFileBuilder::new();
    for i in 0..elements {
        let element = if i % 10 == 0 {
            text_element(format!("NOTE {i} ON SHEET").as_bytes()).unwrap()
        } else {
            ElementBuilder::new((i % 14 + 2) as u8)
                .payload(Bytes::from(vec![0x5au8; payload_size]))
                .build()
                .unwrap()
        };
        builder = builder.element(element);
    }
    builder.finish()
}

fn bench_decode(c: &mut Criterion) {
    let small = build_stream(100, 32);
    let large = build_stream(1000, 512);

    c.bench_function("decode_100_elements", |b| {
        b.iter(|| decode_from_bytes(black_box(&small)).unwrap())
    });

    c.bench_function("decode_1000_elements", |b| {
        b.iter(|| decode_from_bytes(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
