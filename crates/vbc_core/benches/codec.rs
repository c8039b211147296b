//! Criterion benchmarks for the vertex text codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vbc_core::{
    ElementCatalog, ElementDescriptor, NumericFormat, VertexLayout, VertexParser, VertexWriter,
    WriteOptions,
};

const RECORDS: usize = 10_000;

fn bench_layout() -> VertexLayout {
    let catalog = ElementCatalog::default();
    let schema = [
        ElementDescriptor::new("Position", "Float3"),
        ElementDescriptor::new("Normals", "Dec3N"),
        ElementDescriptor::new("Color0", "Color"),
        ElementDescriptor::new("Texcoords0", "Half2"),
    ];
    VertexLayout::compute(&schema, &catalog).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let layout = bench_layout();
    let line = "0.25 -1.5 3.0    0.577 0.577 -0.577    255 128 0 255    0.5 1.0\r\n";
    let text = line.repeat(RECORDS);
    let mut buffer = vec![0u8; layout.stride() * RECORDS];
    let parser = VertexParser::new(&layout);

    c.bench_function("parse_10k_vertices", |b| {
        b.iter(|| parser.parse(black_box(&mut buffer), black_box(&text)).unwrap())
    });
}

fn bench_write(c: &mut Criterion) {
    let layout = bench_layout();
    let line = "0.25 -1.5 3.0    0.577 0.577 -0.577    255 128 0 255    0.5 1.0\r\n";
    let text = line.repeat(RECORDS);
    let mut buffer = vec![0u8; layout.stride() * RECORDS];
    VertexParser::new(&layout).parse(&mut buffer, &text).unwrap();

    let fixed = VertexWriter::new(&layout);
    c.bench_function("write_10k_vertices_fixed", |b| {
        b.iter(|| fixed.write_to_string(black_box(&buffer)).unwrap())
    });

    let roundtrip = VertexWriter::with_options(
        &layout,
        WriteOptions {
            numeric_format: NumericFormat::RoundTrip,
            ..WriteOptions::default()
        },
    );
    c.bench_function("write_10k_vertices_roundtrip", |b| {
        b.iter(|| roundtrip.write_to_string(black_box(&buffer)).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_write);
criterion_main!(benches);
