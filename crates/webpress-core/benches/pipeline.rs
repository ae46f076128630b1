//! Benchmarks for the webpress conversion pipeline.
//!
//! Run with: cargo bench -p webpress-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;
use webpress_core::pipeline::{Fingerprint, Quality, Transcoder};

fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(1024, 768, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn sample_png() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    sample_image()
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encode sample png");
    buffer.into_inner()
}

fn benchmark_fingerprint(c: &mut Criterion) {
    let bytes = sample_png();

    c.bench_function("fingerprint_blake3", |b| {
        b.iter(|| Fingerprint::from_bytes(black_box(&bytes)))
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = sample_png();

    c.bench_function("decode_png", |b| {
        b.iter(|| {
            let _ = Transcoder::decode_sync(black_box(bytes.clone()), Path::new("bench.png"));
        })
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let img = sample_image();
    let quality = Quality::default();

    c.bench_function("encode_webp_q90", |b| {
        b.iter(|| {
            let _ = Transcoder::encode_sync(black_box(&img), quality, Path::new("bench.png"));
        })
    });
}

criterion_group!(
    benches,
    benchmark_fingerprint,
    benchmark_decode,
    benchmark_encode,
);
criterion_main!(benches);
