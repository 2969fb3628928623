//! Benchmarks for the ImageChef effect pipeline.
//!
//! Run with: cargo bench -p imagechef-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use imagechef_core::pipeline::dither::riemersma_dither;
use imagechef_core::pipeline::effects::{blur, pixelate, rotate};
use imagechef_core::{apply_effects, Dimensions, JobParams};

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 96])
    }))
}

fn benchmark_dither(c: &mut Criterion) {
    let img = gradient(256, 256);

    c.bench_function("dither_256px_16_colors", |b| {
        b.iter(|| riemersma_dither(black_box(&img), 16))
    });
}

fn benchmark_pixelate(c: &mut Criterion) {
    let img = gradient(1920, 1080);

    c.bench_function("pixelate_1080p_factor_8", |b| {
        b.iter(|| pixelate(black_box(&img), 8))
    });
}

fn benchmark_rotate(c: &mut Criterion) {
    let img = gradient(512, 512);

    c.bench_function("rotate_512px_90", |b| b.iter(|| rotate(black_box(&img), 90.0)));
    c.bench_function("rotate_512px_30", |b| b.iter(|| rotate(black_box(&img), 30.0)));
}

fn benchmark_blur(c: &mut Criterion) {
    let img = gradient(512, 512);

    c.bench_function("blur_512px_sigma_3", |b| {
        b.iter(|| blur(black_box(img.clone()), 3.0))
    });
}

fn benchmark_full_chain(c: &mut Criterion) {
    let img = gradient(512, 512);
    let params = JobParams {
        dither: Some(32),
        pixelate: Some(4),
        resize: Some(Dimensions::new(256, 256)),
        rotate: Some(15.0),
        blur: Some(1.0),
        mirror: true,
    };

    c.bench_function("full_chain_512px", |b| {
        b.iter(|| apply_effects(black_box(img.clone()), &params))
    });
}

criterion_group!(
    benches,
    benchmark_dither,
    benchmark_pixelate,
    benchmark_rotate,
    benchmark_blur,
    benchmark_full_chain,
);
criterion_main!(benches);
