//! Benchmarks du pipeline tuiles → caractères.
//!
//! Run with: cargo bench -p aa-ascii

use std::sync::Arc;

use aa_ascii::{AsciiArt, BrightnessCache, CharMatcher, ImageTiler};
use aa_core::charset::printable_ascii;
use aa_core::frame::Image;
use aa_glyph::BuiltinGlyphs;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn gradient(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        let v = ((x ^ y) & 0xFF) as u8;
        (v, v.wrapping_mul(3), 255 - v)
    })
}

fn bench_tiler(c: &mut Criterion) {
    let image = gradient(640, 480);
    let mut group = c.benchmark_group("tiler");
    for resolution in [32, 128, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(resolution), &resolution, |b, &r| {
            b.iter(|| ImageTiler::new(black_box(&image), r));
        });
    }
    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let glyphs = Arc::new(BuiltinGlyphs::default());

    c.bench_function("refresh_partial", |b| {
        let cache = BrightnessCache::new();
        let mut matcher = CharMatcher::new(printable_ascii(), glyphs.clone(), cache.clone());
        b.iter(|| {
            cache.clear();
            matcher.remove_char('m');
            matcher.add_char('m');
            black_box(matcher.initialize_brightness_map())
        });
    });

    c.bench_function("refresh_full", |b| {
        let cache = BrightnessCache::new();
        let mut matcher = CharMatcher::new(printable_ascii(), glyphs.clone(), cache.clone());
        b.iter(|| {
            cache.clear();
            matcher.remove_char(' ');
            matcher.add_char(' ');
            black_box(matcher.initialize_brightness_map())
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let image = gradient(640, 480);
    let tiler = ImageTiler::new(&image, 256).unwrap();
    let mut matcher = CharMatcher::new(
        printable_ascii(),
        Arc::new(BuiltinGlyphs::default()),
        BrightnessCache::new(),
    );
    c.bench_function("ascii_art_256_cols", |b| {
        b.iter(|| AsciiArt::new(&mut matcher, black_box(&tiler)).run());
    });
}

criterion_group!(benches, bench_tiler, bench_refresh, bench_render);
criterion_main!(benches);
