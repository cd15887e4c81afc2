use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use ndarray::Array2;
use rand::Rng;
use rf_signal_analyzer::{extract_frequency_band_params, SpectrogramImage};

/// Noise floor with a bright band in the middle third
fn create_test_spectrogram(width: u32, height: u32) -> RgbImage {
    let mut rng = rand::thread_rng();
    let mut image = RgbImage::new(width, height);

    for (x, _y, pixel) in image.enumerate_pixels_mut() {
        let in_band = x >= width / 3 && x < 2 * width / 3;
        let level: u8 = if in_band {
            rng.gen_range(160..255)
        } else {
            rng.gen_range(0..40)
        };
        *pixel = Rgb([level, level / 2, 255 - level]);
    }

    image
}

fn bench_band_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("band_extraction");

    for size in [128u32, 512, 1024] {
        let image = SpectrogramImage::from_rgb(create_test_spectrogram(size, size));
        let grid: Array2<f32> = image.to_intensity_grid();
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("extract", size), &grid, |b, grid| {
            b.iter(|| extract_frequency_band_params(black_box(grid.view()), 0.3))
        });

        group.bench_with_input(BenchmarkId::new("grayscale", size), &image, |b, image| {
            b.iter(|| black_box(image).to_intensity_grid())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_band_extraction);
criterion_main!(benches);
