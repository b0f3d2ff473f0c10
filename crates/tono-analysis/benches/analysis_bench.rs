//! Criterion benchmarks for tono-analysis components
//!
//! Run with: cargo bench -p tono-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f32::consts::PI;
use tono_analysis::{Algorithm, Dft, MfccConfig, mfcc, resample};

const SAMPLE_RATE: u32 = 16000;

/// Generate a test sine wave
fn generate_sine(size: usize, frequency: f32) -> Vec<f32> {
    (0..size)
        .map(|i| (2.0 * PI * frequency * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

fn bench_dft_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("DFT_Forward");

    // Mixed power-of-two and awkward sizes; the latter take the
    // mixed-radix/Bluestein paths.
    let sizes = [256usize, 640, 1000, 1024, 4096];
    for size in sizes {
        let signal = generate_sine(size, 440.0);
        let dft = Dft::new(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(dft.forward(&signal)));
        });
    }
    group.finish();
}

fn bench_pitch_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pitch_Window");

    let window = generate_sine(800, 220.0); // 50 ms at 16 kHz
    for algorithm in [Algorithm::Autocorrelation, Algorithm::Yin, Algorithm::Mpm] {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm.name()),
            &algorithm,
            |b, algorithm| {
                b.iter(|| black_box(algorithm.estimate(&window, SAMPLE_RATE).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample");
    group.sample_size(20);

    let signal = generate_sine(16000, 440.0);
    group.bench_function("16k_to_8k", |b| {
        b.iter(|| black_box(resample(&signal, 16000, 8000).unwrap()));
    });
    group.bench_function("16k_to_44k1", |b| {
        b.iter(|| black_box(resample(&signal, 16000, 44100).unwrap()));
    });
    group.finish();
}

fn bench_mfcc(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mfcc");
    group.sample_size(20);

    let signal = generate_sine(16000, 440.0);
    let config = MfccConfig::default();
    group.bench_function("one_second_16k", |b| {
        b.iter(|| black_box(mfcc(&signal, SAMPLE_RATE, &config).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_dft_forward,
    bench_pitch_algorithms,
    bench_resample,
    bench_mfcc
);
criterion_main!(benches);
