//! Performance benchmarks for the vocoder pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vocode_dsp::{vocode, VocoderConfig};

fn bench_vocode(c: &mut Criterion) {
    // Synthetic voice stand-in: 1 second of a 440 Hz tone at 44.1kHz.
    let modulator: Vec<f32> = (0..44100)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect();

    let config = VocoderConfig::default();

    c.bench_function("vocode_1s_20_bands", |b| {
        b.iter(|| {
            let _ = vocode(black_box(&modulator), black_box(&config));
        });
    });

    let wide = VocoderConfig { num_bands: 1, ..VocoderConfig::default() };
    c.bench_function("vocode_1s_1_band", |b| {
        b.iter(|| {
            let _ = vocode(black_box(&modulator), black_box(&wide));
        });
    });
}

criterion_group!(benches, bench_vocode);
criterion_main!(benches);
