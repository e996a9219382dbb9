//! Performance benchmarks for the DSP module
//!
//! Run with: cargo bench -p heron_dsp

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use heron_dsp::{DspConfig, DspPipeline, EqualizerBank};

fn sine_pcm_block(frames: usize) -> Vec<u8> {
    let mut block = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let x = ((i as f32 * 0.14).sin() * 16000.0) as i16;
        block.extend_from_slice(&x.to_le_bytes());
        block.extend_from_slice(&x.to_le_bytes());
    }
    block
}

fn benchmark_block_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    // Common A2DP/I2S block sizes (stereo frames)
    let block_frames = [64, 128, 256, 512, 1024, 2048];

    for frames in block_frames {
        group.throughput(Throughput::Elements(frames as u64));

        group.bench_function(format!("process_{}_frames", frames), |b| {
            let mut pipeline = DspPipeline::new();
            pipeline.init(44100).unwrap();
            let mut config = DspConfig::default();
            config.set_band_gains(6.0, -2.0, 3.0);
            config.set_volume_percent(75);
            let block = sine_pcm_block(frames);

            b.iter(|| {
                pipeline.process(black_box(&block), black_box(&config)).unwrap();
            });
        });

        group.bench_function(format!("process_bypassed_{}_frames", frames), |b| {
            let mut pipeline = DspPipeline::new();
            pipeline.init(44100).unwrap();
            let mut config = DspConfig::default();
            config.enabled = false;
            let block = sine_pcm_block(frames);

            b.iter(|| {
                pipeline.process(black_box(&block), black_box(&config)).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_stereo_sample(c: &mut Criterion) {
    c.bench_function("bank_process_stereo_sample", |b| {
        let mut bank = EqualizerBank::new(44100);

        b.iter(|| {
            black_box(bank.process_stereo_sample(
                black_box(0.5),
                black_box(-0.5),
                1.0,
                1.0,
                1.0,
            ));
        });
    });
}

fn benchmark_reconfiguration(c: &mut Criterion) {
    c.bench_function("bank_configure", |b| {
        let mut bank = EqualizerBank::new(44100);
        let mut rate = 44100;

        b.iter(|| {
            // Simulate a stream renegotiating its sample rate
            rate = if rate == 44100 { 48000 } else { 44100 };
            bank.configure(black_box(rate));
        });
    });
}

criterion_group!(
    benches,
    benchmark_block_processing,
    benchmark_stereo_sample,
    benchmark_reconfiguration
);

criterion_main!(benches);
