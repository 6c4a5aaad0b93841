//! Benchmark comparing sequential and parallel SRS sweeps.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sdof_core::{SweepParams, generate_frequencies};
use sdof_shock::{ParallelSweepConfig, PulseKind, ShockPulse, SrsConfig, compute_srs};

fn bench_srs_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("srs_sweep");
    group.sample_size(20);

    let pulse = ShockPulse::new(PulseKind::HalfSine, 0.011, 100.0, 1.0e-5).unwrap();
    let record = pulse.generate();

    for points in [16, 64, 256] {
        let freqs = generate_frequencies(&SweepParams::logarithmic(10.0, 5_000.0, points)).unwrap();

        let sequential = SrsConfig::default().with_parallel(ParallelSweepConfig::sequential());
        group.bench_with_input(
            BenchmarkId::new("sequential", points),
            &freqs,
            |bencher, freqs| {
                bencher.iter(|| {
                    compute_srs(black_box(&record.acceleration), 1.0e-5, freqs, &sequential)
                        .unwrap()
                });
            },
        );

        let parallel = SrsConfig::default();
        group.bench_with_input(BenchmarkId::new("parallel", points), &freqs, |bencher, freqs| {
            bencher.iter(|| {
                compute_srs(black_box(&record.acceleration), 1.0e-5, freqs, &parallel).unwrap()
            });
        });

        let chunked = SrsConfig::default()
            .with_parallel(ParallelSweepConfig::default().with_chunk_size(8));
        group.bench_with_input(BenchmarkId::new("chunked", points), &freqs, |bencher, freqs| {
            bencher.iter(|| {
                compute_srs(black_box(&record.acceleration), 1.0e-5, freqs, &chunked).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_pulse_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pulse_generation");

    for kind in [PulseKind::HalfSine, PulseKind::Trapezoidal] {
        let pulse = ShockPulse::new(kind, 0.011, 100.0, 1.0e-6).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(kind), &pulse, |bencher, pulse| {
            bencher.iter(|| black_box(pulse).generate());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_srs_sweep, bench_pulse_generation);
criterion_main!(benches);
