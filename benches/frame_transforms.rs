use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skyframe::catalog::{build_stars, StarRecord};
use skyframe::frame_params::FrameParams;
use skyframe::magnitude::MagnitudeScaler;
use skyframe::observation_frame::ObservationFrame;
use skyframe::ref_system::to_direction;

/// Random catalog in the Yale Bright Star text format.
fn random_catalog(rng: &mut StdRng, n: usize) -> Vec<StarRecord> {
    (0..n)
        .map(|i| {
            let dec_sign = if rng.random_bool(0.5) { '+' } else { '-' };
            StarRecord {
                ra: format!(
                    "{:02}h {:02}m {:04.1}s",
                    rng.random_range(0..24),
                    rng.random_range(0..60),
                    rng.random_range(0.0..59.9)
                ),
                dec: format!(
                    "{dec_sign}{:02}° {:02}′ {:02}″",
                    rng.random_range(0..90),
                    rng.random_range(0..60),
                    rng.random_range(0..60)
                ),
                vmag: rng.random_range(-1.5..6.5),
                name: None,
                hr: Some(i as u32 + 1),
            }
        })
        .collect()
}

fn bench_catalog(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let catalog = random_catalog(&mut rng, 9_110);
    let scaler = MagnitudeScaler::default();

    c.bench_function("build_stars/9110", |b| {
        b.iter(|| build_stars(black_box(&catalog), &scaler).unwrap())
    });
}

fn bench_directions(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("to_direction/10k", |b| {
        b.iter_batched(
            || {
                (0..10_000)
                    .map(|_| (rng.random_range(0.0..360.0), rng.random_range(-90.0..=90.0)))
                    .collect::<Vec<(f64, f64)>>()
            },
            |cases| {
                for (ra, dec) in cases {
                    black_box(to_direction(ra, dec).unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_frame_updates(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let catalog = random_catalog(&mut rng, 9_110);
    let mut frame = ObservationFrame::new(FrameParams::default(), 1_710_903_960.0, &catalog).unwrap();

    c.bench_function("set_instant", |b| {
        let mut t = 1_710_903_960.0;
        b.iter(|| {
            t += 60.0;
            frame.set_instant(black_box(t)).unwrap();
        })
    });

    c.bench_function("to_world/catalog", |b| {
        b.iter(|| {
            frame
                .stars()
                .iter()
                .map(|s| frame.to_world(&s.direction).y)
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_catalog, bench_directions, bench_frame_updates);
criterion_main!(benches);
