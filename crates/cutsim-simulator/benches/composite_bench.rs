//! Compositing throughput over a synthetic spiral path

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cutsim_core::CutterProfile;
use cutsim_simulator::{Heightfield, PathGeometryBuilder, PathPoint, PathTimeline, Rasterizer};

fn spiral_points(count: usize) -> Vec<PathPoint> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let angle = t * 20.0 * std::f32::consts::PI;
            let radius = 2.0 + 8.0 * t;
            PathPoint::new(
                radius * angle.cos(),
                radius * angle.sin(),
                -1.0 - t,
                600.0,
            )
        })
        .collect()
}

fn bench_composite(c: &mut Criterion) {
    let points = spiral_points(400);
    let timeline = PathTimeline::from_points(&points);

    let flat = PathGeometryBuilder::new(CutterProfile::flat(0.5, 5.0), 0.0, 5).build(&timeline);
    let conical =
        PathGeometryBuilder::new(CutterProfile::conical(1.0, 60.0), 0.0, 5).build(&timeline);

    let mut rasterizer = Rasterizer::new(256, 2 * 1024 * 1024).expect("rasterizer");
    let mut field = Heightfield::new(256);

    c.bench_function("composite_flat_400", |b| {
        b.iter(|| {
            rasterizer.composite(
                black_box(&flat),
                black_box(&timeline),
                f32::INFINITY,
                &mut field,
            );
        })
    });

    c.bench_function("composite_conical_400", |b| {
        b.iter(|| {
            rasterizer.composite(
                black_box(&conical),
                black_box(&timeline),
                f32::INFINITY,
                &mut field,
            );
        })
    });

    c.bench_function("composite_flat_scrub_half", |b| {
        let half = timeline.total_time() / 2.0;
        b.iter(|| {
            rasterizer.composite(black_box(&flat), black_box(&timeline), half, &mut field);
        })
    });
}

criterion_group!(benches, bench_composite);
criterion_main!(benches);
