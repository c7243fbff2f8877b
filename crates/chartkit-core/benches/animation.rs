//! Benchmarks for per-frame animation sampling.

use chartkit_core::{stagger_delay, Easing, Keyframe, KeyframeTrack, Point, Rect, Transition};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_easing(c: &mut Criterion) {
    c.bench_function("easing_back_out", |b| {
        b.iter(|| Easing::BackOut.apply(black_box(0.37)));
    });
}

fn bench_bar_transitions(c: &mut Criterion) {
    let transitions: Vec<_> = (0..100)
        .map(|i| {
            let x = i as f32 * 8.0;
            Transition::new(
                Rect::new(x, 200.0, 6.0, 0.0),
                Rect::new(x, 200.0 - i as f32, 6.0, i as f32),
            )
            .with_delay(stagger_delay(i, 100))
        })
        .collect();

    c.bench_function("sample_100_bar_transitions", |b| {
        b.iter(|| {
            transitions
                .iter()
                .map(|t| t.value_at(black_box(0.2)))
                .collect::<Vec<_>>()
        });
    });
}

fn bench_path_morph(c: &mut Criterion) {
    let from: Vec<Point> = (0..200).map(|i| Point::new(i as f32, 0.0)).collect();
    let to: Vec<Point> = (0..200)
        .map(|i| Point::new(i as f32, (i as f32 * 0.1).sin() * 50.0))
        .collect();
    let tr = Transition::new(from, to);

    c.bench_function("morph_200_point_path", |b| {
        b.iter(|| tr.value_at(black_box(0.15)));
    });
}

fn bench_keyframe_track(c: &mut Criterion) {
    let mut track = KeyframeTrack::new(2.0).with_loop(true);
    for i in 0..=10 {
        track.add_keyframe(Keyframe::new(f64::from(i) / 10.0, f64::from(i % 3)));
    }

    c.bench_function("keyframe_track_11_frames", |b| {
        b.iter(|| track.value_at(black_box(3.3)));
    });
}

criterion_group!(
    benches,
    bench_easing,
    bench_bar_transitions,
    bench_path_morph,
    bench_keyframe_track
);
criterion_main!(benches);
