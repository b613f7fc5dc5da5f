//! Frame Processing Benchmarks
//!
//! Measures the full per-frame path (validation, classification, resolution,
//! gating, smoothing, dispatch) for zero, one and two hands.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Instant;

use lamco_hand_pointer::config::Config;
use lamco_hand_pointer::engine::FrameController;
use lamco_hand_pointer::gesture::{HandObservation, Handedness, Landmark, LANDMARK_COUNT};
use lamco_hand_pointer::pointer::RecordingBackend;

/// Open hand (all four fingers straight) centered in a 1280x720 frame
fn open_hand(handedness: Handedness) -> HandObservation {
    let mut pixels = vec![Landmark::new(640.0, 360.0); LANDMARK_COUNT];
    pixels[0] = Landmark::new(640.0, 500.0);
    for finger in 0..4 {
        let x = 580.0 + finger as f64 * 40.0;
        let tip = 8 + finger * 4;
        pixels[tip - 2] = Landmark::new(x, 330.0);
        pixels[tip] = Landmark::new(x, 280.0);
    }
    HandObservation::from_pixels(handedness, &pixels, 1280, 720)
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");

    let frames = [
        (Vec::new(), "no_hands"),
        (vec![open_hand(Handedness::Right)], "one_hand"),
        (
            vec![open_hand(Handedness::Right), open_hand(Handedness::Left)],
            "two_hands",
        ),
    ];

    for (observations, name) in frames {
        let config = Config::default_config().to_engine_config().unwrap();
        let mut engine = FrameController::new(config).unwrap();
        let mut backend = RecordingBackend::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &observations,
            |b, observations| {
                b.iter(|| {
                    let report =
                        engine.process_frame(black_box(observations), Instant::now(), &mut backend);
                    backend.take();
                    report
                })
            },
        );
    }

    group.finish();
}

fn bench_to_pixels(c: &mut Criterion) {
    let observation = open_hand(Handedness::Right);
    c.bench_function("to_pixels", |b| b.iter(|| black_box(&observation).to_pixels()));
}

criterion_group!(benches, bench_process_frame, bench_to_pixels);
criterion_main!(benches);
