// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the per-event hot paths.
//!
//! Measures:
//! - A full tap / double-tap / long-press cycle through the classifier
//! - One rewind frame on a playing slide

use criterion::{criterion_group, criterion_main, Criterion};
use riceswipe::domain::gesture::{Point, PointerId};
use riceswipe::player::{GestureClassifier, GestureThresholds, RewindSimulator, SimulatedMedia};
use riceswipe::domain::video::RewindSpeed;
use std::hint::black_box;
use std::time::{Duration, Instant};

const ID: PointerId = PointerId(1);

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_classifier");
    let origin = Instant::now();
    let at = |ms: u64| origin + Duration::from_millis(ms);

    group.bench_function("double_tap", |b| {
        b.iter(|| {
            let mut g = GestureClassifier::new(GestureThresholds::default());
            g.pointer_down(ID, Point::new(50.0, 50.0), at(0));
            g.pointer_up(ID, Point::new(50.0, 50.0), at(40));
            black_box(g.pointer_down(ID, Point::new(54.0, 52.0), at(100)));
            black_box(g.pointer_up(ID, Point::new(54.0, 52.0), at(140)));
        });
    });

    group.bench_function("long_press_drag", |b| {
        b.iter(|| {
            let mut g = GestureClassifier::new(GestureThresholds::default());
            g.pointer_down(ID, Point::new(200.0, 400.0), at(0));
            black_box(g.tick(at(300)));
            for step in 0..32 {
                let x = 200.0 + if step % 2 == 0 { -40.0 } else { 40.0 };
                black_box(g.pointer_move(ID, Point::new(x, 400.0)));
            }
            black_box(g.pointer_up(ID, Point::new(200.0, 400.0), at(900)));
        });
    });

    group.finish();
}

fn bench_rewind_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewind");
    let origin = Instant::now();

    group.bench_function("on_frame", |b| {
        let mut media = SimulatedMedia::new(3_600.0).with_position(3_000.0);
        let mut rewind = RewindSimulator::new(RewindSpeed::default());
        rewind.start(&mut media, origin);
        let mut frame = 0u64;
        b.iter(|| {
            frame = (frame + 1) % 10_000;
            black_box(rewind.on_frame(&mut media, origin + Duration::from_millis(frame * 16)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_classifier, bench_rewind_frame);
criterion_main!(benches);
