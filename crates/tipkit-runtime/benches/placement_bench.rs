//! Benchmarks for placement and the show/hide lifecycle.
//!
//! Run with: cargo bench -p tipkit-runtime

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use tipkit_core::{Placement, Rect, Side, Size, ViewportState, detect, resolve};
use tipkit_runtime::{
    HeadlessHost, HeadlessSurface, Registry, TargetId, TipContent, TipOptions, TipSurface, elastic,
    smart,
};

// =============================================================================
// Test Data
// =============================================================================

const ALL_SIDES: [Side; 8] = [
    Side::N,
    Side::E,
    Side::S,
    Side::W,
    Side::NW,
    Side::NE,
    Side::SW,
    Side::SE,
];

fn viewport() -> ViewportState {
    ViewportState::new(Size::new(1280.0, 800.0))
}

/// Anchor in the middle of the window: the first candidate always fits.
fn centered_anchor() -> Rect {
    Rect::new(600.0, 390.0, 80.0, 20.0)
}

/// Anchor in the top-right corner: most candidates collide.
fn cornered_anchor() -> Rect {
    Rect::new(1250.0, 2.0, 20.0, 16.0)
}

fn surface(elastic: bool) -> HeadlessSurface {
    let mut s = HeadlessSurface::new("tooltip", Size::new(240.0, 60.0)).elastic(elastic);
    s.set_content(TipContent::from("bench"));
    s
}

fn registry(targets: u64) -> Registry<HeadlessHost> {
    let mut host = HeadlessHost::new(Size::new(240.0, 60.0));
    for i in 0..targets {
        let col = (i % 10) as f64;
        let row = (i / 10) as f64;
        host.set_target(
            TargetId::new(i),
            Rect::new(40.0 + col * 120.0, 40.0 + row * 60.0, 80.0, 20.0),
        );
    }
    let mut reg = Registry::new(host, Size::new(1280.0, 800.0));
    for i in 0..targets {
        reg.register(TargetId::new(i), TipOptions::default(), TipContent::from("tip"))
            .expect("default options are valid");
    }
    reg
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let vp = viewport();
    let anchor = centered_anchor();
    let tip = Size::new(240.0, 60.0);

    c.bench_function("resolve/all_sides", |b| {
        b.iter(|| {
            for side in ALL_SIDES {
                black_box(resolve(&anchor, Placement::new(side), tip, 10.0, &vp));
                if let Some(alt) = Placement::alt(side) {
                    black_box(resolve(&anchor, alt, tip, 10.0, &vp));
                }
            }
        })
    });
}

fn bench_detect(c: &mut Criterion) {
    let vp = viewport();
    let tip = Size::new(240.0, 60.0);
    let coords: Vec<_> = ALL_SIDES
        .iter()
        .map(|&side| resolve(&cornered_anchor(), Placement::new(side), tip, 10.0, &vp))
        .collect();

    c.bench_function("collision/detect", |b| {
        b.iter(|| {
            for coord in &coords {
                black_box(detect(coord, tip, &vp));
            }
        })
    });
}

fn bench_smart_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("smart/select");
    let vp = viewport();

    for (name, anchor) in [("centered", centered_anchor()), ("cornered", cornered_anchor())] {
        for side in [Side::N, Side::E, Side::SE] {
            let placement = Placement::new(side);
            let id = format!("{name}/{placement}");
            group.bench_with_input(BenchmarkId::from_parameter(id), &anchor, |b, anchor| {
                let mut s = surface(false);
                b.iter(|| {
                    black_box(smart::select(
                        &mut s,
                        anchor,
                        placement.priority_list(),
                        placement,
                        Size::new(260.0, 120.0),
                        10.0,
                        &vp,
                    ))
                })
            });
        }
    }

    group.finish();
}

fn bench_elastic(c: &mut Criterion) {
    let mut group = c.benchmark_group("elastic/place");
    let vp = viewport();

    for (name, anchor) in [
        ("settled", centered_anchor()),
        ("wrapping", Rect::new(1180.0, 300.0, 40.0, 20.0)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &anchor, |b, anchor| {
            let mut s = surface(true);
            b.iter(|| {
                black_box(elastic::place(
                    &mut s,
                    anchor,
                    Placement::new(Side::SE),
                    Size::new(260.0, 120.0),
                    10.0,
                    &vp,
                ))
            })
        });
    }

    group.finish();
}

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    for targets in [1u64, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("show_hide", targets),
            &targets,
            |b, &targets| {
                let mut reg = registry(targets);
                let mut next = 0u64;
                b.iter(|| {
                    let t = TargetId::new(next % targets);
                    next += 1;
                    reg.show(t, None).expect("registered");
                    reg.hide(Some(t), true).expect("registered");
                    black_box(reg.next_deadline());
                })
            },
        );
    }

    group.bench_function("hover_handover", |b| {
        let mut reg = registry(2);
        let a = TargetId::new(0);
        let z = TargetId::new(1);
        b.iter(|| {
            reg.show(a, None).expect("registered");
            reg.show(z, None).expect("registered");
            reg.advance(Duration::from_millis(100));
            reg.hide(None, true).expect("untargeted hide");
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve,
    bench_detect,
    bench_smart_select,
    bench_elastic,
    bench_lifecycle,
);

criterion_main!(benches);
