//! Benchmarks for the per-frame work: simulation tick and rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamvis_rs::config::{BackgroundConfig, RenderConfig};
use streamvis_rs::render::{RecordingSurface, Renderer};
use streamvis_rs::simulation::{Simulation, ThreadRandom, Topology};
use streamvis_rs::types::Viewport;

const VIEWPORT: Viewport = Viewport::new(1920.0, 1080.0);

/// Simulation warmed up until `ticks` frames have passed
fn warmed_simulation(spawn_probability: f64, ticks: usize) -> (Simulation, ThreadRandom) {
    let mut config = BackgroundConfig::default();
    config.emitter.spawn_probability = spawn_probability;
    let mut sim = Simulation::new(config, VIEWPORT);
    let mut rng = ThreadRandom::seeded(42);
    for _ in 0..ticks {
        sim.tick(1.0, &mut rng);
    }
    (sim, rng)
}

fn bench_topology_build(c: &mut Criterion) {
    c.bench_function("topology_build", |b| {
        b.iter(|| Topology::build(black_box(VIEWPORT.width), black_box(VIEWPORT.height)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for probability in [0.15, 0.5, 1.0].iter() {
        let (mut sim, mut rng) = warmed_simulation(*probability, 2000);
        group.throughput(Throughput::Elements(sim.state().packets().len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(probability),
            probability,
            |b, _| b.iter(|| black_box(sim.tick(1.0, &mut rng))),
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    for probability in [0.15, 1.0].iter() {
        let (sim, mut rng) = warmed_simulation(*probability, 2000);
        let renderer = Renderer::new(RenderConfig::default());
        let mut surface = RecordingSurface::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(probability),
            probability,
            |b, _| {
                b.iter(|| {
                    surface.reset();
                    renderer.render(&mut surface, sim.state(), &mut rng);
                    black_box(surface.commands().len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_topology_build, bench_tick, bench_render);
criterion_main!(benches);
