//! # ECS Runtime Benchmark
//!
//! Covers the hot paths of a tick:
//! - Name lookup, hit and miss
//! - Filtering by component names
//! - A full tick over a populated entity manager
//!
//! Run with: `cargo bench --package hearth_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hearth_core::{Component, Engine, EntityManager, Signal, System, SystemManager};

struct Position {
    x: f32,
    y: f32,
}

impl Component for Position {
    fn name(&self) -> &str {
        "position"
    }
}

struct Velocity {
    dx: f32,
    dy: f32,
}

impl Component for Velocity {
    fn name(&self) -> &str {
        "velocity"
    }
}

/// Moves every entity carrying both a position and a velocity.
struct Movement;

impl System for Movement {
    fn name(&self) -> &str {
        "movement"
    }

    fn process(&mut self, entities: &mut EntityManager) -> Signal {
        for entity in entities.entities_mut() {
            let Ok(Some(&Velocity { dx, dy })) = entity.get_as::<Velocity>("velocity") else {
                continue;
            };
            if let Ok(Some(pos)) = entity.get_as_mut::<Position>("position") {
                pos.x += dx;
                pos.y += dy;
            }
        }
        Signal::Continue
    }
}

/// Every other entity moves; the rest only have a position.
fn populated(count: usize) -> EntityManager {
    let mut entities = EntityManager::with_capacity(count);
    for i in 0..count {
        let entity = entities.new_entity(format!("entity-{i}"));
        entity.with(Position { x: 0.0, y: 0.0 });
        if i % 2 == 0 {
            entity.with(Velocity { dx: 1.0, dy: 0.5 });
        }
    }
    entities
}

/// Benchmark: Name lookup against a single entity.
fn bench_get_single(c: &mut Criterion) {
    let mut entities = EntityManager::new();
    entities.new_entity("player");

    c.bench_function("get_by_name_1_entity", |b| {
        b.iter(|| black_box(entities.get(black_box("player")).is_some()));
    });
}

/// Benchmark: Name lookup that misses after scanning 1000 entities.
fn bench_get_miss(c: &mut Criterion) {
    let entities = populated(1000);

    c.bench_function("get_by_name_1000_entities_miss", |b| {
        b.iter(|| black_box(entities.get(black_box("nobody")).is_none()));
    });
}

/// Benchmark: Id lookup, the binary search path.
fn bench_get_by_id(c: &mut Criterion) {
    let entities = populated(1000);
    let id = entities.entities()[700].id();

    c.bench_function("get_by_id_1000_entities", |b| {
        b.iter(|| black_box(entities.get_by_id(black_box(id)).is_some()));
    });
}

/// Benchmark: Filtering by component names at growing sizes.
fn bench_filter_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by");

    for count in [100, 1_000, 10_000] {
        let entities = populated(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(entities.filter_by(&["position", "velocity"]).len()));
        });
    }

    group.finish();
}

/// Benchmark: One engine tick with a single movement system.
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [1_000, 10_000] {
        let mut systems = SystemManager::new();
        systems.with(Movement);
        let mut engine = Engine::new(populated(count), systems);
        if engine.setup().is_err() {
            continue;
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(engine.tick().map(|outcome| outcome.processed)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get_single,
    bench_get_miss,
    bench_get_by_id,
    bench_filter_by,
    bench_tick,
);

criterion_main!(benches);
