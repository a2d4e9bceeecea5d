use std::any::Any;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use orrery_ecs::prelude::*;

#[derive(Debug)]
#[allow(dead_code)]
struct Position(f64, f64, f64);

#[derive(Debug)]
#[allow(dead_code)]
struct Velocity(f64, f64, f64);

fn seeded_world(entities: usize) -> World {
    let mut world = World::new();
    world.register_instantiator("position", |_, init| Ok(init.clone()));
    world.register_instantiator("velocity", |_, init| Ok(init.clone()));
    world.create_event_bus("tick");

    for i in 0..entities {
        EntityBuilder::new()
            .with_component("position", component_value(Position(i as f64, 0.0, 0.0)))
            .with_component("velocity", component_value(Velocity(1.0, 0.0, 0.0)))
            .build(&mut world)
            .expect("seed entity");
    }

    world
}

fn add_entity_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_entity");

    group.bench_function("add_entity_2_components", |b| {
        b.iter_batched(
            World::new,
            |mut world| {
                for i in 0..10_000 {
                    EntityBuilder::new()
                        .with_component("position", component_value(Position(i as f64, 0.0, 0.0)))
                        .with_component("velocity", component_value(Velocity(1.0, 0.0, 0.0)))
                        .build(&mut world)
                        .expect("bench entity");
                }
                world
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("tick_10k_rows", |b| {
        let mut world = seeded_world(10_000);

        world
            .add_system()
            .name("integrate")
            .query_components(["position", "velocity"])
            .bindings(["position", "velocity"])
            .callback(|_ctx: &mut dyn Any, comps: &[ComponentSlot]| {
                let position = comps[0].clone().expect("position bound");
                let velocity = comps[1].clone().expect("velocity bound");
                let step = velocity.borrow().downcast_ref::<Velocity>().expect("velocity type").0;
                position
                    .borrow_mut()
                    .downcast_mut::<Position>()
                    .expect("position type")
                    .0 += step;
            })
            .subscribe_to_bus("tick")
            .build()
            .expect("bench system");

        b.iter(|| {
            let mut params = 0u32;
            world
                .bus("tick")
                .expect("tick bus")
                .dispatch(&world, &mut params);
        });
    });

    group.finish();
}

criterion_group!(benches, add_entity_benchmark, dispatch_benchmark);
criterion_main!(benches);
