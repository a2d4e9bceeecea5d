//! Example: driving a tiny orbital simulation through the ECS
//!
//! Registers instantiators for two components, spawns a few bodies, and
//! advances them with an integration system dispatched over a "tick" bus.

use std::any::Any;

use orrery_ecs::prelude::*;

#[derive(Debug, Clone)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone)]
struct Velocity {
    x: f64,
    y: f64,
}

struct Tick {
    dt: f64,
}

fn main() {
    let mut world = World::new();
    world.register_instantiator("position", |_, init| Ok(init.clone()));
    world.register_instantiator("velocity", |_, init| Ok(init.clone()));
    world.create_event_bus("tick");

    println!("Creating bodies...");

    for (name, x, vy) in [("mercury", 0.39, 1.59), ("venus", 0.72, 1.18), ("earth", 1.0, 1.0)] {
        let body = EntityBuilder::new()
            .with_component("position", component_value(Position { x, y: 0.0 }))
            .with_component("velocity", component_value(Velocity { x: 0.0, y: vy }))
            .build(&mut world)
            .expect("body should be created");
        println!("  {name} is entity {}", body.to_raw());
    }

    world
        .add_system()
        .name("integrate")
        .query_components(["position", "velocity"])
        .bindings(["position", "velocity"])
        .callback(|ctx: &mut dyn Any, comps: &[ComponentSlot]| {
            let dt = ctx.downcast_ref::<Tick>().map_or(0.0, |tick| tick.dt);
            let position = comps[0].clone().expect("position bound");
            let velocity = comps[1].clone().expect("velocity bound");

            let (vx, vy) = {
                let v = velocity.borrow();
                let v = v.downcast_ref::<Velocity>().expect("velocity type");
                (v.x, v.y)
            };

            let mut p = position.borrow_mut();
            let p = p.downcast_mut::<Position>().expect("position type");
            p.x += vx * dt;
            p.y += vy * dt;
        })
        .subscribe_to_bus("tick")
        .build()
        .expect("integration system");

    println!("Advancing ten ticks...");
    for _ in 0..10 {
        let mut tick = Tick { dt: 0.1 };
        world
            .bus("tick")
            .expect("tick bus")
            .dispatch(&world, &mut tick);
    }

    for raw in 0..3u64 {
        let entity = EntityId::from_raw(raw);
        let position = world
            .component_for(entity, TypeId::of("position"))
            .expect("body has a position")
            .expect("position populated");
        let p = position.borrow();
        let p = p.downcast_ref::<Position>().expect("position type");
        println!("  entity {raw} at ({:.2}, {:.2})", p.x, p.y);
    }
}
