use orrery_ecs::prelude::*;

#[derive(Debug, PartialEq)]
struct Pos {
    x: f64,
}

#[derive(Debug, PartialEq)]
struct Vel {
    x: f64,
}

#[test]
fn entity_ids_increase_from_zero_in_call_order() {
    let mut world = World::new();

    for expected in 0..4u64 {
        let id = EntityBuilder::new()
            .with_component("pos", component_value(Pos { x: 0.0 }))
            .build(&mut world)
            .expect("entity should be created");
        assert_eq!(id.to_raw(), expected);
    }

    assert_eq!(world.entity_count(), 4);
}

#[test]
fn duplicate_entity_id_is_refused_without_mutation() {
    let mut world = World::new();

    let id = world.next_entity_id();
    world
        .add_entity(
            id,
            vec![ComponentDescriptor::new("pos", component_value(Pos { x: 1.0 }))],
        )
        .expect("first add succeeds");

    let entities_before = world.entity_count();
    let archetypes_before = world.archetype_count();

    let err = world
        .add_entity(
            id,
            vec![ComponentDescriptor::new("vel", component_value(Vel { x: 2.0 }))],
        )
        .expect_err("second add with the same id must fail");
    assert!(matches!(err, EcsError::DuplicateEntity(_)));

    assert_eq!(world.entity_count(), entities_before);
    assert_eq!(world.archetype_count(), archetypes_before);

    let pos = world
        .component_for(id, TypeId::of("pos"))
        .expect("entity still holds pos")
        .expect("pos slot is populated");
    assert_eq!(pos.borrow().downcast_ref::<Pos>().unwrap().x, 1.0);

    assert!(world.component_for(id, TypeId::of("vel")).is_none());
}

#[test]
fn failing_instantiator_leaves_null_slot_but_creates_the_entity() {
    let mut world = World::new();
    world.register_instantiator("pos", |_, init| Ok(init.clone()));
    world.register_instantiator("cursed", |_, _| {
        Err(EcsError::ComponentInit("always fails".into()))
    });

    let id = EntityBuilder::new()
        .with_component("pos", component_value(Pos { x: 3.0 }))
        .with_component("cursed", component_value(0u8))
        .build(&mut world)
        .expect("entity creation survives a failing instantiator");

    let pos = world
        .component_for(id, TypeId::of("pos"))
        .expect("schema holds pos")
        .expect("healthy component keeps its value");
    assert_eq!(pos.borrow().downcast_ref::<Pos>().unwrap().x, 3.0);

    let cursed = world
        .component_for(id, TypeId::of("cursed"))
        .expect("schema holds the failed component");
    assert!(cursed.is_none(), "failed component stores the null sentinel");
}

#[test]
fn unregistered_name_stores_the_raw_initializer() {
    let mut world = World::new();

    let id = EntityBuilder::new()
        .with_component("tag", component_value("anchor"))
        .build(&mut world)
        .expect("entity with raw descriptor value");

    let tag = world
        .component_for(id, TypeId::of("tag"))
        .expect("schema holds tag")
        .expect("raw initializer stored as-is");
    assert_eq!(*tag.borrow().downcast_ref::<&str>().unwrap(), "anchor");
}

#[test]
fn component_less_entities_share_the_empty_archetype() {
    let mut world = World::new();

    let first = EntityBuilder::new().build(&mut world).expect("bare entity");
    let second = EntityBuilder::new().build(&mut world).expect("bare entity");

    let loc_first = world.entity_location(first).expect("indexed");
    let loc_second = world.entity_location(second).expect("indexed");

    assert_eq!(loc_first.archetype, ArchetypeId::of(&[]));
    assert_eq!(loc_first.archetype, loc_second.archetype);
    assert_eq!(world.archetype_count(), 1);
}

#[test]
fn declaration_order_splits_archetypes() {
    let mut world = World::new();

    let forward = EntityBuilder::new()
        .with_component("pos", component_value(Pos { x: 0.0 }))
        .with_component("vel", component_value(Vel { x: 0.0 }))
        .build(&mut world)
        .expect("pos,vel entity");

    let reverse = EntityBuilder::new()
        .with_component("vel", component_value(Vel { x: 0.0 }))
        .with_component("pos", component_value(Pos { x: 0.0 }))
        .build(&mut world)
        .expect("vel,pos entity");

    let loc_forward = world.entity_location(forward).expect("indexed");
    let loc_reverse = world.entity_location(reverse).expect("indexed");
    assert_ne!(loc_forward.archetype, loc_reverse.archetype);
}

#[test]
fn query_matches_schema_supersets_in_registration_order() {
    let mut world = World::new();
    let a = TypeId::of("a");
    let b = TypeId::of("b");
    let c = TypeId::of("c");

    EntityBuilder::new()
        .with_component("a", component_value(1u8))
        .build(&mut world)
        .expect("a entity");
    EntityBuilder::new()
        .with_component("a", component_value(1u8))
        .with_component("b", component_value(2u8))
        .build(&mut world)
        .expect("ab entity");
    EntityBuilder::new()
        .with_component("a", component_value(1u8))
        .with_component("b", component_value(2u8))
        .with_component("c", component_value(3u8))
        .build(&mut world)
        .expect("abc entity");

    let results = world.query(&[a, b]);
    assert_eq!(
        results.archetype_ids(),
        &[ArchetypeId::of(&[a, b]), ArchetypeId::of(&[a, b, c])]
    );

    assert!(world.query(&[]).is_empty());
    assert!(world.query(&[TypeId::of("never-seen")]).is_empty());
}
