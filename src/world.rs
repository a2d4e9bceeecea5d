// Copyright 2025 The Orrery ECS Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! World: composition root owning the entity index, archetype storage,
//! event buses, systems, and the instantiator registry.

use ahash::AHashMap;

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::archetype::ArchetypeMap;
use crate::component::{
    ComponentDescriptor, ComponentSlot, ComponentValue, InstantiatorRegistry,
};
use crate::entity::{EntityId, EntityLocation};
use crate::error::{EcsError, Result};
use crate::event_bus::EventBus;
use crate::query::QueryResults;
use crate::system::{SystemBuilder, SystemHandle, SystemId};
use crate::type_id::TypeId;

/// Central ECS world
///
/// All mutable runtime state hangs off a single `World`: the entity index,
/// the archetype storage, the instantiator registry, the named event buses,
/// and the system registry. The core is single-threaded by design, so the
/// world is the sole owner of everything it holds.
pub struct World {
    /// Next entity id; strictly increasing, never reused.
    next_id: u64,

    /// Entity id to archetype location.
    entity_index: AHashMap<EntityId, EntityLocation>,

    /// Archetype storage plus the component-to-column index.
    archetypes: ArchetypeMap,

    /// Per-world component instantiators.
    instantiators: InstantiatorRegistry,

    /// Named event buses.
    buses: AHashMap<String, EventBus>,

    /// Systems keyed by hashed name.
    systems: AHashMap<SystemId, SystemHandle>,
}

impl World {
    /// Create a new, empty world.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entity_index: AHashMap::new(),
            archetypes: ArchetypeMap::new(),
            instantiators: InstantiatorRegistry::new(),
            buses: AHashMap::new(),
            systems: AHashMap::new(),
        }
    }

    /// Allocate the next entity id.
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a component instantiator on this world's registry.
    pub fn register_instantiator<F>(&mut self, name: &str, instantiator: F)
    where
        F: Fn(EntityId, &ComponentValue) -> Result<ComponentValue> + 'static,
    {
        self.instantiators.register(name, instantiator);
    }

    /// Add an entity built from component descriptors.
    ///
    /// A failing instantiator is logged and stores `None` for its component;
    /// the entity is still created with every other component populated. An
    /// id already present in the index is refused without mutating anything.
    pub fn add_entity(
        &mut self,
        entity: EntityId,
        descriptors: Vec<ComponentDescriptor>,
    ) -> Result<()> {
        if self.entity_index.contains_key(&entity) {
            return Err(EcsError::DuplicateEntity(entity));
        }

        #[cfg(feature = "profiling")]
        let span = info_span!("world.add_entity", components = descriptors.len());
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        let (slots, type_ids) = self.instantiators.instantiate(entity, descriptors);

        let archetype = self.archetypes.get_or_create(&type_ids);
        let row = self.archetypes.next_row_for(archetype);

        self.entity_index
            .insert(entity, EntityLocation { archetype, row });
        self.archetypes.write(archetype, row, slots, &type_ids);

        Ok(())
    }

    /// Location of an entity, if present.
    pub fn entity_location(&self, entity: EntityId) -> Option<EntityLocation> {
        self.entity_index.get(&entity).copied()
    }

    /// Read one component of an entity by type id.
    ///
    /// `None` when the entity is unknown or its archetype does not hold the
    /// type; `Some(None)` when the slot holds the failed-instantiation
    /// sentinel.
    pub fn component_for(&self, entity: EntityId, type_id: TypeId) -> Option<ComponentSlot> {
        let location = self.entity_index.get(&entity)?;

        let archetype = self.archetypes.get(location.archetype);
        if !archetype.schema().contains(&type_id) {
            return None;
        }

        let column = self.archetypes.column_of(type_id, location.archetype);
        Some(archetype.get(column, location.row))
    }

    /// Number of indexed entities.
    pub fn entity_count(&self) -> usize {
        self.entity_index.len()
    }

    /// Number of archetypes, the empty archetype included.
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// Archetype storage.
    pub fn archetypes(&self) -> &ArchetypeMap {
        &self.archetypes
    }

    /// All archetypes matching the requested component set, recomputed in
    /// full on every call.
    pub fn query(&self, type_ids: &[TypeId]) -> QueryResults {
        QueryResults::run(&self.archetypes, type_ids)
    }

    /// Create a named event bus, replacing any bus with the same name.
    pub fn create_event_bus(&mut self, name: &str) -> &EventBus {
        self.buses.insert(name.to_owned(), EventBus::new(name));
        self.buses.get(name).expect("bus registered above")
    }

    /// Look up a bus by name.
    pub fn bus(&self, name: &str) -> Option<&EventBus> {
        self.buses.get(name)
    }

    /// Start building a system against this world.
    pub fn add_system(&mut self) -> SystemBuilder<'_> {
        SystemBuilder::new(self)
    }

    /// Look up a system by id.
    pub fn system(&self, id: SystemId) -> Option<&SystemHandle> {
        self.systems.get(&id)
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub(crate) fn subscribe_system(&mut self, bus: &str, system: SystemHandle) -> bool {
        match self.buses.get_mut(bus) {
            Some(bus) => {
                bus.subscribe(system);
                true
            }
            None => false,
        }
    }

    pub(crate) fn register_system(&mut self, system: SystemHandle) {
        let id = system.borrow().id();
        self.systems.insert(id, system);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_bootstraps_the_empty_archetype() {
        let world = World::new();
        assert_eq!(world.archetype_count(), 1);
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.system_count(), 0);
    }

    #[test]
    fn entity_ids_are_allocated_in_call_order() {
        let mut world = World::new();
        assert_eq!(world.next_entity_id().to_raw(), 0);
        assert_eq!(world.next_entity_id().to_raw(), 1);
        assert_eq!(world.next_entity_id().to_raw(), 2);
    }

    #[test]
    fn create_event_bus_registers_lookup() {
        let mut world = World::new();
        world.create_event_bus("render");

        assert!(world.bus("render").is_some());
        assert!(world.bus("input").is_none());
        assert_eq!(world.bus("render").unwrap().subscriber_count(), 0);
    }
}
