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

//! Entity identifiers, locations, and the entity builder.

use crate::component::{ComponentDescriptor, ComponentValue};
use crate::error::Result;
use crate::type_id::ArchetypeId;
use crate::world::World;

/// Unique entity identifier.
///
/// Ids are allocated by the owning [`World`] as a monotonically increasing
/// counter starting at 0 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// Entity location in archetype storage (archetype id, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLocation {
    pub archetype: ArchetypeId,
    pub row: usize,
}

/// Builder collecting component descriptors before entity creation.
pub struct EntityBuilder {
    descriptors: Vec<ComponentDescriptor>,
}

impl EntityBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Queue a component by name with its raw initializer.
    pub fn with_component(mut self, name: impl Into<String>, init: ComponentValue) -> Self {
        self.descriptors.push(ComponentDescriptor::new(name, init));
        self
    }

    /// Allocate the next entity id and add the entity to `world`.
    pub fn build(self, world: &mut World) -> Result<EntityId> {
        let entity = world.next_entity_id();
        world.add_entity(entity, self.descriptors)?;
        Ok(entity)
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
