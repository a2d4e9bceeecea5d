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

//! Dynamic component model
//!
//! Components are opaque values keyed by name. A registered instantiator
//! converts a raw initializer into the stored value at entity-build time.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::error;

use crate::entity::EntityId;
use crate::error::Result;
use crate::type_id::TypeId;

/// Shared, interiorly mutable, type-erased component value.
pub type ComponentValue = Rc<RefCell<dyn Any>>;

/// One column cell: `None` marks a placeholder or a failed instantiation.
pub type ComponentSlot = Option<ComponentValue>;

/// Wrap a concrete value as a [`ComponentValue`].
pub fn component_value<T: Any>(value: T) -> ComponentValue {
    Rc::new(RefCell::new(value))
}

/// Component name plus raw initializer, supplied at entity-build time.
pub struct ComponentDescriptor {
    pub name: String,
    pub init: ComponentValue,
}

impl ComponentDescriptor {
    /// Pair a component name with its initializer.
    pub fn new(name: impl Into<String>, init: ComponentValue) -> Self {
        Self {
            name: name.into(),
            init,
        }
    }
}

/// Factory converting `(entity, initializer)` into the stored component value.
pub type Instantiator = Box<dyn Fn(EntityId, &ComponentValue) -> Result<ComponentValue>>;

/// Registry of component instantiators, keyed by hashed name.
///
/// Owned by each [`crate::world::World`] so independent worlds never share
/// or leak registrations.
#[derive(Default)]
pub struct InstantiatorRegistry {
    handlers: FxHashMap<TypeId, Instantiator>,
}

impl InstantiatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an instantiator for a component name.
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, instantiator: F)
    where
        F: Fn(EntityId, &ComponentValue) -> Result<ComponentValue> + 'static,
    {
        self.handlers
            .insert(TypeId::of(name), Box::new(instantiator));
    }

    /// Whether a type id has a registered instantiator.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.handlers.contains_key(&type_id)
    }

    /// Number of registered instantiators.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Instantiate every descriptor for `entity`.
    ///
    /// Returns the stored slots plus the hashed type ids, both in declaration
    /// order. A failing instantiator is logged and leaves a `None` slot; the
    /// remaining components are still instantiated. A name with no registered
    /// instantiator stores the raw initializer unchanged.
    pub(crate) fn instantiate(
        &self,
        entity: EntityId,
        descriptors: Vec<ComponentDescriptor>,
    ) -> (Vec<ComponentSlot>, Vec<TypeId>) {
        let mut slots = Vec::with_capacity(descriptors.len());
        let mut type_ids = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let type_id = TypeId::of(&descriptor.name);
            type_ids.push(type_id);

            let Some(instantiator) = self.handlers.get(&type_id) else {
                slots.push(Some(descriptor.init));
                continue;
            };

            match instantiator(entity, &descriptor.init) {
                Ok(value) => slots.push(Some(value)),
                Err(err) => {
                    error!(component = %descriptor.name, %err, "failed to initialize component");
                    slots.push(None);
                }
            }
        }

        (slots, type_ids)
    }
}
