//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use orrery_ecs::prelude::*;
//! ```

pub use crate::component::{
    component_value, ComponentDescriptor, ComponentSlot, ComponentValue, InstantiatorRegistry,
};
pub use crate::entity::{EntityBuilder, EntityId, EntityLocation};
pub use crate::error::{EcsError, Result};
pub use crate::event_bus::EventBus;
pub use crate::query::QueryResults;
pub use crate::system::{SystemBuilder, SystemHandle, SystemId};
pub use crate::type_id::{ArchetypeId, TypeId};
pub use crate::world::World;
