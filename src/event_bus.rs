//! Named synchronous pub/sub channels fanning dispatch out to systems.

use std::any::Any;

use crate::system::SystemHandle;
use crate::world::World;

/// Named channel forwarding a dispatch context to subscribed systems.
///
/// Subscribers run synchronously in subscription order, once per dispatch.
/// There is no priority, no unsubscribe, and no back-pressure.
pub struct EventBus {
    name: String,
    subscribers: Vec<SystemHandle>,
}

impl EventBus {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers: Vec::new(),
        }
    }

    /// Bus name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a system; dispatch order is subscription order.
    pub(crate) fn subscribe(&mut self, system: SystemHandle) {
        self.subscribers.push(system);
    }

    /// Number of subscribed systems.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Forward `ctx` to every subscribed system, in order.
    pub fn dispatch(&self, world: &World, ctx: &mut dyn Any) {
        for system in &self.subscribers {
            system.borrow_mut().dispatch(world, ctx);
        }
    }
}
