//! Systems: cached queries bound to callbacks, built through [`SystemBuilder`].

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::error;

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::component::ComponentSlot;
use crate::query::QueryResults;
use crate::type_id::TypeId;
use crate::world::World;

/// System identifier, hashed from the system name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemId(pub u32);

impl SystemId {
    /// Hash a system name to its identifier.
    pub fn from_name(name: &str) -> Self {
        Self(TypeId::of(name).raw())
    }
}

/// Callback invoked once per matching row with the caller's dispatch context
/// and the bound component slots.
pub type SystemFn = Box<dyn FnMut(&mut dyn Any, &[ComponentSlot])>;

/// Shared handle to a registered system.
pub type SystemHandle = Rc<RefCell<System>>;

/// Frozen query snapshot plus per-archetype column lookups.
struct ResolvedQuery {
    results: QueryResults,

    /// One `TypeId -> column` map per archetype in `results`, same order.
    column_maps: Vec<FxHashMap<TypeId, usize>>,
}

/// A cached query plus a callback invoked once per matching row.
///
/// Resolution is one-way: the first dispatch runs the query and freezes the
/// snapshot. Archetypes created afterwards stay invisible to this system;
/// rows added to already-matched archetypes are picked up normally.
pub struct System {
    id: SystemId,
    name: String,
    query_comps: Vec<TypeId>,
    bindings: Vec<TypeId>,
    func: SystemFn,
    resolved: Option<ResolvedQuery>,
}

impl System {
    fn new(name: String, query_comps: Vec<TypeId>, bindings: Vec<TypeId>, func: SystemFn) -> Self {
        Self {
            id: SystemId::from_name(&name),
            name,
            query_comps,
            bindings,
            func,
            resolved: None,
        }
    }

    /// System identifier.
    pub fn id(&self) -> SystemId {
        self.id
    }

    /// System name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the query snapshot has been frozen yet.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Run the callback over every occupied row of every cached archetype.
    pub fn dispatch(&mut self, world: &World, ctx: &mut dyn Any) {
        #[cfg(feature = "profiling")]
        let span = info_span!("system.dispatch", system = %self.name);
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        let resolved = self
            .resolved
            .get_or_insert_with(|| resolve(world, &self.query_comps));

        let mut args: SmallVec<[ComponentSlot; 8]> = SmallVec::with_capacity(self.bindings.len());

        for (archetype_id, column_map) in resolved
            .results
            .archetype_ids()
            .iter()
            .zip(&resolved.column_maps)
        {
            let archetype = world.archetypes().get(*archetype_id);

            for row in 0..archetype.len() {
                args.clear();
                for binding in &self.bindings {
                    let column = column_map.get(binding).copied().unwrap_or(0);
                    args.push(archetype.get(column, row));
                }

                (self.func)(ctx, &args);
            }
        }
    }
}

/// Run the query and precompute the per-archetype column lookups.
fn resolve(world: &World, query_comps: &[TypeId]) -> ResolvedQuery {
    let results = world.query(query_comps);

    let mut column_maps = Vec::with_capacity(results.len());
    for &archetype_id in results.archetype_ids() {
        let archetype = world.archetypes().get(archetype_id);

        let mut map = FxHashMap::default();
        for (column, &type_id) in archetype.schema().iter().enumerate() {
            map.insert(type_id, column);
        }
        column_maps.push(map);
    }

    ResolvedQuery {
        results,
        column_maps,
    }
}

/// Builder for systems, obtained from [`World::add_system`].
pub struct SystemBuilder<'w> {
    world: &'w mut World,
    name: Option<String>,
    query_comps: Vec<String>,
    bindings: Vec<String>,
    func: Option<SystemFn>,
    bus_names: Vec<String>,
}

impl<'w> SystemBuilder<'w> {
    pub(crate) fn new(world: &'w mut World) -> Self {
        Self {
            world,
            name: None,
            query_comps: Vec::new(),
            bindings: Vec::new(),
            func: None,
            bus_names: Vec::new(),
        }
    }

    /// Name the system; its id is the hash of this name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Component names whose archetypes this system iterates.
    pub fn query_components<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_comps.extend(names.into_iter().map(Into::into));
        self
    }

    /// Subset/reordering of the queried names passed to the callback.
    pub fn bindings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings.extend(names.into_iter().map(Into::into));
        self
    }

    /// Callback run once per matching row.
    pub fn callback<F>(mut self, func: F) -> Self
    where
        F: FnMut(&mut dyn Any, &[ComponentSlot]) + 'static,
    {
        self.func = Some(Box::new(func));
        self
    }

    /// Subscribe the built system to a named bus. Repeatable.
    pub fn subscribe_to_bus(mut self, name: impl Into<String>) -> Self {
        self.bus_names.push(name.into());
        self
    }

    /// Build and register the system.
    ///
    /// Returns `None` (logged, nothing created) when no callback was
    /// supplied. An unknown bus name is logged and skipped; the system is
    /// still created and registered.
    pub fn build(self) -> Option<SystemHandle> {
        let Some(func) = self.func else {
            error!(system = ?self.name, "system has no callback, not created");
            return None;
        };

        let name = self.name.unwrap_or_else(|| "none".to_owned());
        let query_comps: Vec<TypeId> = self.query_comps.iter().map(|n| TypeId::of(n)).collect();
        let bindings: Vec<TypeId> = self.bindings.iter().map(|n| TypeId::of(n)).collect();

        let system = Rc::new(RefCell::new(System::new(name, query_comps, bindings, func)));

        for bus_name in &self.bus_names {
            if !self.world.subscribe_system(bus_name, system.clone()) {
                error!(bus = %bus_name, "unknown event bus, subscription skipped");
            }
        }

        self.world.register_system(system.clone());

        Some(system)
    }
}
