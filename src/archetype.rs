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

//! Archetype storage: schema-keyed column tables and their indices.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::component::ComponentSlot;
use crate::type_id::{ArchetypeId, TypeId};

/// Ordered component schema of an archetype.
pub type Schema = SmallVec<[TypeId; 8]>;

/// Growable per-type storage, row-aligned with the other columns of its
/// archetype.
pub struct Column {
    values: Vec<ComponentSlot>,
}

impl Column {
    fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Number of rows, placeholder rows included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the value at `row`; out-of-range rows read as empty.
    pub fn get(&self, row: usize) -> ComponentSlot {
        self.values.get(row).cloned().flatten()
    }

    fn push_placeholder(&mut self) {
        self.values.push(None);
    }

    fn set(&mut self, row: usize, value: ComponentSlot) {
        self.values[row] = value;
    }
}

/// Fixed-schema table of columns sharing row indices.
///
/// Created once per distinct ordered schema; neither the schema nor its
/// column-to-type assignment changes afterwards.
pub struct Archetype {
    id: ArchetypeId,
    schema: Schema,
    columns: Vec<Column>,
    spare_rows: Vec<usize>,
}

impl Archetype {
    fn new(id: ArchetypeId, schema: Schema) -> Self {
        let columns = (0..schema.len()).map(|_| Column::new()).collect();
        Self {
            id,
            schema,
            columns,
            spare_rows: Vec::new(),
        }
    }

    /// Archetype identifier.
    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    /// Ordered component schema.
    pub fn schema(&self) -> &[TypeId] {
        &self.schema
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Occupied row count: appended rows minus freed rows.
    ///
    /// Nothing populates `spare_rows` today, so rows `0..len` are contiguous.
    pub fn len(&self) -> usize {
        match self.columns.first() {
            Some(column) => column.len() - self.spare_rows.len(),
            None => 0,
        }
    }

    /// Whether the archetype holds no occupied rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next writable row: a freed row if any exist, else an append.
    fn next_row(&mut self) -> usize {
        if self.columns.is_empty() {
            return 0;
        }
        self.spare_rows
            .pop()
            .unwrap_or_else(|| self.columns[0].len())
    }

    /// Append a placeholder row to every column.
    fn push_row(&mut self) {
        for column in &mut self.columns {
            column.push_placeholder();
        }
    }

    /// Read the value at (column, row).
    pub fn get(&self, column: usize, row: usize) -> ComponentSlot {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    fn set(&mut self, column: usize, row: usize, value: ComponentSlot) {
        self.columns[column].set(row, value);
    }
}

/// Archetype registry plus the component-to-column index.
pub struct ArchetypeMap {
    archetypes: FxHashMap<ArchetypeId, Archetype>,

    /// Per component type: `(archetype, column)` pairs in registration order.
    /// A pair is registered once and never reassigned.
    column_index: FxHashMap<TypeId, Vec<(ArchetypeId, usize)>>,
}

impl ArchetypeMap {
    pub(crate) fn new() -> Self {
        let mut map = Self {
            archetypes: FxHashMap::default(),
            column_index: FxHashMap::default(),
        };

        // The empty archetype always exists; component-less entities land here.
        map.get_or_create(&[]);
        map
    }

    /// Look up a registered archetype.
    ///
    /// # Panics
    /// Panics on an id that was never registered: that is bookkeeping
    /// corruption, not a recoverable lookup miss.
    pub fn get(&self, id: ArchetypeId) -> &Archetype {
        match self.archetypes.get(&id) {
            Some(archetype) => archetype,
            None => panic!("unregistered archetype id {:#010x}", id.raw()),
        }
    }

    fn get_mut(&mut self, id: ArchetypeId) -> &mut Archetype {
        match self.archetypes.get_mut(&id) {
            Some(archetype) => archetype,
            None => panic!("unregistered archetype id {:#010x}", id.raw()),
        }
    }

    /// Number of registered archetypes, the empty archetype included.
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether no archetypes are registered.
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Resolve the archetype for an ordered schema, creating and indexing it
    /// on first sight.
    pub(crate) fn get_or_create(&mut self, type_ids: &[TypeId]) -> ArchetypeId {
        let id = ArchetypeId::of(type_ids);
        if !self.archetypes.contains_key(&id) {
            let schema: Schema = type_ids.iter().copied().collect();
            self.archetypes.insert(id, Archetype::new(id, schema));

            for (column, &type_id) in type_ids.iter().enumerate() {
                self.set_column_mapping(type_id, id, column);
            }
        }
        id
    }

    /// Register `(type_id, archetype) -> column`, keeping the first mapping
    /// if the pair was already assigned.
    fn set_column_mapping(&mut self, type_id: TypeId, archetype: ArchetypeId, column: usize) {
        let mappings = self.column_index.entry(type_id).or_default();
        if !mappings.iter().any(|&(arch, _)| arch == archetype) {
            mappings.push((archetype, column));
        }
    }

    /// Column index assigned to `type_id` within `archetype`.
    pub(crate) fn column_of(&self, type_id: TypeId, archetype: ArchetypeId) -> usize {
        self.column_index
            .get(&type_id)
            .and_then(|mappings| {
                mappings
                    .iter()
                    .find(|&&(arch, _)| arch == archetype)
                    .map(|&(_, column)| column)
            })
            .unwrap_or(0)
    }

    /// All archetypes registered under `type_id`, in registration order.
    ///
    /// An unknown type id yields no archetypes, not an error.
    pub fn containing(&self, type_id: TypeId) -> impl Iterator<Item = ArchetypeId> + '_ {
        self.column_index
            .get(&type_id)
            .into_iter()
            .flat_map(|mappings| mappings.iter().map(|&(arch, _)| arch))
    }

    /// Next free row in `archetype`: pops the spare list, else appends.
    pub(crate) fn next_row_for(&mut self, archetype: ArchetypeId) -> usize {
        self.get_mut(archetype).next_row()
    }

    /// Write an entity's component slots into `archetype` at `row`, growing
    /// every column first when the row is an append.
    pub(crate) fn write(
        &mut self,
        archetype: ArchetypeId,
        row: usize,
        slots: Vec<ComponentSlot>,
        type_ids: &[TypeId],
    ) {
        let columns: SmallVec<[usize; 8]> = type_ids
            .iter()
            .map(|&type_id| self.column_of(type_id, archetype))
            .collect();

        let arch = self.get_mut(archetype);
        if row >= arch.len() {
            arch.push_row();
        }

        for (slot, column) in slots.into_iter().zip(columns) {
            arch.set(column, row, slot);
        }
    }
}
