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

//! Archetype matching for component queries.

use crate::archetype::ArchetypeMap;
use crate::type_id::{ArchetypeId, TypeId};

/// Archetypes matching a requested component set.
///
/// A result is a plain snapshot: it is recomputed in full on every query and
/// lists archetype ids in primary-index registration order.
#[derive(Debug, Clone)]
pub struct QueryResults {
    type_ids: Vec<TypeId>,
    archetypes: Vec<ArchetypeId>,
}

impl QueryResults {
    /// Match every archetype whose schema contains all of `type_ids`.
    ///
    /// Candidates come from the primary index of the leading type id; an
    /// empty request or a never-seen leading id matches nothing.
    pub(crate) fn run(map: &ArchetypeMap, type_ids: &[TypeId]) -> Self {
        let mut results = Self {
            type_ids: type_ids.to_vec(),
            archetypes: Vec::new(),
        };

        let Some(&leading) = type_ids.first() else {
            return results;
        };

        for candidate in map.containing(leading) {
            let schema = map.get(candidate).schema();
            if type_ids.iter().all(|needed| schema.contains(needed)) {
                results.archetypes.push(candidate);
            }
        }

        results
    }

    /// Requested component type ids.
    pub fn type_ids(&self) -> &[TypeId] {
        &self.type_ids
    }

    /// Matched archetype ids, in registration order.
    pub fn archetype_ids(&self) -> &[ArchetypeId] {
        &self.archetypes
    }

    /// Number of matched archetypes.
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}
