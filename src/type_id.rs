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

//! Deterministic 32-bit identifiers for component names and archetype schemas.
//!
//! Components are referenced by name at runtime, so their ids must be stable
//! within and across processes: the same name always hashes to the same id.

use smallvec::SmallVec;

const SEED: u32 = 0x9327;

/// 32-bit identifier of a component type, hashed from its name.
///
/// Two distinct names may collide; no collision detection is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Hash a component name to its identifier.
    pub fn of(name: &str) -> Self {
        let units: SmallVec<[u16; 32]> = name.encode_utf16().collect();
        Self(murmur3_32(&units))
    }

    /// Raw hash value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// 32-bit identifier of an archetype, hashed from its ordered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeId(u32);

impl ArchetypeId {
    /// Hash an ordered TypeId sequence.
    ///
    /// Order is significant: the same component set declared in a different
    /// order identifies a different archetype.
    pub fn of(type_ids: &[TypeId]) -> Self {
        let mut units: SmallVec<[u16; 32]> = SmallVec::with_capacity(type_ids.len() * 4);
        for id in type_ids {
            let raw = id.raw();
            units.push(((raw >> 24) & 0xff) as u16);
            units.push(((raw >> 16) & 0xff) as u16);
            units.push(((raw >> 8) & 0xff) as u16);
            units.push((raw & 0xff) as u16);
        }
        Self(murmur3_32(&units))
    }

    /// Raw hash value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

fn scramble(mut k: u32) -> u32 {
    k = k.wrapping_mul(0xcc9e_2d51);
    k = k.rotate_left(15);
    k.wrapping_mul(0x1b87_3593)
}

/// MurmurHash3 (x86, 32-bit) over UTF-16 code units treated as byte values.
///
/// Empty input hashes to 0 rather than the seeded finalizer output, which
/// gives the empty schema archetype id 0.
fn murmur3_32(units: &[u16]) -> u32 {
    if units.is_empty() {
        return 0;
    }

    let mut h = SEED;
    let mut chunks = units.chunks_exact(4);
    for chunk in chunks.by_ref() {
        let k = chunk[0] as u32
            | (chunk[1] as u32) << 8
            | (chunk[2] as u32) << 16
            | (chunk[3] as u32) << 24;
        h ^= scramble(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    // Trailing 0..=3 units, packed big-endian and merged by xor alone.
    let mut k = 0u32;
    for &unit in chunks.remainder().iter().rev() {
        k = (k << 8) | unit as u32;
    }
    h ^= scramble(k);

    h ^= units.len() as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_hash_to_zero() {
        assert_eq!(TypeId::of("").raw(), 0);
        assert_eq!(ArchetypeId::of(&[]).raw(), 0);
    }

    #[test]
    fn type_ids_are_stable() {
        assert_eq!(TypeId::of("pos").raw(), 0x3f49_bb9b);
        assert_eq!(TypeId::of("vel").raw(), 0xe64f_5929);
        assert_eq!(TypeId::of("position").raw(), 0x324a_98c7);
        assert_eq!(TypeId::of("orbit").raw(), 0x02ea_b754);
    }

    #[test]
    fn identical_names_hash_identically() {
        assert_eq!(TypeId::of("radius"), TypeId::of("radius"));
        assert_eq!(TypeId::of("radius").raw(), 0xa23c_5add);
    }

    #[test]
    fn archetype_id_is_order_sensitive() {
        let pos = TypeId::of("pos");
        let vel = TypeId::of("vel");
        assert_eq!(ArchetypeId::of(&[pos, vel]).raw(), 0x75cc_ed91);
        assert_eq!(ArchetypeId::of(&[vel, pos]).raw(), 0x3700_6050);
        assert_ne!(ArchetypeId::of(&[pos, vel]), ArchetypeId::of(&[vel, pos]));
    }

    #[test]
    fn single_type_schema_hashes_its_four_bytes() {
        let pos = TypeId::of("pos");
        assert_eq!(ArchetypeId::of(&[pos]).raw(), 0x1281_4515);
    }
}
