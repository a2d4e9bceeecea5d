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

//! Orrery ECS - String-keyed archetype Entity Component System
//!
//! Components are opaque values keyed by hashed names; entities live in
//! columnar archetypes keyed by their ordered schema; systems run cached
//! queries and are driven synchronously through named event buses.

pub mod archetype;
pub mod component;
pub mod entity;
pub mod error;
pub mod event_bus;
pub mod prelude;
pub mod query;
pub mod system;
pub mod type_id;
pub mod world;

pub use archetype::*;
pub use component::*;
pub use entity::*;
pub use error::*;
pub use event_bus::*;
pub use query::*;
pub use system::*;
pub use type_id::*;
pub use world::*;
