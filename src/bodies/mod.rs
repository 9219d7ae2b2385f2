//! Solar-system bodies: the static catalogue and their closed-form motion.
//!
//! Coordinate frame:
//! - 3D, Sun at origin, +Y up. Orbits lie in the XZ plane with a small
//!   decorative vertical wobble.

pub mod data;
pub mod orbit;

#[cfg(test)]
mod proptest_orbits;

pub use data::{BodyData, BodyId, BodyInfo, Framing, OrbitParams, all_bodies, get_body_data};
pub use orbit::{Layout, body_position, orbital_position, spin_angle};

use bevy::prelude::*;
use std::collections::HashMap;

/// Resource holding the body catalogue and the entity mapping.
#[derive(Resource)]
pub struct SolarSystem {
    /// Mapping from spawned entity to body ID
    entity_to_id: HashMap<Entity, BodyId>,
    /// Cached catalogue data
    body_data: HashMap<BodyId, BodyData>,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    /// Create a catalogue with every body loaded and no entities registered.
    pub fn new() -> Self {
        let body_data = all_bodies().into_iter().map(|d| (d.id, d)).collect();
        Self {
            entity_to_id: HashMap::new(),
            body_data,
        }
    }

    /// Register an entity as a body.
    pub fn register(&mut self, entity: Entity, id: BodyId) {
        self.entity_to_id.insert(entity, id);
    }

    /// Get the body ID for an entity.
    pub fn get_id(&self, entity: Entity) -> Option<BodyId> {
        self.entity_to_id.get(&entity).copied()
    }

    /// Get the catalogue entry for a body ID.
    pub fn get(&self, id: BodyId) -> Option<&BodyData> {
        self.body_data.get(&id)
    }

    /// Catalogue entries in [`BodyId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &BodyData> + '_ {
        BodyId::ALL.iter().filter_map(|id| self.body_data.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_every_body() {
        let system = SolarSystem::new();
        for id in BodyId::ALL {
            let data = system.get(id).expect("body should be in catalogue");
            assert_eq!(data.id, id);
        }
    }

    #[test]
    fn test_register_round_trip() {
        let mut system = SolarSystem::new();
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let other = world.spawn_empty().id();
        system.register(entity, BodyId::Saturn);
        assert_eq!(system.get_id(entity), Some(BodyId::Saturn));
        assert!(system.get_id(other).is_none());
    }

    #[test]
    fn test_iter_follows_id_order() {
        let system = SolarSystem::new();
        let ids: Vec<_> = system.iter().map(|d| d.id).collect();
        assert_eq!(ids, BodyId::ALL.to_vec());
    }
}
