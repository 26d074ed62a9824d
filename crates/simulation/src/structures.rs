use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TILE_SIZE;

/// Session-unique identifier for a placed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId(pub u32);

/// Cardinal rotation of a placed structure. Accepted at placement time;
/// all catalog footprints are square, so rotation never changes the
/// occupied rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn radians(self) -> f32 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => std::f32::consts::FRAC_PI_2,
            Rotation::Deg180 => std::f32::consts::PI,
            Rotation::Deg270 => 3.0 * std::f32::consts::FRAC_PI_2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

/// One committed structure in the city. Immutable after placement except
/// for removal; in particular the style variant is fixed at commit time
/// and never retroactively reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedStructure {
    pub id: StructureId,
    pub type_id: String,
    /// World-space position, already snapped to a tile center.
    pub x: f32,
    pub z: f32,
    pub rotation: Rotation,
    pub variant: u8,
}

/// The mutable structure set for the running session.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct City {
    pub structures: Vec<PlacedStructure>,
    next_id: u32,
}

impl City {
    pub fn get(&self, id: StructureId) -> Option<&PlacedStructure> {
        self.structures.iter().find(|s| s.id == id)
    }

    /// Append a structure and return its new id. Callers are expected to
    /// have validated collision and funds beforehand (see `placement`).
    pub fn insert(
        &mut self,
        type_id: String,
        x: f32,
        z: f32,
        rotation: Rotation,
        variant: u8,
    ) -> StructureId {
        let id = StructureId(self.next_id);
        self.next_id += 1;
        self.structures.push(PlacedStructure {
            id,
            type_id,
            x,
            z,
            rotation,
            variant,
        });
        id
    }

    pub fn remove(&mut self, id: StructureId) -> Option<PlacedStructure> {
        let idx = self.structures.iter().position(|s| s.id == id)?;
        Some(self.structures.remove(idx))
    }
}

/// Fired whenever the placed-structure collection changes, so derived
/// caches (stats, meshes) rebuild once per mutation instead of per tick.
#[derive(Event, Debug, Clone, Copy)]
pub enum StructureSetChanged {
    Placed(StructureId),
    Removed(StructureId),
}

/// Snap a world coordinate to the nearest tile center.
pub fn snap_to_tile(v: f32) -> f32 {
    (v / TILE_SIZE).floor() * TILE_SIZE + TILE_SIZE * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_fresh_ids() {
        let mut city = City::default();
        let a = city.insert("residential_1".into(), 1.0, 1.0, Rotation::Deg0, 0);
        let b = city.insert("residential_1".into(), 3.0, 1.0, Rotation::Deg0, 0);
        assert_ne!(a, b);
        assert_eq!(city.structures.len(), 2);
    }

    #[test]
    fn remove_returns_the_structure() {
        let mut city = City::default();
        let id = city.insert("park".into(), 1.0, 1.0, Rotation::Deg0, 2);
        let removed = city.remove(id).unwrap();
        assert_eq!(removed.variant, 2);
        assert!(city.get(id).is_none());
        assert!(city.remove(id).is_none());
    }

    #[test]
    fn snap_lands_on_tile_centers() {
        // TILE_SIZE = 2.0: centers sit at odd coordinates.
        assert_eq!(snap_to_tile(0.0), 1.0);
        assert_eq!(snap_to_tile(1.9), 1.0);
        assert_eq!(snap_to_tile(2.1), 3.0);
        assert_eq!(snap_to_tile(-0.5), -1.0);
    }
}
