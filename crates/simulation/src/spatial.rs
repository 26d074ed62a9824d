use bevy::prelude::*;

use crate::catalog::StructureCatalog;
use crate::config::{TILE_SIZE, WORLD_HALF};
use crate::structures::City;

/// Axis-aligned footprint rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Footprint {
    /// Rectangle for a footprint of `width` x `depth` tiles centered at
    /// (`cx`, `cz`).
    pub fn centered(cx: f32, cz: f32, width: u32, depth: u32) -> Self {
        let hw = width as f32 * TILE_SIZE * 0.5;
        let hd = depth as f32 * TILE_SIZE * 0.5;
        Self {
            min_x: cx - hw,
            max_x: cx + hw,
            min_z: cz - hd,
            max_z: cz + hd,
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.min_x >= -WORLD_HALF
            && self.max_x <= WORLD_HALF
            && self.min_z >= -WORLD_HALF
            && self.max_z <= WORLD_HALF
    }

    /// Open-interval overlap: rectangles that merely share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Footprint) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_z < other.max_z
            && self.max_z > other.min_z
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_z..self.max_z).contains(&z)
    }
}

/// Returns true when a candidate footprint centered at (`cx`, `cz`) is
/// illegal: outside the grid, or overlapping any placed structure.
///
/// Linear in the number of placed structures. Fine at sandbox city
/// sizes; swap in a spatial hash if the structure count ever grows past
/// a few thousand.
pub fn is_occupied(
    city: &City,
    catalog: &StructureCatalog,
    cx: f32,
    cz: f32,
    width: u32,
    depth: u32,
) -> bool {
    let candidate = Footprint::centered(cx, cz, width, depth);
    if !candidate.in_bounds() {
        return true;
    }
    for placed in &city.structures {
        let Some(ty) = catalog.get(&placed.type_id) else {
            warn!("placed structure {:?} references unknown type '{}'", placed.id, placed.type_id);
            continue;
        };
        let existing = Footprint::centered(placed.x, placed.z, ty.width, ty.depth);
        if candidate.intersects(&existing) {
            return true;
        }
    }
    false
}

/// Pick the topmost structure whose footprint contains the given world
/// point, or `None`. Used by the demolish and inspect paths.
pub fn structure_at(
    city: &City,
    catalog: &StructureCatalog,
    x: f32,
    z: f32,
) -> Option<crate::structures::StructureId> {
    city.structures.iter().rev().find_map(|placed| {
        let ty = catalog.get(&placed.type_id)?;
        let rect = Footprint::centered(placed.x, placed.z, ty.width, ty.depth);
        rect.contains(x, z).then_some(placed.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::structures::Rotation;

    fn city_with(type_id: &str, x: f32, z: f32) -> City {
        let mut city = City::default();
        city.insert(type_id.into(), x, z, Rotation::Deg0, 0);
        city
    }

    #[test]
    fn empty_grid_is_free() {
        let catalog = build_catalog();
        let city = City::default();
        assert!(!is_occupied(&city, &catalog, 1.0, 1.0, 1, 1));
    }

    #[test]
    fn same_center_collides() {
        let catalog = build_catalog();
        let city = city_with("residential_1", 1.0, 1.0);
        assert!(is_occupied(&city, &catalog, 1.0, 1.0, 1, 1));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        // Two 1x1 footprints whose centers are exactly one tile apart
        // share an edge but no area.
        let catalog = build_catalog();
        let city = city_with("residential_1", 1.0, 1.0);
        assert!(!is_occupied(&city, &catalog, 1.0 + TILE_SIZE, 1.0, 1, 1));
        assert!(!is_occupied(&city, &catalog, 1.0, 1.0 + TILE_SIZE, 1, 1));
    }

    #[test]
    fn closer_than_one_tile_collides() {
        let catalog = build_catalog();
        let city = city_with("residential_1", 1.0, 1.0);
        assert!(is_occupied(&city, &catalog, 1.0 + TILE_SIZE * 0.5, 1.0, 1, 1));
    }

    #[test]
    fn out_of_bounds_is_occupied_even_when_empty() {
        let catalog = build_catalog();
        let city = City::default();
        assert!(is_occupied(&city, &catalog, WORLD_HALF + 10.0, 0.0, 1, 1));
        // A footprint whose edge pokes past the boundary is also out.
        assert!(is_occupied(&city, &catalog, WORLD_HALF - 0.5, 0.0, 1, 1));
    }

    #[test]
    fn large_footprints_use_their_full_extent() {
        let catalog = build_catalog();
        // 4x4 centered at origin spans [-4, 4] on both axes.
        let city = city_with("office_4", 0.0, 0.0);
        assert!(is_occupied(&city, &catalog, 4.5, 0.0, 1, 1));
        assert!(!is_occupied(&city, &catalog, 5.0, 0.0, 1, 1));
    }

    #[test]
    fn unknown_type_is_skipped() {
        let catalog = build_catalog();
        let city = city_with("ghost_type", 1.0, 1.0);
        assert!(!is_occupied(&city, &catalog, 1.0, 1.0, 1, 1));
    }

    #[test]
    fn pick_finds_structure_under_point() {
        let catalog = build_catalog();
        let mut city = City::default();
        let id = city.insert("commercial_2".into(), 2.0, 2.0, Rotation::Deg0, 0);
        assert_eq!(structure_at(&city, &catalog, 2.5, 1.5), Some(id));
        assert_eq!(structure_at(&city, &catalog, 10.0, 10.0), None);
    }
}
