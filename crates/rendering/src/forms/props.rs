//! Single-recipe forms (park, landfill, road, de-zone marker) and the
//! shared decorative sub-elements they scatter around.

use bevy::prelude::*;
use rand::Rng;

use simulation::catalog::StructureType;
use simulation::config::TILE_SIZE;

use super::{ShapeKind, StructureForm};

const GRASS: [f32; 4] = [0.30, 0.60, 0.28, 1.0];
const DIRT: [f32; 4] = [0.45, 0.40, 0.32, 1.0];
const TRUNK: [f32; 4] = [0.38, 0.27, 0.16, 1.0];
const CANOPY: [f32; 4] = [0.16, 0.45, 0.18, 1.0];
const ROCK: [f32; 4] = [0.52, 0.52, 0.54, 1.0];
const REFUSE: [f32; 4] = [0.36, 0.33, 0.28, 1.0];
const STRIPE: [f32; 4] = [0.85, 0.82, 0.60, 1.0];

/// Deterministic size cycle for scattered trees: index picks the scale,
/// only the position is random.
const TREE_SCALES: [f32; 3] = [1.3, 1.0, 0.8];
const PILE_SCALES: [f32; 3] = [1.4, 1.0, 1.2];

/// A conifer: trunk cylinder plus pyramid canopy, `scale` 1.0 standing
/// roughly 1.5 units tall with a 0.8-unit canopy.
pub fn tree(form: &mut StructureForm, x: f32, base_y: f32, z: f32, scale: f32) {
    form.solid(
        ShapeKind::Cylinder,
        Vec3::new(x, base_y + 0.3 * scale, z),
        Vec3::new(0.18 * scale, 0.6 * scale, 0.18 * scale),
        TRUNK,
    );
    form.solid(
        ShapeKind::Pyramid,
        Vec3::new(x, base_y + 1.05 * scale, z),
        Vec3::new(0.8 * scale, 0.9 * scale, 0.8 * scale),
        CANOPY,
    );
}

/// Terrace planting used by the stepped zoned recipe: a small tree
/// whose canopy fits a half-unit square.
pub fn terrace_tree(form: &mut StructureForm, x: f32, base_y: f32, z: f32) {
    tree(form, x, base_y, z, 0.55);
}

fn rock(form: &mut StructureForm, x: f32, z: f32, scale: f32) {
    form.solid(
        ShapeKind::Box,
        Vec3::new(x, 0.12 + 0.15 * scale, z),
        Vec3::new(0.4 * scale, 0.3 * scale, 0.35 * scale),
        ROCK,
    );
}

/// Random point leaving `margin` clear of the footprint edge on both axes.
fn scatter_point(half_w: f32, half_d: f32, margin: f32, rng: &mut impl Rng) -> Option<(f32, f32)> {
    let lx = half_w - margin;
    let lz = half_d - margin;
    if lx <= 0.0 || lz <= 0.0 {
        return None;
    }
    let x = (rng.gen::<f32>() * 2.0 - 1.0) * lx;
    let z = (rng.gen::<f32>() * 2.0 - 1.0) * lz;
    Some((x, z))
}

/// Park: grass slab with scattered trees and rocks. The preview keeps
/// the slab and a single centered tree at the tallest scatter scale so
/// the silhouette matches the committed form.
pub fn park(form: &mut StructureForm, w: f32, d: f32, rng: &mut impl Rng) {
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, 0.06, 0.0),
        Vec3::new(w, 0.12, d),
        GRASS,
    );
    if form.preview {
        tree(form, 0.0, 0.12, 0.0, TREE_SCALES[0]);
        return;
    }
    let area_tiles = ((w / TILE_SIZE) * (d / TILE_SIZE)) as usize;
    let tree_count = 2 + area_tiles;
    for i in 0..tree_count {
        let scale = TREE_SCALES[i % TREE_SCALES.len()];
        if let Some((x, z)) = scatter_point(w * 0.5, d * 0.5, 0.4 * scale + 0.15, rng) {
            tree(form, x, 0.12, z, scale);
        }
    }
    for i in 0..2 {
        let scale = 0.8 + 0.3 * i as f32;
        if let Some((x, z)) = scatter_point(w * 0.5, d * 0.5, 0.3 * scale, rng) {
            rock(form, x, z, scale);
        }
    }
}

/// Landfill: a dirt pad with refuse piles. Pile sizes follow the fixed
/// scale cycle; only their placement is random.
pub fn landfill(form: &mut StructureForm, w: f32, d: f32, rng: &mut impl Rng) {
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, 0.12, 0.0),
        Vec3::new(w, 0.24, d),
        DIRT,
    );
    let pile = |form: &mut StructureForm, x: f32, z: f32, scale: f32| {
        form.solid(
            ShapeKind::Pyramid,
            Vec3::new(x, 0.24 + 0.55 * scale, z),
            Vec3::new(1.5 * scale, 1.1 * scale, 1.5 * scale),
            REFUSE,
        );
    };
    if form.preview {
        pile(form, 0.0, 0.0, PILE_SCALES[0]);
        return;
    }
    let area_tiles = ((w / TILE_SIZE) * (d / TILE_SIZE)) as usize;
    let pile_count = 2 + area_tiles / 2;
    for i in 0..pile_count {
        let scale = PILE_SCALES[i % PILE_SCALES.len()];
        if let Some((x, z)) = scatter_point(w * 0.5, d * 0.5, 0.75 * scale + 0.1, rng) {
            pile(form, x, z, scale);
        }
    }
}

/// A single paved tile with a faded center stripe.
pub fn road_slab(form: &mut StructureForm, ty: &StructureType, w: f32, d: f32) {
    let asphalt = [ty.base_color[0], ty.base_color[1], ty.base_color[2], 1.0];
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, 0.06, 0.0),
        Vec3::new(w, 0.12, d),
        asphalt,
    );
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, 0.13, 0.0),
        Vec3::new(w * 0.7, 0.02, 0.14),
        STRIPE,
    );
}

/// Flat marker for the de-zone tool footprint.
pub fn tool_marker(form: &mut StructureForm, ty: &StructureType, w: f32, d: f32) {
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, 0.03, 0.0),
        Vec3::new(w * 0.9, 0.06, d * 0.9),
        [ty.base_color[0], ty.base_color[1], ty.base_color[2], 1.0],
    );
}
