//! The three zoned-category recipes: glazed tower, masonry block, and
//! stepped massing with planted terraces.

use bevy::prelude::*;
use rand::Rng;

use simulation::catalog::{Category, StructureType};

use super::{props, ShapeKind, StructureForm};
use crate::mesh_data::{darken, lighten};

const GLASS: [f32; 4] = [0.55, 0.70, 0.80, 1.0];
const TIMBER: [f32; 4] = [0.45, 0.33, 0.22, 1.0];

fn wall_color(ty: &StructureType) -> [f32; 4] {
    [ty.base_color[0], ty.base_color[1], ty.base_color[2], 1.0]
}

/// Variant 0: a simple tower with emissive curtain-wall glazing bands on
/// all four facades and a rooftop slab.
pub fn tower(form: &mut StructureForm, ty: &StructureType, w: f32, d: f32) {
    let h = ty.height;
    let wall = wall_color(ty);
    let bw = w * 0.78;
    let bd = d * 0.78;

    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, h * 0.5, 0.0),
        Vec3::new(bw, h, bd),
        wall,
    );

    if form.preview {
        // One full-height plate per facade keeps the glazed look without
        // the per-floor band count.
        glazing_plates(form, bw, bd, h * 0.5, h * 0.9);
    } else {
        let floors = (h / 3.0).ceil().max(1.0) as u32;
        let floor_h = h / floors as f32;
        for i in 0..floors {
            let y = (i as f32 + 0.5) * floor_h;
            glazing_plates(form, bw, bd, y, floor_h * 0.55);
        }
    }

    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, h + 0.1, 0.0),
        Vec3::new(bw * 1.05, 0.2, bd * 1.05),
        darken(wall, 0.6),
    );
}

/// A glazing strip on each of the four facades at the given height.
fn glazing_plates(form: &mut StructureForm, bw: f32, bd: f32, y: f32, strip_h: f32) {
    let proud = 0.03;
    form.glazing(
        Vec3::new(0.0, y, bd * 0.5 + proud),
        Vec3::new(bw * 0.88, strip_h, 0.05),
        GLASS,
    );
    form.glazing(
        Vec3::new(0.0, y, -(bd * 0.5 + proud)),
        Vec3::new(bw * 0.88, strip_h, 0.05),
        GLASS,
    );
    form.glazing(
        Vec3::new(bw * 0.5 + proud, y, 0.0),
        Vec3::new(0.05, strip_h, bd * 0.88),
        GLASS,
    );
    form.glazing(
        Vec3::new(-(bw * 0.5 + proud), y, 0.0),
        Vec3::new(0.05, strip_h, bd * 0.88),
        GLASS,
    );
}

/// Variant 1: a masonry block on a plinth with a cornice, per-floor
/// punched windows, and a pitched roof for residential types.
pub fn masonry(form: &mut StructureForm, ty: &StructureType, w: f32, d: f32) {
    let wall = wall_color(ty);
    let pitched = ty.category == Category::Residential;
    let roof_h = if pitched { ty.height * 0.25 } else { 0.0 };
    let h = ty.height - roof_h;

    let plinth_h = (h * 0.08).max(0.3);
    let bw = w * 0.84;
    let bd = d * 0.84;

    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, plinth_h * 0.5, 0.0),
        Vec3::new(w * 0.92, plinth_h, d * 0.92),
        darken(wall, 0.7),
    );
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, h * 0.5, 0.0),
        Vec3::new(bw, h - plinth_h, bd),
        wall,
    );
    // Cornice
    form.solid(
        ShapeKind::Box,
        Vec3::new(0.0, h - 0.15, 0.0),
        Vec3::new(w * 0.92, 0.3, d * 0.92),
        lighten(wall, 1.25),
    );

    if !form.preview {
        punched_windows(form, ty, bw, bd, plinth_h, h - plinth_h - 0.4);
    }

    if pitched {
        form.solid(
            ShapeKind::RoofPrism,
            Vec3::new(0.0, h + roof_h * 0.5, 0.0),
            Vec3::new(w * 0.94, roof_h, d * 0.94),
            [0.48, 0.22, 0.18, 1.0],
        );
    } else {
        form.solid(
            ShapeKind::Box,
            Vec3::new(0.0, h + 0.08, 0.0),
            Vec3::new(bw * 0.9, 0.16, bd * 0.9),
            darken(wall, 0.55),
        );
    }
}

/// Rows of small punched windows on the front and back facades.
fn punched_windows(
    form: &mut StructureForm,
    ty: &StructureType,
    bw: f32,
    bd: f32,
    base_y: f32,
    span_h: f32,
) {
    let floors = (span_h / 2.6).ceil().max(1.0) as u32;
    let cols = (ty.width * 2).max(2);
    let floor_h = span_h / floors as f32;
    for floor in 0..floors {
        let y = base_y + (floor as f32 + 0.5) * floor_h;
        for col in 0..cols {
            let x = (col as f32 + 0.5) / cols as f32 * bw * 0.9 - bw * 0.45;
            for sign in [1.0f32, -1.0] {
                form.glazing(
                    Vec3::new(x, y, sign * (bd * 0.5 + 0.02)),
                    Vec3::new(0.4, 0.55, 0.04),
                    GLASS,
                );
            }
        }
    }
}

/// Variant 2: stepped massing with alternating wall/timber bands,
/// emissive glazing per tier, and planted terraces on the setbacks.
pub fn stepped(form: &mut StructureForm, ty: &StructureType, w: f32, d: f32, rng: &mut impl Rng) {
    let h = ty.height;
    let wall = wall_color(ty);
    let tiers = ((h / 3.5).round() as u32).clamp(2, 4);
    let tier_h = h / tiers as f32;

    let mut extents = Vec::with_capacity(tiers as usize + 1);
    for i in 0..tiers {
        let f = 1.0 - 0.22 * i as f32;
        extents.push(Vec2::new(w * 0.86 * f, d * 0.86 * f));
    }

    for i in 0..tiers as usize {
        let e = extents[i];
        let y0 = i as f32 * tier_h;
        let band = if i % 2 == 0 { wall } else { TIMBER };

        form.solid(
            ShapeKind::Box,
            Vec3::new(0.0, y0 + tier_h * 0.5, 0.0),
            Vec3::new(e.x, tier_h, e.y),
            band,
        );
        // Trim strip at the tier top.
        form.solid(
            ShapeKind::Box,
            Vec3::new(0.0, y0 + tier_h - 0.06, 0.0),
            Vec3::new(e.x * 1.03, 0.12, e.y * 1.03),
            darken(wall, 0.6),
        );
        // Glazing strip on the front facade of each tier.
        form.glazing(
            Vec3::new(0.0, y0 + tier_h * 0.5, e.y * 0.5 + 0.03),
            Vec3::new(e.x * 0.7, tier_h * 0.45, 0.05),
            GLASS,
        );

        // Planted terrace on the setback ring above this tier, when the
        // ring is wide enough to hold a canopy.
        if !form.preview && i + 1 < tiers as usize {
            let inner = extents[i + 1];
            if terrace_band(e, inner) > 0.0 {
                let terrace_y = y0 + tier_h;
                for _ in 0..2 {
                    let (x, z) = terrace_corner(e, inner, rng);
                    props::terrace_tree(form, x, terrace_y, z);
                }
            }
        }
    }
}

const TERRACE_MARGIN: f32 = 0.25;

/// Usable width of the setback ring between two tiers.
fn terrace_band(outer: Vec2, inner: Vec2) -> f32 {
    (outer.x * 0.5 - TERRACE_MARGIN) - (inner.x * 0.5 + TERRACE_MARGIN)
}

/// Random position on the terrace ring: outside the next tier's
/// footprint but inside this tier's, with margin for the canopy.
fn terrace_corner(outer: Vec2, inner: Vec2, rng: &mut impl Rng) -> (f32, f32) {
    let band = terrace_band(outer, inner);
    let sx = if rng.gen::<bool>() { 1.0 } else { -1.0 };
    let sz = if rng.gen::<bool>() { 1.0 } else { -1.0 };
    let x = sx * (inner.x * 0.5 + TERRACE_MARGIN + rng.gen::<f32>() * band);
    let z = sz * rng.gen::<f32>() * (outer.y * 0.5 - TERRACE_MARGIN);
    (x, z)
}
