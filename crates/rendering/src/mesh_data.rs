//! `MeshData` helper for lowering procedural structure forms into
//! vertex-colored triangle meshes built from cuboids, cylinders,
//! pyramids, and roof prisms.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::forms::{ShapeKind, StructureForm, Surface};

// ---------------------------------------------------------------------------
// Color helpers
// ---------------------------------------------------------------------------

pub(crate) fn lighten(c: [f32; 4], factor: f32) -> [f32; 4] {
    [
        (c[0] * factor).min(1.0),
        (c[1] * factor).min(1.0),
        (c[2] * factor).min(1.0),
        c[3],
    ]
}

pub(crate) fn darken(c: [f32; 4], factor: f32) -> [f32; 4] {
    [c[0] * factor, c[1] * factor, c[2] * factor, c[3]]
}

// ---------------------------------------------------------------------------
// MeshData
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 4]) {
        let base = self.positions.len() as u32;
        for c in corners {
            self.positions.push(c.to_array());
            self.normals.push(normal.to_array());
            self.colors.push(color);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn tri(&mut self, corners: [Vec3; 3], color: [f32; 4]) {
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();
        let base = self.positions.len() as u32;
        for c in corners {
            self.positions.push(c.to_array());
            self.normals.push(normal.to_array());
            self.colors.push(color);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Axis-aligned cuboid with per-face shading so unlit previews still
    /// read as volumes.
    pub fn add_cuboid(&mut self, center: Vec3, size: Vec3, color: [f32; 4]) {
        let h = size * 0.5;
        let (x0, x1) = (center.x - h.x, center.x + h.x);
        let (y0, y1) = (center.y - h.y, center.y + h.y);
        let (z0, z1) = (center.z - h.z, center.z + h.z);

        // front (+z)
        self.quad(
            [
                Vec3::new(x0, y0, z1),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y1, z1),
                Vec3::new(x0, y1, z1),
            ],
            Vec3::Z,
            darken(color, 0.85),
        );
        // back (-z)
        self.quad(
            [
                Vec3::new(x1, y0, z0),
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y1, z0),
                Vec3::new(x1, y1, z0),
            ],
            Vec3::NEG_Z,
            darken(color, 0.75),
        );
        // top (+y)
        self.quad(
            [
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y1, z1),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z0),
            ],
            Vec3::Y,
            lighten(color, 1.3),
        );
        // bottom (-y)
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::NEG_Y,
            darken(color, 0.5),
        );
        // right (+x)
        self.quad(
            [
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x1, y1, z1),
            ],
            Vec3::X,
            darken(color, 0.7),
        );
        // left (-x)
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y0, z1),
                Vec3::new(x0, y1, z1),
                Vec3::new(x0, y1, z0),
            ],
            Vec3::NEG_X,
            darken(color, 0.65),
        );
    }

    /// Upright cylinder around `center`.
    pub fn add_cylinder(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: [f32; 4],
    ) {
        let y0 = center.y - height * 0.5;
        let y1 = center.y + height * 0.5;
        let side = darken(color, 0.8);
        let top = lighten(color, 1.2);
        for i in 0..segments {
            let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
            let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            let p0 = Vec3::new(center.x + c0 * radius, y0, center.z + s0 * radius);
            let p1 = Vec3::new(center.x + c1 * radius, y0, center.z + s1 * radius);
            let p2 = Vec3::new(center.x + c1 * radius, y1, center.z + s1 * radius);
            let p3 = Vec3::new(center.x + c0 * radius, y1, center.z + s0 * radius);
            let normal = Vec3::new((c0 + c1) * 0.5, 0.0, (s0 + s1) * 0.5).normalize_or_zero();
            self.quad([p1, p0, p3, p2], normal, side);
            // top fan
            self.tri(
                [
                    Vec3::new(center.x, y1, center.z),
                    Vec3::new(center.x + c1 * radius, y1, center.z + s1 * radius),
                    Vec3::new(center.x + c0 * radius, y1, center.z + s0 * radius),
                ],
                top,
            );
        }
    }

    /// Square-based pyramid; `size.y` is the height, apex centered.
    pub fn add_pyramid(&mut self, center: Vec3, size: Vec3, color: [f32; 4]) {
        let h = size * 0.5;
        let y0 = center.y - h.y;
        let apex = Vec3::new(center.x, center.y + h.y, center.z);
        let corners = [
            Vec3::new(center.x - h.x, y0, center.z - h.z),
            Vec3::new(center.x + h.x, y0, center.z - h.z),
            Vec3::new(center.x + h.x, y0, center.z + h.z),
            Vec3::new(center.x - h.x, y0, center.z + h.z),
        ];
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            self.tri([b, a, apex], darken(color, 0.8 + 0.05 * i as f32));
        }
        self.quad(
            [corners[0], corners[1], corners[2], corners[3]],
            Vec3::NEG_Y,
            darken(color, 0.5),
        );
    }

    /// Triangular prism with the ridge running along x; used for pitched
    /// roofs.
    pub fn add_roof_prism(&mut self, center: Vec3, size: Vec3, color: [f32; 4]) {
        let h = size * 0.5;
        let y0 = center.y - h.y;
        let y1 = center.y + h.y;
        let ridge_a = Vec3::new(center.x - h.x, y1, center.z);
        let ridge_b = Vec3::new(center.x + h.x, y1, center.z);
        let base = [
            Vec3::new(center.x - h.x, y0, center.z - h.z),
            Vec3::new(center.x + h.x, y0, center.z - h.z),
            Vec3::new(center.x + h.x, y0, center.z + h.z),
            Vec3::new(center.x - h.x, y0, center.z + h.z),
        ];
        // Slopes
        let slope_n = Vec3::new(0.0, h.z, -h.y).normalize_or_zero();
        self.quad([base[1], base[0], ridge_a, ridge_b], slope_n, color);
        let slope_s = Vec3::new(0.0, h.z, h.y).normalize_or_zero();
        self.quad([base[3], base[2], ridge_b, ridge_a], slope_s, darken(color, 0.9));
        // Gable ends
        self.tri([base[0], base[3], ridge_a], darken(color, 0.7));
        self.tri([base[2], base[1], ridge_b], darken(color, 0.7));
        // Underside
        self.quad(
            [base[0], base[1], base[2], base[3]],
            Vec3::NEG_Y,
            darken(color, 0.5),
        );
    }

    pub fn into_mesh(self) -> Mesh {
        let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; self.positions.len()];
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Lower a structure form into a matte body mesh and, when the form has
/// glazing surfaces, a separate glazing mesh sharing the night-emissive
/// material.
pub fn lower_form(form: &StructureForm) -> (Mesh, Option<Mesh>) {
    let mut body = MeshData::new();
    let mut glass = MeshData::new();
    for p in &form.primitives {
        let target = match p.surface {
            Surface::Matte => &mut body,
            Surface::Glazing => &mut glass,
        };
        match p.kind {
            ShapeKind::Box => target.add_cuboid(p.center, p.size, p.color),
            ShapeKind::Cylinder => {
                target.add_cylinder(p.center, p.size.x * 0.5, p.size.y, 8, p.color)
            }
            ShapeKind::Pyramid => target.add_pyramid(p.center, p.size, p.color),
            ShapeKind::RoofPrism => target.add_roof_prism(p.center, p.size, p.color),
        }
    }
    let glazing = (!glass.is_empty()).then(|| glass.into_mesh());
    (body.into_mesh(), glazing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_emits_six_faces() {
        let mut m = MeshData::new();
        m.add_cuboid(Vec3::ZERO, Vec3::ONE, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.positions.len(), 24);
        assert_eq!(m.indices.len(), 36);
    }

    #[test]
    fn pyramid_emits_four_sides_and_a_base() {
        let mut m = MeshData::new();
        m.add_pyramid(Vec3::ZERO, Vec3::ONE, [1.0; 4]);
        // 4 triangles + 1 quad
        assert_eq!(m.indices.len(), 4 * 3 + 6);
    }

    #[test]
    fn lighten_saturates() {
        let c = lighten([0.9, 0.9, 0.9, 1.0], 2.0);
        assert_eq!(c, [1.0, 1.0, 1.0, 1.0]);
    }
}
