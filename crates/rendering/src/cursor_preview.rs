//! Ghost preview of the structure about to be placed.
//!
//! The preview silhouette is rebuilt only when the hovered tile, the
//! selected type, or the variant changes; validity tinting is refreshed
//! every frame since funds and occupancy can change underneath a static
//! cursor.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use simulation::catalog::{StructureCatalog, StructureType};
use simulation::config::TILE_SIZE;
use simulation::economy::Treasury;
use simulation::sim_rng::SimRng;
use simulation::spatial::{is_occupied, structure_at};
use simulation::structures::City;

use crate::forms::synthesize;
use crate::input::{ActiveRotation, ActiveTool, ActiveVariant, CursorGridPos};
use crate::mesh_data::lower_form;

#[derive(Component)]
pub struct PreviewMesh;

#[derive(Resource)]
pub struct PreviewMaterials {
    pub valid: Handle<StandardMaterial>,
    pub invalid: Handle<StandardMaterial>,
}

/// Key of the currently built ghost; `None` when no ghost is up.
#[derive(Resource, Default)]
pub struct PreviewState {
    key: Option<(String, u8, IVec2)>,
}

pub fn setup_preview_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ghost = |color: Color| StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    };
    commands.insert_resource(PreviewMaterials {
        valid: materials.add(ghost(Color::srgba(0.3, 0.9, 0.4, 0.45))),
        invalid: materials.add(ghost(Color::srgba(0.95, 0.25, 0.2, 0.45))),
    });
}

fn tile_key(snapped: Vec2) -> IVec2 {
    IVec2::new(
        (snapped.x / TILE_SIZE).floor() as i32,
        (snapped.y / TILE_SIZE).floor() as i32,
    )
}

/// Rebuild the ghost when the (type, variant, tile) triple changes, and
/// tear it down when the active tool is not a placement tool.
#[allow(clippy::too_many_arguments)]
pub fn update_cursor_preview(
    tool: Res<ActiveTool>,
    variant: Res<ActiveVariant>,
    rotation: Res<ActiveRotation>,
    cursor: Res<CursorGridPos>,
    catalog: Res<StructureCatalog>,
    mats: Res<PreviewMaterials>,
    mut state: ResMut<PreviewState>,
    mut rng: ResMut<SimRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    ghosts: Query<Entity, With<PreviewMesh>>,
    mut commands: Commands,
) {
    let wanted = match (&*tool, cursor.valid) {
        (ActiveTool::Place(type_id), true) => {
            Some((type_id.clone(), variant.0, tile_key(cursor.snapped)))
        }
        _ => None,
    };

    if state.key == wanted {
        return;
    }
    for entity in &ghosts {
        commands.entity(entity).despawn_recursive();
    }
    state.key = wanted;

    let Some((type_id, variant, _)) = &state.key else {
        return;
    };
    let Some(ty) = catalog.get(type_id) else {
        return;
    };
    let form = synthesize(ty, *variant, true, &mut rng.0);
    let (body, glazing) = lower_form(&form);
    let transform = Transform::from_xyz(cursor.snapped.x, 0.0, cursor.snapped.y)
        .with_rotation(Quat::from_rotation_y(rotation.0.radians()));
    commands
        .spawn((PreviewMesh, transform, Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(body)),
                MeshMaterial3d(mats.valid.clone()),
                NotShadowCaster,
            ));
            if let Some(glass) = glazing {
                parent.spawn((
                    Mesh3d(meshes.add(glass)),
                    MeshMaterial3d(mats.valid.clone()),
                    NotShadowCaster,
                ));
            }
        });
}

/// Whether the ghost should read as blocked. Removal tools invert the
/// usual rule: they want a structure under the pointer, and cost and
/// occupancy don't apply.
fn ghost_blocked(
    city: &City,
    catalog: &StructureCatalog,
    ty: &StructureType,
    cursor: &CursorGridPos,
    funds: i64,
) -> bool {
    if ty.category.is_tool() {
        return structure_at(city, catalog, cursor.world.x, cursor.world.y).is_none();
    }
    is_occupied(
        city,
        catalog,
        cursor.snapped.x,
        cursor.snapped.y,
        ty.width,
        ty.depth,
    ) || funds < ty.cost
}

/// Retint the ghost every frame from occupancy and funds.
pub fn tint_cursor_preview(
    tool: Res<ActiveTool>,
    cursor: Res<CursorGridPos>,
    catalog: Res<StructureCatalog>,
    city: Res<City>,
    treasury: Res<Treasury>,
    mats: Res<PreviewMaterials>,
    ghosts: Query<&Children, With<PreviewMesh>>,
    mut parts: Query<&mut MeshMaterial3d<StandardMaterial>, With<NotShadowCaster>>,
) {
    let ActiveTool::Place(type_id) = &*tool else {
        return;
    };
    let Some(ty) = catalog.get(type_id) else {
        return;
    };
    let blocked = ghost_blocked(&city, &catalog, ty, &cursor, treasury.funds);
    let target = if blocked {
        &mats.invalid
    } else {
        &mats.valid
    };
    for children in &ghosts {
        for &child in children {
            if let Ok(mut material) = parts.get_mut(child) {
                if material.0 != *target {
                    material.0 = target.clone();
                }
            }
        }
    }
}

/// Faint tile grid around the cursor while a placement tool is active.
pub fn draw_placement_grid(
    tool: Res<ActiveTool>,
    cursor: Res<CursorGridPos>,
    mut gizmos: Gizmos,
) {
    if !matches!(*tool, ActiveTool::Place(_)) || !cursor.valid {
        return;
    }
    let color = Color::srgba(1.0, 1.0, 1.0, 0.15);
    let reach = 5;
    let base_x = (cursor.snapped.x / TILE_SIZE).floor() * TILE_SIZE;
    let base_z = (cursor.snapped.y / TILE_SIZE).floor() * TILE_SIZE;
    for i in -reach..=reach + 1 {
        let offset = i as f32 * TILE_SIZE;
        let span = reach as f32 * TILE_SIZE;
        gizmos.line(
            Vec3::new(base_x + offset, 0.02, base_z - span),
            Vec3::new(base_x + offset, 0.02, base_z + span + TILE_SIZE),
            color,
        );
        gizmos.line(
            Vec3::new(base_x - span, 0.02, base_z + offset),
            Vec3::new(base_x + span + TILE_SIZE, 0.02, base_z + offset),
            color,
        );
    }
}
