//! Spawns and despawns the 3D representation of placed structures.
//!
//! Meshes are rebuilt only in response to `StructureSetChanged` events;
//! a committed structure's form is synthesized once and never touched
//! again, so its decorative scatter stays put for the session.

use bevy::prelude::*;

use simulation::catalog::StructureCatalog;
use simulation::config::{GRID_SIZE, TILE_SIZE};
use simulation::sim_rng::SimRng;
use simulation::structures::{City, StructureId, StructureSetChanged};

use crate::forms::synthesize;
use crate::mesh_data::lower_form;

/// Marks the root entity of a rendered structure.
#[derive(Component)]
pub struct StructureMesh {
    pub id: StructureId,
}

/// Shared materials for structure bodies and window glazing. The glazing
/// material's emissive term is driven by the day/night cycle.
#[derive(Resource)]
pub struct StructureMaterials {
    pub body: Handle<StandardMaterial>,
    pub glazing: Handle<StandardMaterial>,
}

pub fn setup_structure_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        ..default()
    });
    let glazing = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.9, 0.95),
        perceptual_roughness: 0.2,
        metallic: 0.1,
        emissive: LinearRgba::BLACK,
        ..default()
    });
    commands.insert_resource(StructureMaterials { body, glazing });
}

pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = GRID_SIZE as f32 * TILE_SIZE;
    let mesh = meshes.add(Plane3d::default().mesh().size(side, side));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.42, 0.27),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((Mesh3d(mesh), MeshMaterial3d(material), Transform::IDENTITY));
}

/// Reacts to placement and demolition by spawning and despawning the
/// corresponding mesh hierarchies.
#[allow(clippy::too_many_arguments)]
pub fn sync_structure_meshes(
    mut events: EventReader<StructureSetChanged>,
    city: Res<City>,
    catalog: Res<StructureCatalog>,
    mats: Res<StructureMaterials>,
    mut rng: ResMut<SimRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    rendered: Query<(Entity, &StructureMesh)>,
    mut commands: Commands,
) {
    for event in events.read() {
        match *event {
            StructureSetChanged::Placed(id) => {
                let Some(placed) = city.get(id) else {
                    warn!("placed structure {:?} vanished before render", id);
                    continue;
                };
                let Some(ty) = catalog.get(&placed.type_id) else {
                    warn!("unknown structure type '{}'", placed.type_id);
                    continue;
                };
                let form = synthesize(ty, placed.variant, false, &mut rng.0);
                let (body, glazing) = lower_form(&form);
                let transform = Transform::from_xyz(placed.x, 0.0, placed.z)
                    .with_rotation(Quat::from_rotation_y(placed.rotation.radians()));
                commands
                    .spawn((StructureMesh { id }, transform, Visibility::default()))
                    .with_children(|parent| {
                        parent.spawn((
                            Mesh3d(meshes.add(body)),
                            MeshMaterial3d(mats.body.clone()),
                        ));
                        if let Some(glass) = glazing {
                            parent.spawn((
                                Mesh3d(meshes.add(glass)),
                                MeshMaterial3d(mats.glazing.clone()),
                            ));
                        }
                    });
            }
            StructureSetChanged::Removed(id) => {
                for (entity, mesh) in &rendered {
                    if mesh.id == id {
                        commands.entity(entity).despawn_recursive();
                    }
                }
            }
        }
    }
}
