use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::catalog::StructureCatalog;
use simulation::economy::Treasury;
use simulation::placement::{demolish, try_place};
use simulation::spatial::structure_at;
use simulation::structures::{snap_to_tile, City, Rotation, StructureId, StructureSetChanged};

use crate::egui_guard::egui_wants_pointer;

/// Which tool the pointer currently wields. `Place` carries a catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Resource)]
pub enum ActiveTool {
    #[default]
    Inspect,
    Place(String),
    Demolish,
}

impl ActiveTool {
    pub fn label<'a>(&'a self, catalog: &'a StructureCatalog) -> &'a str {
        match self {
            ActiveTool::Inspect => "Inspect",
            ActiveTool::Demolish => "Demolish",
            ActiveTool::Place(id) => catalog.get(id).map_or("Build", |ty| ty.name.as_str()),
        }
    }
}

/// Variant index for the next placement; cycled with Tab.
#[derive(Resource, Default)]
pub struct ActiveVariant(pub u8);

/// Zoned types carry three visual variants, so the cycle stays in 0..3.
pub const VARIANT_COUNT: u8 = 3;

fn next_variant(variant: u8) -> u8 {
    (variant + 1) % VARIANT_COUNT
}

/// Rotation for the next placement; cycled with R.
#[derive(Resource, Default)]
pub struct ActiveRotation(pub Rotation);

#[derive(Resource, Default)]
pub struct CursorGridPos {
    pub world: Vec2,
    /// Cursor snapped to the nearest tile center.
    pub snapped: Vec2,
    pub valid: bool,
}

/// Currently inspected structure.
#[derive(Resource, Default)]
pub struct SelectedStructure(pub Option<StructureId>);

/// Status message shown briefly on screen.
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = 3.0;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}

pub fn update_cursor_grid_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut cursor: ResMut<CursorGridPos>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    cursor.valid = false;
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    // Ray-plane intersection against the Y=0 ground plane
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };
    if ray.direction.y.abs() <= 0.001 {
        return;
    }
    let t = -ray.origin.y / ray.direction.y;
    if t <= 0.0 {
        return;
    }
    let hit = ray.origin + ray.direction * t;
    cursor.world = Vec2::new(hit.x, hit.z);
    cursor.snapped = Vec2::new(snap_to_tile(hit.x), snap_to_tile(hit.z));
    cursor.valid = true;
}

/// Keyboard bindings that don't depend on the cursor: Tab cycles the
/// variant, R rotates, Escape drops back to inspect.
pub fn keyboard_tool_switch(
    keys: Res<ButtonInput<KeyCode>>,
    mut tool: ResMut<ActiveTool>,
    mut variant: ResMut<ActiveVariant>,
    mut rotation: ResMut<ActiveRotation>,
    mut selected: ResMut<SelectedStructure>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        *tool = ActiveTool::Inspect;
        selected.0 = None;
    }
    if keys.just_pressed(KeyCode::Tab) {
        variant.0 = next_variant(variant.0);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        rotation.0 = rotation.0.next();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_tool_input(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorGridPos>,
    tool: Res<ActiveTool>,
    variant: Res<ActiveVariant>,
    rotation: Res<ActiveRotation>,
    catalog: Res<StructureCatalog>,
    mut city: ResMut<City>,
    mut treasury: ResMut<Treasury>,
    mut status: ResMut<StatusMessage>,
    mut selected: ResMut<SelectedStructure>,
    mut changes: EventWriter<StructureSetChanged>,
) {
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) || !cursor.valid {
        return;
    }

    match &*tool {
        ActiveTool::Inspect => {
            selected.0 = structure_at(&city, &catalog, cursor.world.x, cursor.world.y);
            if selected.0.is_none() {
                status.set("Nothing here", false);
            }
        }
        ActiveTool::Demolish => {
            if let Some(id) = remove_under_pointer(&city, &catalog, &cursor, &mut status) {
                if demolish_and_notify(&mut city, id, &mut changes, &mut selected) {
                    status.set("Demolished", false);
                }
            }
        }
        // The de-zone tool is a catalog entry but acts as a remover.
        ActiveTool::Place(type_id) if catalog.get(type_id).is_some_and(|ty| ty.category.is_tool()) =>
        {
            if let Some(id) = remove_under_pointer(&city, &catalog, &cursor, &mut status) {
                if demolish_and_notify(&mut city, id, &mut changes, &mut selected) {
                    status.set("Removed", false);
                }
            }
        }
        ActiveTool::Place(type_id) => {
            match try_place(
                &mut city,
                &mut treasury,
                &catalog,
                type_id,
                cursor.snapped.x,
                cursor.snapped.y,
                rotation.0,
                variant.0,
            ) {
                Ok(id) => {
                    changes.send(StructureSetChanged::Placed(id));
                    if let Some(ty) = catalog.get(type_id) {
                        status.set(format!("Built {} (-${})", ty.name, ty.cost), false);
                    }
                }
                Err(err) => status.set(err.to_string(), true),
            }
        }
    }
}

fn remove_under_pointer(
    city: &City,
    catalog: &StructureCatalog,
    cursor: &CursorGridPos,
    status: &mut StatusMessage,
) -> Option<StructureId> {
    let hit = structure_at(city, catalog, cursor.world.x, cursor.world.y);
    if hit.is_none() {
        status.set("Nothing to demolish", false);
    }
    hit
}

fn demolish_and_notify(
    city: &mut City,
    id: StructureId,
    changes: &mut EventWriter<StructureSetChanged>,
    selected: &mut SelectedStructure,
) -> bool {
    if !demolish(city, id) {
        return false;
    }
    changes.send(StructureSetChanged::Removed(id));
    if selected.0 == Some(id) {
        selected.0 = None;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_expires() {
        let mut status = StatusMessage::default();
        assert!(!status.active());
        status.set("hello", false);
        assert!(status.active());
        status.timer = 0.0;
        assert!(!status.active());
    }

    #[test]
    fn default_tool_is_inspect() {
        assert_eq!(ActiveTool::default(), ActiveTool::Inspect);
    }

    #[test]
    fn variant_cycle_wraps_within_the_variant_count() {
        assert_eq!(next_variant(0), 1);
        assert_eq!(next_variant(1), 2);
        assert_eq!(next_variant(2), 0);
        let mut v = 0;
        for _ in 0..VARIANT_COUNT {
            v = next_variant(v);
        }
        assert_eq!(v, 0);
    }
}
