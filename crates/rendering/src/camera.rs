use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use simulation::config::WORLD_HALF;

const PAN_SPEED: f32 = 60.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 350.0;
const MIN_PITCH: f32 = 15.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbital camera model: the camera orbits around a focus point on the
/// ground plane.
#[derive(Resource)]
pub struct OrbitCamera {
    /// Ground point the camera looks at.
    pub focus: Vec3,
    /// Horizontal rotation in radians.
    pub yaw: f32,
    /// Elevation angle in radians, clamped to [MIN_PITCH, MAX_PITCH].
    pub pitch: f32,
    /// Distance from the focus point.
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 50.0_f32.to_radians(),
            distance: 90.0,
        }
    }
}

/// Tracks middle-mouse orbit drag state.
#[derive(Resource, Default)]
pub struct CameraDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera3d::default(), Transform::default()));
}

/// WASD/arrow panning in the camera's ground-plane frame.
pub fn pan_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }
    let dir = dir.normalize();
    let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
    let forward = Vec3::new(sin_yaw, 0.0, cos_yaw);
    let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
    let speed = PAN_SPEED * (orbit.distance / 90.0).clamp(0.3, 3.0);
    orbit.focus += (forward * dir.y + right * dir.x) * speed * time.delta_secs();
    orbit.focus.x = orbit.focus.x.clamp(-WORLD_HALF, WORLD_HALF);
    orbit.focus.z = orbit.focus.z.clamp(-WORLD_HALF, WORLD_HALF);
}

/// Middle-mouse drag orbits; scroll wheel zooms.
pub fn orbit_and_zoom_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut scroll: EventReader<MouseWheel>,
    mut drag: ResMut<CameraDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Middle) {
        if let Some(pos) = cursor {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }
    if buttons.just_released(MouseButton::Middle) {
        drag.dragging = false;
    }
    if drag.dragging {
        if let Some(pos) = cursor {
            let delta = pos - drag.last_pos;
            drag.last_pos = pos;
            orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
        }
    }

    for ev in scroll.read() {
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
        orbit.distance =
            (orbit.distance * (1.0 - amount * ZOOM_SPEED)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Writes the orbital model into the camera transform each frame.
pub fn apply_camera_transform(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = orbit.pitch.sin_cos();
    let offset = Vec3::new(
        sin_yaw * cos_pitch * orbit.distance,
        sin_pitch * orbit.distance,
        cos_yaw * cos_pitch * orbit.distance,
    );
    *transform = Transform::from_translation(orbit.focus + offset)
        .looking_at(orbit.focus, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_focus_is_grid_center() {
        let orbit = OrbitCamera::default();
        assert_eq!(orbit.focus, Vec3::ZERO);
        assert!(orbit.pitch >= MIN_PITCH && orbit.pitch <= MAX_PITCH);
    }
}
