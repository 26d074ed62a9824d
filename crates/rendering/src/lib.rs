//! 3D presentation layer: camera, procedural structure forms, placement
//! input, day/night lighting, and weather effects.

use bevy::prelude::*;

pub mod camera;
pub mod cursor_preview;
pub mod day_night;
pub mod egui_guard;
pub mod forms;
pub mod input;
pub mod mesh_data;
pub mod structure_render;
pub mod weather_fx;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::OrbitCamera>()
            .init_resource::<camera::CameraDrag>()
            .init_resource::<input::ActiveTool>()
            .init_resource::<input::ActiveVariant>()
            .init_resource::<input::ActiveRotation>()
            .init_resource::<input::CursorGridPos>()
            .init_resource::<input::SelectedStructure>()
            .init_resource::<input::StatusMessage>()
            .init_resource::<cursor_preview::PreviewState>()
            .init_resource::<day_night::SkyState>()
            .insert_resource(ClearColor(Color::srgb(0.53, 0.73, 0.92)))
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    structure_render::spawn_ground,
                    structure_render::setup_structure_materials,
                    cursor_preview::setup_preview_materials,
                    day_night::spawn_sun,
                    weather_fx::spawn_rain,
                    weather_fx::spawn_stars,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::pan_camera,
                    camera::orbit_and_zoom_camera,
                    camera::apply_camera_transform,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_grid_pos,
                    input::keyboard_tool_switch,
                    input::handle_tool_input,
                    input::tick_status_message,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    structure_render::sync_structure_meshes,
                    cursor_preview::update_cursor_preview,
                    cursor_preview::tint_cursor_preview,
                    cursor_preview::draw_placement_grid,
                )
                    .after(input::handle_tool_input),
            )
            .add_systems(
                Update,
                (
                    day_night::update_day_night_cycle,
                    day_night::update_sky,
                    day_night::update_window_emissive,
                    weather_fx::update_rain,
                    weather_fx::update_stars,
                    weather_fx::announce_weather_change,
                ),
            );
    }
}
