//! Egui panels: the top stats bar, the build palette, and the structure
//! inspector.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod inspector;
pub mod toolbar;
mod widgets;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<toolbar::OpenCategory>()
            .add_systems(Update, (toolbar::toolbar_ui, inspector::inspector_ui));
    }
}
