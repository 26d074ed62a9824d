use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::catalog::StructureCatalog;
use simulation::placement::demolish;
use simulation::structures::{City, StructureSetChanged};

use rendering::input::SelectedStructure;

/// Floating window describing the structure picked with the inspect
/// tool.
pub fn inspector_ui(
    mut contexts: EguiContexts,
    mut selected: ResMut<SelectedStructure>,
    mut city: ResMut<City>,
    catalog: Res<StructureCatalog>,
    mut changes: EventWriter<StructureSetChanged>,
) {
    let Some(id) = selected.0 else {
        return;
    };
    let Some(placed) = city.get(id).cloned() else {
        // Despawned underneath us; drop the selection.
        selected.0 = None;
        return;
    };
    let Some(ty) = catalog.get(&placed.type_id) else {
        selected.0 = None;
        return;
    };

    let mut open = true;
    egui::Window::new(&ty.name)
        .id(egui::Id::new("structure_inspector"))
        .open(&mut open)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(format!("Category: {}", ty.category.name()));
            ui.label(format!("Footprint: {}x{} tiles", ty.width, ty.depth));
            ui.label(format!("Build cost: ${}", ty.cost));
            ui.label(format!("Style variant: {}", placed.variant % 3 + 1));
            ui.label(format!("Position: ({:.0}, {:.0})", placed.x, placed.z));
            ui.separator();
            ui.label(&ty.description);
            ui.separator();
            if ui.button("Demolish").clicked() && demolish(&mut city, id) {
                changes.send(StructureSetChanged::Removed(id));
                selected.0 = None;
            }
        });
    if !open {
        selected.0 = None;
    }
}
