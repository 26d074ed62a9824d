use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::catalog::{Category, StructureCatalog};
use simulation::economy::{CityStats, RciDemand, Treasury};
use simulation::time_of_day::GameClock;
use simulation::weather::Weather;

use rendering::input::{ActiveTool, ActiveVariant, StatusMessage};

use crate::widgets::{format_count, rci_demand_bars};

/// Build-palette categories shown in the bottom toolbar, in order.
const PALETTE: &[Category] = &[
    Category::Residential,
    Category::Commercial,
    Category::Industrial,
    Category::Office,
    Category::Utility,
    Category::Decoration,
    Category::Road,
];

/// Which palette category is expanded, if any.
#[derive(Resource, Default)]
pub struct OpenCategory(pub Option<Category>);

#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut tool: ResMut<ActiveTool>,
    mut open_cat: ResMut<OpenCategory>,
    catalog: Res<StructureCatalog>,
    treasury: Res<Treasury>,
    stats: Res<CityStats>,
    demand: Res<RciDemand>,
    clock: Res<GameClock>,
    weather: Res<Weather>,
    variant: Res<ActiveVariant>,
    status: Res<StatusMessage>,
) {
    // ---- Top info bar ----
    egui::TopBottomPanel::top("top_info_bar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                ui.label(
                    egui::RichText::new(format!("${}", treasury.funds))
                        .strong()
                        .color(egui::Color32::from_rgb(230, 210, 120)),
                );
                ui.separator();
                ui.label(format!("Pop: {}", format_count(stats.population)));
                ui.label(format!("Jobs: {}", format_count(stats.jobs)));
                ui.separator();
                rci_demand_bars(ui, &demand);
                ui.separator();
                ui.label(clock.formatted());
                ui.label(weather.condition.name());
                ui.separator();
                ui.label(format!(
                    "{} (style {})",
                    tool.label(&catalog),
                    variant.0 % 3 + 1
                ));
            });
        });

    // ---- Bottom build palette ----
    egui::TopBottomPanel::bottom("build_palette").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            for &category in PALETTE {
                let open = open_cat.0 == Some(category);
                if ui.selectable_label(open, category.name()).clicked() {
                    open_cat.0 = if open { None } else { Some(category) };
                }
            }
            ui.separator();
            let inspecting = matches!(*tool, ActiveTool::Inspect);
            if ui.selectable_label(inspecting, "Inspect").clicked() {
                *tool = ActiveTool::Inspect;
            }
            let demolishing = matches!(*tool, ActiveTool::Demolish);
            if ui.selectable_label(demolishing, "Demolish").clicked() {
                *tool = ActiveTool::Demolish;
            }
        });

        if let Some(category) = open_cat.0 {
            ui.horizontal_wrapped(|ui| {
                for ty in catalog.by_category(category) {
                    let active = matches!(&*tool, ActiveTool::Place(id) if *id == ty.id);
                    let affordable = treasury.funds >= ty.cost;
                    let text = if ty.cost > 0 {
                        format!("{} (${})", ty.name, ty.cost)
                    } else {
                        ty.name.clone()
                    };
                    let mut label = egui::RichText::new(text);
                    if !affordable {
                        label = label.color(egui::Color32::from_gray(110));
                    }
                    let response = ui.selectable_label(active, label);
                    if response.clicked() {
                        *tool = ActiveTool::Place(ty.id.clone());
                    }
                    response.on_hover_text(&ty.description);
                }
            });
        }
    });

    // ---- Transient status message ----
    if status.active() {
        egui::Area::new(egui::Id::new("status_message"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -60.0))
            .show(contexts.ctx_mut(), |ui| {
                let color = if status.is_error {
                    egui::Color32::from_rgb(230, 90, 80)
                } else {
                    egui::Color32::from_rgb(210, 210, 210)
                };
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&status.text).color(color).size(14.0));
                });
            });
    }
}
