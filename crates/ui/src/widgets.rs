use bevy_egui::egui;

use simulation::economy::RciDemand;

pub(crate) fn format_count(n: u32) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

// ---------------------------------------------------------------------------
// RCI demand bars
// ---------------------------------------------------------------------------

/// Draw a single vertical demand bar. `value` is in 0..=100 with 50 as
/// the neutral midpoint: above 50 fills upward in the zone color, below
/// fills downward in red (surplus).
fn demand_bar(ui: &mut egui::Ui, label: &str, value: f32, color: egui::Color32) {
    let bar_width = 8.0;
    let bar_height = 24.0;

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(bar_width + 12.0, bar_height),
        egui::Sense::hover(),
    );

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let bar_rect = egui::Rect::from_min_size(rect.min, egui::vec2(bar_width, bar_height));
        painter.rect_filled(bar_rect, 2.0, egui::Color32::from_gray(50));

        let mid_y = bar_rect.min.y + bar_height * 0.5;
        painter.line_segment(
            [
                egui::pos2(bar_rect.min.x, mid_y),
                egui::pos2(bar_rect.max.x, mid_y),
            ],
            egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
        );

        let offset = (value.clamp(0.0, 100.0) - 50.0) / 50.0;
        let fill_height = offset.abs() * bar_height * 0.5;
        let fill_rect = if offset >= 0.0 {
            egui::Rect::from_min_max(
                egui::pos2(bar_rect.min.x + 1.0, mid_y - fill_height),
                egui::pos2(bar_rect.max.x - 1.0, mid_y),
            )
        } else {
            egui::Rect::from_min_max(
                egui::pos2(bar_rect.min.x + 1.0, mid_y),
                egui::pos2(bar_rect.max.x - 1.0, mid_y + fill_height),
            )
        };
        let fill_color = if offset >= 0.0 {
            color
        } else {
            egui::Color32::from_rgb(220, 60, 50)
        };
        painter.rect_filled(fill_rect, 1.0, fill_color);

        painter.text(
            egui::pos2(bar_rect.max.x + 2.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(10.0),
            color,
        );
    }

    let status = if value > 50.0 {
        "demand"
    } else if value < 50.0 {
        "surplus"
    } else {
        "balanced"
    };
    response.on_hover_text(format!("{label}: {value:.0} ({status})"));
}

pub(crate) fn rci_demand_bars(ui: &mut egui::Ui, demand: &RciDemand) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        demand_bar(
            ui,
            "R",
            demand.residential,
            egui::Color32::from_rgb(80, 200, 80),
        );
        demand_bar(
            ui,
            "C",
            demand.commercial,
            egui::Color32::from_rgb(80, 140, 220),
        );
        demand_bar(
            ui,
            "I",
            demand.industrial,
            egui::Color32::from_rgb(220, 200, 60),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_picks_a_suffix() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_100_000), "2.1M");
    }
}
