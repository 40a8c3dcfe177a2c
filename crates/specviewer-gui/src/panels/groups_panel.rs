/// Groups panel -- one section per visible group, each a grid of spec cards.
use crate::state::{AppPhase, AppState};
use crate::widgets;
use egui::Ui;
use specviewer_core::model::size::format_count;

/// Cards per row, chosen from the available width.
fn columns_for_width(width: f32) -> usize {
    match width {
        w if w >= 1000.0 => 4,
        w if w >= 700.0 => 3,
        w if w >= 450.0 => 2,
        _ => 1,
    }
}

/// Draw every non-hidden group.
pub fn groups_panel(ui: &mut Ui, state: &AppState) {
    let weak = ui.visuals().weak_text_color();

    if state.snapshot().is_none() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| match state.phase {
            AppPhase::Fetching | AppPhase::Idle => {
                ui.spinner();
                ui.label(egui::RichText::new("Fetching listing...").color(weak));
            }
            AppPhase::Ready => {
                ui.label(
                    egui::RichText::new("No listing available. Try Refresh.").color(weak),
                );
            }
        });
        return;
    }

    let groups = state.visible_groups();
    if groups.iter().all(|g| g.hidden) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("No specs match your search.").color(weak));
        });
        return;
    }

    let columns = columns_for_width(ui.available_width());

    for group in groups.iter().filter(|g| !g.hidden) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&group.display_name).size(20.0).strong());
            ui.label(
                egui::RichText::new(format_count(group.entries.len() as u64))
                    .size(12.0)
                    .color(weak),
            );
            ui.hyperlink_to("↗", state.config.group_url(&group.key))
                .on_hover_text("Open folder on GitHub");
        });
        ui.add_space(4.0);

        egui::Grid::new(("group", group.key.as_str()))
            .num_columns(columns)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, entry) in group.entries.iter().enumerate() {
                    let url = state.config.file_url(&entry.path);
                    widgets::spec_card::spec_card(ui, entry, &url);
                    if (i + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    }
    ui.add_space(12.0);
}
