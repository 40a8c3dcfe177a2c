/// Header panel — title, repository link, search box, and options menu.
use crate::state::AppState;
use crate::widgets;
use egui::Ui;
use specviewer_core::model::UNGROUPED_KEY;

/// Width of the search box in points.
const SEARCH_WIDTH: f32 = 320.0;

/// Draw the header above the group list.
pub fn header_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("Spec Viewer").size(28.0).strong());
        ui.add_space(8.0);
        ui.hyperlink_to("GitHub", state.config.repo_url());
    });

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label("List of all specifications");
        ui.hyperlink_to(state.config.slug(), state.config.group_url(UNGROUPED_KEY));
        ui.label("includes.");
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        // Edit a copy so the options record is replaced, not mutated.
        let mut search = state.options.search_text.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("🔍 Search")
                .desired_width(SEARCH_WIDTH),
        );
        if response.changed() {
            state.set_search(&search);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            widgets::options_menu::options_menu(ui, state);
        });
    });
}
