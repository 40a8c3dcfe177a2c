/// Top action bar -- refresh, theme toggle, and branding.
use crate::state::{AppState, RefreshOutcome};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // App title -- uses the egui accent/hyperlink colour so it adapts to
        // dark and light mode automatically.
        ui.label(
            egui::RichText::new("📄 SpecViewer")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Refresh only re-fetches once the snapshot has gone stale.
        let can_refresh = !state.is_fetching();
        let tip = if !can_refresh {
            "A fetch is already running".to_string()
        } else if state.cache.is_stale() {
            "Fetch the latest listing".to_string()
        } else {
            format!(
                "Listing is fresh; refresh is possible {}s after the last fetch",
                state.cache.refresh_interval().as_secs()
            )
        };
        if ui
            .add_enabled(
                can_refresh,
                egui::Button::new("🔄 Refresh").min_size(egui::vec2(80.0, 28.0)),
            )
            .on_hover_text(tip)
            .clicked()
        {
            match state.request_refresh() {
                RefreshOutcome::Started => tracing::info!("Manual refresh started"),
                RefreshOutcome::Fresh => tracing::debug!("Manual refresh skipped: fresh"),
                RefreshOutcome::InFlight => {}
            }
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About SpecViewer").clicked() {
                state.show_about = true;
            }

            // ── Theme toggle (☀ light / 🌙 dark) ──────────────────
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
