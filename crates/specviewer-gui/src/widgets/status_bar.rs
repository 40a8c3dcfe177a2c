/// Bottom status bar — fetch progress, listing totals, and the last error.
use crate::state::{AppPhase, AppState};
use egui::Ui;
use specviewer_core::model::size::{format_bytes, format_count};

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    // Extract theme-adaptive colours once for this frame.
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);

    ui.horizontal(|ui| {
        match state.phase {
            AppPhase::Idle => {
                ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
            }
            AppPhase::Fetching => {
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!("Fetching {}...", state.config.slug()))
                        .size(12.0)
                        .color(color_normal),
                );
            }
            AppPhase::Ready => {}
        }

        if let Some(snapshot) = state.snapshot() {
            if state.phase != AppPhase::Idle {
                ui.separator();
            }
            let files = &snapshot.files;
            let groups = files.iter().filter(|g| !g.entries.is_empty()).count();

            ui.label(
                egui::RichText::new(format!(
                    "{} specs",
                    format_count(files.file_count() as u64)
                ))
                .size(12.0)
                .color(color_normal),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} groups", format_count(groups as u64)))
                    .size(12.0)
                    .color(color_normal),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format_bytes(files.total_size()))
                    .size(12.0)
                    .color(color_accent),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "Updated {}",
                    snapshot.fetched_at.format("%H:%M:%S")
                ))
                .size(12.0)
                .color(color_weak),
            );
            if let Some(duration) = state.last_fetch_duration {
                ui.label(
                    egui::RichText::new(format!("({:.1}s)", duration.as_secs_f64()))
                        .size(12.0)
                        .color(color_weak),
                );
            }
        }

        if let Some(err) = state.last_error() {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("⚠ {}", truncate_message(err, 120)))
                    .size(12.0)
                    .color(color_warning),
            )
            .on_hover_text(err);
        }
    });
}

/// Shorten an error message for single-line display.
fn truncate_message(msg: &str, max_chars: usize) -> String {
    if msg.chars().count() <= max_chars {
        return msg.to_string();
    }
    let kept: String = msg.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
