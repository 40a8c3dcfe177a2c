//! SpecViewer — browse the completion specs of a GitHub repository.
//!
//! Thin binary entry point. All logic lives in the `specviewer-core`
//! and `specviewer-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("SpecViewer starting");

    let icon = specviewer_gui::icon::generate_icon(64);

    // Build state (and start the first fetch) *before* opening the window
    // so the listing is already on its way when the first frame renders.
    let state = specviewer_gui::SpecViewerState::build();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SpecViewer -- Completion Spec Browser")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 360.0])
            .with_icon(icon),
        ..Default::default()
    };

    eframe::run_native(
        "SpecViewer",
        options,
        Box::new(|cc| {
            Ok(Box::new(specviewer_gui::SpecViewerApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
