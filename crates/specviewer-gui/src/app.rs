/// Main `eframe::App` implementation for SpecViewer.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::AppState;
use crate::widgets;
use specviewer_core::config::SourceConfig;

/// How often to repaint while a fetch is in flight.
const FETCH_REPAINT_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// Lower bound on the idle wake-up used for periodic refresh.
const MIN_REFRESH_WAKEUP: std::time::Duration = std::time::Duration::from_secs(1);

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the first
/// fetch is already running when the window opens.
pub struct SpecViewerState {
    pub(crate) inner: AppState,
}

impl SpecViewerState {
    /// Read configuration and kick off the initial fetch.
    /// Call this before `eframe::run_native`.
    pub fn build() -> Self {
        let mut state = AppState::new(SourceConfig::from_env());
        state.request_refresh();
        Self { inner: state }
    }
}

/// The SpecViewer application.
pub struct SpecViewerApp {
    state: AppState,
}

impl SpecViewerApp {
    /// Create a new application instance from pre-built state.
    ///
    /// The state should have been constructed by [`SpecViewerState::build()`]
    /// *before* `eframe::run_native` is called.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: SpecViewerState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }
}

impl eframe::App for SpecViewerApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process background messages ───────────────────────────────────
        let _data_changed = self.state.process_fetch_messages();
        self.state.refresh_if_due();
        if self.state.is_fetching() {
            ctx.request_repaint_after(FETCH_REPAINT_INTERVAL);
        } else {
            // Wake up when the snapshot expires even if the user is idle.
            let wakeup = self.state.cache.refresh_interval().max(MIN_REFRESH_WAKEUP);
            ctx.request_repaint_after(wakeup);
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About SpecViewer")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("📄 SpecViewer")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "Every completion spec in {},\n\
                             grouped by folder and searchable.",
                            self.state.config.slug()
                        ))
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(8.0);
                    ui.hyperlink_to(self.state.config.slug(), self.state.config.repo_url());
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Central panel (header, search, groups) ────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::header_panel::header_panel(ui, &mut self.state);
            ui.add_space(8.0);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::groups_panel::groups_panel(ui, &self.state);
                });
        });
    }
}
