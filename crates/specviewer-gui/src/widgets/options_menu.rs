/// "Options" drop-down -- file size and builtin visibility toggles.
use crate::state::AppState;
use egui::Ui;
use specviewer_core::view::DisplayOptions;

fn size_label(options: &DisplayOptions) -> &'static str {
    if options.show_size {
        "🗋 Hide file sizes"
    } else {
        "🗋 Show file sizes"
    }
}

fn builtins_label(options: &DisplayOptions) -> &'static str {
    if options.show_builtins {
        "👁 Hide Fig builtins"
    } else {
        "👁 Show Fig builtins"
    }
}

/// Draw the options menu button.
pub fn options_menu(ui: &mut Ui, state: &mut AppState) {
    ui.menu_button("Options ⏷", |ui| {
        if ui.button(size_label(&state.options)).clicked() {
            state.toggle_size();
            ui.close_menu();
        }

        if ui
            .button(builtins_label(&state.options))
            .on_hover_text("Example and bundled specs")
            .clicked()
        {
            state.toggle_builtins();
            ui.close_menu();
        }
    });
}
