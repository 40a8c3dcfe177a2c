/// Spec card -- a clickable tile with the spec name and optional size.
use egui::{Sense, Ui, Vec2};
use specviewer_core::view::VisibleEntry;

/// Fixed card size in points.
const CARD_SIZE: Vec2 = Vec2::new(200.0, 32.0);

/// Draw one card. Clicking it opens `url` in the browser.
pub fn spec_card(ui: &mut Ui, entry: &VisibleEntry, url: &str) {
    let (rect, response) = ui.allocate_exact_size(CARD_SIZE, Sense::click());
    let visuals = ui.visuals();
    let fill = if response.hovered() {
        visuals.widgets.hovered.bg_fill
    } else {
        visuals.faint_bg_color
    };
    let text_color = visuals.text_color();
    let weak = visuals.weak_text_color();

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, fill);

    let inner = rect.shrink2(egui::vec2(8.0, 0.0));
    let size_label = entry.size_label.as_deref();
    // Leave room for the size on the right.
    let name_width = inner.width() - if size_label.is_some() { 52.0 } else { 0.0 };
    let name = truncate_to_chars(&entry.name, (name_width / 7.0).max(4.0) as usize);

    painter.text(
        inner.left_center(),
        egui::Align2::LEFT_CENTER,
        name,
        egui::FontId::proportional(13.0),
        text_color,
    );
    if let Some(label) = size_label {
        painter.text(
            inner.right_center(),
            egui::Align2::RIGHT_CENTER,
            label,
            egui::FontId::proportional(11.0),
            weak,
        );
    }

    let response = response
        .on_hover_text(entry.name.as_str())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    if response.clicked() {
        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
    }
}

/// Shorten `text` to at most `max` characters, ending in an ellipsis.
fn truncate_to_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
