//! SpecViewer application icon generator.
//!
//! Produces a procedural icon: a rounded document sheet with a folded
//! corner and three coloured text lines (one per spec group). Rendered at
//! an arbitrary resolution as RGBA pixel data for the window icon.

/// Generate a SpecViewer icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    // ── Layout ──────────────────────────────────────────────────
    let left = s * 0.18;
    let right = s * 0.82;
    let top = s * 0.08;
    let bottom = s * 0.92;
    let corner_radius = s * 0.08;
    let fold = s * 0.20;

    let sheet = [0xe4, 0xe4, 0xe8];
    let fold_col = [0xb8, 0xb8, 0xc4];

    // Text lines: (y centre, length as fraction of width, colour).
    let lines: &[(f32, f32, [u8; 3])] = &[
        (0.42, 0.80, [0x89, 0xb4, 0xfa]),
        (0.58, 0.62, [0xa6, 0xe3, 0xa1]),
        (0.74, 0.70, [0xf9, 0xe2, 0xaf]),
    ];
    let line_half_h = s * 0.045;
    let line_left = left + s * 0.10;
    let line_span = right - s * 0.10 - line_left;

    // ── Per-pixel rendering ─────────────────────────────────────
    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let sheet_alpha =
                rounded_rect_coverage(px, py, left, top, right, bottom, corner_radius);
            if sheet_alpha <= 0.0 {
                continue;
            }

            // Cut the folded corner off the top-right.
            let fold_dist = (right - px) + (py - top) - fold;
            let (mut col, mut alpha) = (sheet, sheet_alpha);
            if fold_dist < 0.0 {
                let inside_fold = px > right - fold && py < top + fold;
                if inside_fold && (px - (right - fold)) > (py - top) {
                    alpha = 0.0;
                } else {
                    col = fold_col;
                }
            }

            for &(cy, len, line_col) in lines {
                let cy = s * cy;
                let end = line_left + line_span * len;
                if (py - cy).abs() <= line_half_h && px >= line_left && px <= end {
                    col = line_col;
                }
            }

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = col[0];
            pixels[idx + 1] = col[1];
            pixels[idx + 2] = col[2];
            pixels[idx + 3] = (alpha * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pixels
}

/// Anti-aliased coverage of a rounded rectangle at pixel centre `(px, py)`.
fn rounded_rect_coverage(
    px: f32,
    py: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
) -> f32 {
    let cx = px.clamp(left + radius, right - radius);
    let cy = py.clamp(top + radius, bottom - radius);
    let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}
