//! Quad overlay painting
//!
//! Pure consumer of the quad and the session: projects the four corners,
//! strokes the edges, draws the square handles color-coded for selection,
//! and while a drag is live, floats the integer coordinate readout near the
//! pointer. Nothing here owns state; every value is recomputed per draw.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2 as EguiVec2};
use glam::Vec2;

use crate::editor::session::EditorSession;
use crate::host::SceneHost;
use crate::quad::PinQuad;

/// Margin kept between the readout and the preview content edge.
const READOUT_MARGIN: f32 = 10.0;

/// Overlay colors and sizes.
pub struct OverlayStyle {
    pub edge: Stroke,
    pub handle: Color32,
    pub handle_selected: Color32,
    /// Half-extent of a handle square, in pointer pixels.
    pub handle_size: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            edge: Stroke::new(2.0, Color32::from_rgb(100, 180, 255)),
            handle: Color32::from_rgb(100, 180, 255),
            handle_selected: Color32::from_rgb(255, 200, 100),
            handle_size: 5.0,
        }
    }
}

fn to_pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

/// Estimated plate size for the readout text (monospace width heuristic).
fn readout_plate_size(text: &str, text_size: f32) -> EguiVec2 {
    EguiVec2::new(text.len() as f32 * text_size * 0.62, text_size * 1.3)
}

/// Where the floating readout is anchored: offset from the pointer, clamped
/// so the whole plate stays inside the visible content rect.
pub fn readout_anchor(pointer: Vec2, plate: EguiVec2, content: Rect) -> Pos2 {
    let min_x = content.min.x + READOUT_MARGIN;
    let max_x = (content.max.x - READOUT_MARGIN - plate.x).max(min_x);
    let min_y = content.min.y + READOUT_MARGIN;
    let max_y = (content.max.y - READOUT_MARGIN - plate.y).max(min_y);
    Pos2::new(
        (pointer.x + READOUT_MARGIN).clamp(min_x, max_x),
        (pointer.y - plate.y / 2.0).clamp(min_y, max_y),
    )
}

/// Draw the quad edges, the four handles, and the drag readout.
pub fn draw_overlay(
    painter: &egui::Painter,
    style: &OverlayStyle,
    session: &EditorSession,
    host: &dyn SceneHost,
    quad: &PinQuad,
    content: Rect,
) {
    if let Some(item) = session.item() {
        if !host.item_visible(item) {
            return;
        }
    }

    let Some(handles) = session.handle_positions(host, quad) else {
        return;
    };

    // Edges: TL-TR, TR-BR, BR-BL, BL-TL (handles are in TL, TR, BL, BR order).
    for (a, b) in [(0, 1), (1, 3), (3, 2), (2, 0)] {
        painter.line_segment([to_pos(handles[a].1), to_pos(handles[b].1)], style.edge);
    }

    for (corner, pos) in handles {
        let selected = session.selected() == Some(corner);
        let color = if selected {
            style.handle_selected
        } else {
            style.handle
        };
        let rect = Rect::from_center_size(
            to_pos(pos),
            EguiVec2::splat(style.handle_size * 2.0),
        );
        painter.rect_filled(rect, 0.0, color);
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::WHITE));
    }

    if session.is_dragging() {
        if let Some(corner) = session.selected() {
            let value = quad.corner(corner);
            let text = format!("({}, {})", value.x, value.y);
            let size = session.readout_size;
            let plate_size = readout_plate_size(&text, size);
            let anchor = readout_anchor(session.pointer(), plate_size, content);
            // Dark plate behind the text so it stays legible on any preview
            // content.
            let plate = Rect::from_min_size(anchor, plate_size);
            painter.rect_filled(
                plate.expand(2.0),
                2.0,
                Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            );
            painter.text(
                anchor,
                Align2::LEFT_TOP,
                text,
                FontId::monospace(size),
                Color32::WHITE,
            );
        }
    }
}
