//! Editor window
//!
//! The interactive configuration panel: placement selector, zoom toggle,
//! numeric corner fields, and the preview canvas that hosts the drag
//! controller and the overlay. The preview background is an explicit
//! attach/recreate-on-resize surface; dropping the window releases it.

use eframe::egui::{self, Color32, ColorImage, Rect, Sense, TextureOptions, Vec2 as EguiVec2};
use glam::{IVec2, Vec2};

use crate::editor::overlay::{self, OverlayStyle};
use crate::editor::session::EditorSession;
use crate::filter::CornerPinFilter;
use crate::host::SceneHost;
use crate::quad::{Corner, COORD_MAX, COORD_MIN};

/// Minimum readout text size (wheel-adjustable downward).
const READOUT_MIN_SIZE: f32 = 2.0;
/// Maximum readout text size.
const READOUT_MAX_SIZE: f32 = 72.0;

/// Preview background surface lifecycle.
enum PreviewSurface {
    /// No drawable surface yet (window just opened, or canvas collapsed).
    Unattached,
    /// Live surface; recreated whenever the content size changes.
    Attached {
        size: [usize; 2],
        texture: egui::TextureHandle,
    },
}

impl PreviewSurface {
    /// Get the background texture for the given content size, recreating the
    /// surface first if the size changed since the last draw.
    fn texture(&mut self, ctx: &egui::Context, size: [usize; 2]) -> &egui::TextureHandle {
        let stale = match self {
            PreviewSurface::Unattached => true,
            PreviewSurface::Attached { size: current, .. } => *current != size,
        };
        if stale {
            let texture =
                ctx.load_texture("corner-pin-preview", checker_image(size), TextureOptions::NEAREST);
            *self = PreviewSurface::Attached { size, texture };
        }
        match self {
            PreviewSurface::Attached { texture, .. } => texture,
            PreviewSurface::Unattached => unreachable!("surface attached above"),
        }
    }
}

/// Checkerboard placeholder for the preview content area.
fn checker_image(size: [usize; 2]) -> ColorImage {
    const SQUARE: usize = 16;
    let mut image = ColorImage::new(size, Color32::from_gray(28));
    for y in 0..size[1] {
        for x in 0..size[0] {
            if (x / SQUARE + y / SQUARE) % 2 == 0 {
                image.pixels[y * size[0] + x] = Color32::from_gray(38);
            }
        }
    }
    image
}

/// The corner-pin editor panel.
pub struct EditorWindow {
    pub session: EditorSession,
    style: OverlayStyle,
    surface: PreviewSurface,
}

impl EditorWindow {
    /// Open an editor against the host's current scene.
    pub fn new(host: &dyn SceneHost) -> Self {
        Self {
            session: EditorSession::new(host),
            style: OverlayStyle::default(),
            surface: PreviewSurface::Unattached,
        }
    }

    /// Show the editor contents.
    pub fn show(&mut self, ui: &mut egui::Ui, host: &dyn SceneHost, filter: &mut CornerPinFilter) {
        self.show_controls(ui, host, filter);
        ui.separator();
        self.show_corner_fields(ui, host, filter);
        ui.separator();
        self.show_canvas(ui, host, filter);
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, host: &dyn SceneHost, _filter: &CornerPinFilter) {
        ui.horizontal(|ui| {
            let placements = host.placements();
            let selected_label = self
                .session
                .item()
                .and_then(|item| placements.iter().position(|p| *p == item))
                .map(|i| format!("#{}", i + 1))
                .unwrap_or_else(|| "—".to_string());

            ui.label("Scene item:");
            egui::ComboBox::from_id_source("corner_pin_placement")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    for (i, item) in placements.iter().enumerate() {
                        let checked = self.session.item() == Some(*item);
                        if ui.selectable_label(checked, format!("#{}", i + 1)).clicked() {
                            self.session.select_item(*item);
                        }
                    }
                });

            // Toggling zoom mid-drag would re-base the projection chain under
            // the drag; the control is disabled until release.
            let zoom_allowed = !self.session.is_dragging() && self.session.item().is_some();
            ui.add_enabled(
                zoom_allowed,
                egui::Checkbox::new(&mut self.session.zoom_to_item, "Zoom to scene item"),
            );
        });
    }

    fn show_corner_fields(
        &mut self,
        ui: &mut egui::Ui,
        host: &dyn SceneHost,
        filter: &mut CornerPinFilter,
    ) {
        egui::Grid::new("corner_pin_fields")
            .num_columns(3)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for corner in Corner::ALL {
                    ui.label(corner.label());

                    let current = filter.quad().corner(corner);
                    let mut x = current.x;
                    let mut y = current.y;
                    let changed_x = ui
                        .add(
                            egui::DragValue::new(&mut x)
                                .clamp_range(COORD_MIN..=COORD_MAX)
                                .speed(1)
                                .prefix("X: "),
                        )
                        .changed();
                    let changed_y = ui
                        .add(
                            egui::DragValue::new(&mut y)
                                .clamp_range(COORD_MIN..=COORD_MAX)
                                .speed(1)
                                .prefix("Y: "),
                        )
                        .changed();
                    if changed_x || changed_y {
                        filter.quad_mut().set_corner(corner, IVec2::new(x, y));
                    }
                    ui.end_row();
                }
            });

        ui.horizontal(|ui| {
            ui.checkbox(&mut filter.quad_mut().show_outline, "Display box");
            if ui.button("Reset to source corners").clicked() {
                let (w, h) = host.target_size();
                let outline = filter.quad().show_outline;
                *filter.quad_mut() = crate::quad::PinQuad::from_source_size(w, h);
                filter.quad_mut().show_outline = outline;
            }
        });
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui, host: &dyn SceneHost, filter: &mut CornerPinFilter) {
        let available = ui.available_size();
        let size = EguiVec2::new(available.x.max(20.0), available.y.max(20.0));
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let canvas = response.rect;

        let fit = self.session.update_view(
            host,
            Vec2::new(canvas.min.x, canvas.min.y),
            Vec2::new(canvas.width(), canvas.height()),
        );
        let content = Rect::from_min_size(
            canvas.min + EguiVec2::new(fit.offset.x, fit.offset.y),
            EguiVec2::new(fit.content.x, fit.content.y),
        );

        // Input first so this frame's overlay reflects the new state.
        self.handle_input(ui, &response, host, filter);

        painter.rect_filled(canvas, 0.0, Color32::from_gray(20));

        let (target_w, target_h) = host.target_size();
        if target_w == 0 || target_h == 0 {
            // No target: placeholder only, nothing to edit this frame.
            painter.text(
                canvas.center(),
                egui::Align2::CENTER_CENTER,
                "No target source",
                egui::FontId::proportional(16.0),
                Color32::from_gray(100),
            );
            return;
        }

        let content_size = [
            content.width().max(1.0) as usize,
            content.height().max(1.0) as usize,
        ];
        let texture = self.surface.texture(ui.ctx(), content_size);
        painter.image(
            texture.id(),
            content,
            Rect::from_min_max(egui::Pos2::ZERO, egui::Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        self.draw_item_footprint(&painter, host, target_w, target_h);

        overlay::draw_overlay(
            &painter,
            &self.style,
            &self.session,
            host,
            filter.quad(),
            content,
        );

        painter.rect_stroke(content, 0.0, egui::Stroke::new(1.0, Color32::from_gray(70)));
    }

    /// Stand-in for the scene render: the filtered item's footprint.
    fn draw_item_footprint(
        &self,
        painter: &egui::Painter,
        host: &dyn SceneHost,
        target_w: u32,
        target_h: u32,
    ) {
        let Some(item) = self.session.item() else {
            return;
        };
        let Some(placement) = host.placement(item) else {
            // Placement vanished: the preview goes blank for this item.
            return;
        };
        if !host.item_visible(item) {
            return;
        }

        let size = Vec2::new(target_w as f32, target_h as f32);
        let min = self.session.project_source_point(placement, Vec2::ZERO);
        let max = self.session.project_source_point(placement, size);
        painter.rect_filled(
            Rect::from_min_max(
                egui::Pos2::new(min.x, min.y),
                egui::Pos2::new(max.x, max.y),
            ),
            0.0,
            Color32::from_rgb(45, 50, 55),
        );
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        host: &dyn SceneHost,
        filter: &mut CornerPinFilter,
    ) {
        let pointer = ui.input(|i| i.pointer.interact_pos());
        let pressed = ui.input(|i| i.pointer.primary_pressed());
        let down = ui.input(|i| i.pointer.primary_down());
        let released = ui.input(|i| i.pointer.primary_released());

        if let Some(pos) = pointer {
            let pos = Vec2::new(pos.x, pos.y);
            if pressed && response.hovered() {
                self.session.pointer_down(host, filter.quad(), pos);
            } else if down {
                self.session.pointer_move(host, filter.quad_mut(), pos);
            }
        }
        if released {
            self.session.pointer_up();
        }

        // Scroll resizes the floating readout while dragging.
        if self.session.is_dragging() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let step = if scroll >= 0.0 { 2.0 } else { -2.0 };
                self.session.readout_size =
                    (self.session.readout_size + step).clamp(READOUT_MIN_SIZE, READOUT_MAX_SIZE);
            }
        }
    }
}
