//! Editor session and handle drag controller
//!
//! Exists only while the editor window is open. Holds the selected scene-item
//! placement, the zoom toggle, and the handle state machine; the quad itself
//! stays owned by the filter and is only written through here. Every input
//! handler revalidates the placement first and disarms instead of touching a
//! stale item.

use glam::{IVec2, Vec2};

use crate::host::{ItemPlacement, SceneHost, SceneItemId};
use crate::quad::{Corner, PinQuad};
use crate::space;
use crate::viewport::{self, ViewportFit};

/// On-screen hit radius around a handle, in pointer pixels.
pub const HANDLE_RADIUS: f32 = 10.0;
/// Pointer travel required to promote a click into a drag, in pointer pixels.
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Handle selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    /// No handle selected.
    #[default]
    Idle,
    /// Pointer went down on a handle but has not moved past the threshold.
    Selected(Corner),
    /// Actively dragging a handle.
    Dragging(Corner),
}

/// Mapping from preview content space to absolute pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Isotropic content-to-pointer scale.
    pub scale: f32,
    /// Pointer position of the content's top-left corner.
    pub origin: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin: Vec2::ZERO,
        }
    }
}

/// Per-window editor state.
pub struct EditorSession {
    /// Selected scene-item placement of the filtered source, if any.
    item: Option<SceneItemId>,
    /// When on, the preview frames the item alone instead of the whole scene.
    pub zoom_to_item: bool,
    state: HandleState,
    /// Pointer position at the last pointer-down (drag threshold base).
    pressed_at: Vec2,
    /// Most recent pointer position.
    pointer: Vec2,
    /// Viewport mapping computed by the last draw.
    view: ViewTransform,
    /// Coordinate readout text size, adjusted by the scroll wheel.
    pub readout_size: f32,
}

impl EditorSession {
    /// Open a session against the host, preselecting the first placement of
    /// the source in the current scene.
    pub fn new(host: &dyn SceneHost) -> Self {
        let item = host.placements().first().copied();
        Self {
            item,
            zoom_to_item: false,
            state: HandleState::Idle,
            pressed_at: Vec2::ZERO,
            pointer: Vec2::ZERO,
            view: ViewTransform::default(),
            readout_size: 14.0,
        }
    }

    /// Currently selected placement.
    pub fn item(&self) -> Option<SceneItemId> {
        self.item
    }

    /// Switch to a different placement of the same source. Placements share
    /// the one underlying filter configuration, so the quad is untouched.
    pub fn select_item(&mut self, item: SceneItemId) {
        if self.item != Some(item) {
            self.item = Some(item);
            self.state = HandleState::Idle;
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Selected corner, whether armed or dragging.
    pub fn selected(&self) -> Option<Corner> {
        match self.state {
            HandleState::Idle => None,
            HandleState::Selected(c) | HandleState::Dragging(c) => Some(c),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, HandleState::Dragging(_))
    }

    /// Most recent pointer position, in pointer coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Recompute the viewport fit for this draw and remember the resulting
    /// content-to-pointer mapping for hit-testing.
    ///
    /// The fitted area is the whole scene, or the item's bounds times its
    /// scale when zoom-to-item is on and the placement is valid.
    pub fn update_view(
        &mut self,
        host: &dyn SceneHost,
        surface_origin: Vec2,
        surface_size: Vec2,
    ) -> ViewportFit {
        let (area_w, area_h) = self.planner_area(host);
        let fit = viewport::fit_area(area_w, area_h, surface_size.x, surface_size.y);
        self.view = ViewTransform {
            scale: fit.scale,
            origin: surface_origin + fit.offset,
        };
        fit
    }

    /// The area the viewport planner fits into the surface.
    pub fn planner_area(&self, host: &dyn SceneHost) -> (f32, f32) {
        if self.zoom_to_item {
            if let Some(placement) = self.item.and_then(|id| host.placement(id)) {
                let (w, h) = host.target_size();
                return (
                    w.max(1) as f32 * placement.scale.x,
                    h.max(1) as f32 * placement.scale.y,
                );
            }
        }
        let (w, h) = host.scene_size();
        (w.max(1) as f32, h.max(1) as f32)
    }

    /// Placement used by the projection chain: the selected item's, or the
    /// identity when the source is not placed as a scene item. `None` means
    /// the selected placement vanished and input must be suppressed.
    fn effective_placement(&self, host: &dyn SceneHost) -> Option<ItemPlacement> {
        match self.item {
            Some(id) => host.placement(id),
            None => Some(ItemPlacement::default()),
        }
    }

    /// Forward chain: source pixels -> pointer coordinates.
    pub fn project_source_point(&self, placement: ItemPlacement, point: Vec2) -> Vec2 {
        let content = if self.zoom_to_item {
            // The preview frames the item alone; its position is not part of
            // the content.
            point * placement.scale
        } else {
            space::item_to_scene(point, placement.scale, placement.position)
        };
        space::scene_to_pointer(content, self.view.scale, self.view.origin)
    }

    /// Inverse chain: pointer coordinates -> source pixels.
    fn unproject_pointer(&self, placement: ItemPlacement, pointer: Vec2) -> Option<Vec2> {
        if self.view.scale <= 0.0 {
            return None;
        }
        let content = space::pointer_to_scene(pointer, self.view.scale, self.view.origin);
        if self.zoom_to_item {
            if placement.scale.x == 0.0 || placement.scale.y == 0.0 {
                return None;
            }
            Some(content / placement.scale)
        } else {
            space::scene_to_item(content, placement.scale, placement.position)
        }
    }

    /// Projected pointer positions of the four handles, in `Corner::ALL`
    /// order, or `None` while the session has no valid target.
    pub fn handle_positions(
        &self,
        host: &dyn SceneHost,
        quad: &PinQuad,
    ) -> Option<[(Corner, Vec2); 4]> {
        if !self.target_valid(host) {
            return None;
        }
        let placement = self.effective_placement(host)?;
        Some(Corner::ALL.map(|c| {
            (
                c,
                self.project_source_point(placement, quad.corner(c).as_vec2()),
            )
        }))
    }

    fn target_valid(&self, host: &dyn SceneHost) -> bool {
        let (w, h) = host.target_size();
        w > 0 && h > 0
    }

    /// Force `Idle` and drop any in-progress drag.
    pub fn disarm(&mut self) {
        if self.state != HandleState::Idle {
            log::debug!("editor disarmed, dropping handle state {:?}", self.state);
        }
        self.state = HandleState::Idle;
    }

    /// Pointer-down: hit-test the four projected handles. Nearest-first is
    /// not needed; the radius is small relative to handle spacing, so the
    /// first match in TL, TR, BL, BR order wins deterministically.
    pub fn pointer_down(&mut self, host: &dyn SceneHost, quad: &PinQuad, pointer: Vec2) {
        let Some(handles) = self.handle_positions(host, quad) else {
            self.disarm();
            return;
        };

        self.pointer = pointer;
        self.pressed_at = pointer;

        self.state = HandleState::Idle;
        for (corner, pos) in handles {
            if pos.distance(pointer) < HANDLE_RADIUS {
                self.state = HandleState::Selected(corner);
                log::debug!("selected {} handle at {pos:?}", corner.label());
                break;
            }
        }
    }

    /// Pointer-move: promote to a drag past the threshold, then write the
    /// inverse-projected position into the quad. Returns true when the model
    /// changed.
    pub fn pointer_move(&mut self, host: &dyn SceneHost, quad: &mut PinQuad, pointer: Vec2) -> bool {
        if !self.target_valid(host) {
            self.disarm();
            return false;
        }
        let Some(placement) = self.effective_placement(host) else {
            self.disarm();
            return false;
        };

        self.pointer = pointer;

        if let HandleState::Selected(corner) = self.state {
            if pointer.distance(self.pressed_at) >= DRAG_THRESHOLD {
                self.state = HandleState::Dragging(corner);
                log::debug!("drag started on {} handle", corner.label());
            }
        }

        let HandleState::Dragging(corner) = self.state else {
            return false;
        };

        let Some(source_point) = self.unproject_pointer(placement, pointer) else {
            self.disarm();
            return false;
        };

        let position = IVec2::new(
            source_point.x.round() as i32,
            source_point.y.round() as i32,
        );
        if quad.corner(corner) == position {
            return false;
        }
        quad.set_corner(corner, position);
        true
    }

    /// Pointer-up: drop the drag and the selection. A later click re-hit-tests
    /// from scratch.
    pub fn pointer_up(&mut self) {
        if let HandleState::Dragging(corner) = self.state {
            log::debug!("drag ended on {} handle", corner.label());
        }
        self.state = HandleState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockScene;

    /// Scene and surface sized so scale = 0.5 with no letterbox offset.
    fn session_with_view(scene: &MockScene) -> EditorSession {
        let mut session = EditorSession::new(scene);
        session.update_view(scene, Vec2::ZERO, Vec2::new(960.0, 540.0));
        session
    }

    #[test]
    fn test_hit_selects_the_handle_under_pointer() {
        let scene = MockScene::simple();
        let quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        // Top-right corner (1920, 0) projects to (960, 0).
        session.pointer_down(&scene, &quad, Vec2::new(955.0, 4.0));
        assert_eq!(session.state(), HandleState::Selected(Corner::TopRight));
    }

    #[test]
    fn test_miss_selects_nothing() {
        let scene = MockScene::simple();
        let quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(480.0, 270.0));
        assert_eq!(session.state(), HandleState::Idle);
    }

    #[test]
    fn test_hit_order_is_deterministic() {
        let scene = MockScene::simple();
        // Degenerate quad: all corners coincide; TL must win.
        let mut quad = PinQuad::from_source_size(1920, 1080);
        for c in Corner::ALL {
            quad.set_corner(c, glam::IVec2::new(960, 540));
        }
        let mut session = session_with_view(&scene);
        session.pointer_down(&scene, &quad, Vec2::new(480.0, 270.0));
        assert_eq!(session.state(), HandleState::Selected(Corner::TopLeft));
    }

    #[test]
    fn test_drag_threshold_keeps_selection() {
        let scene = MockScene::simple();
        let mut quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        let changed = session.pointer_move(&scene, &mut quad, Vec2::new(961.0, 1.0));
        assert!(!changed);
        assert_eq!(session.state(), HandleState::Selected(Corner::TopRight));
        assert_eq!(quad, PinQuad::from_source_size(1920, 1080));
    }

    #[test]
    fn test_drag_transition_is_one_shot() {
        let scene = MockScene::simple();
        let mut quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        session.pointer_move(&scene, &mut quad, Vec2::new(955.0, 0.0));
        assert_eq!(session.state(), HandleState::Dragging(Corner::TopRight));
        // Further moves stay in Dragging.
        session.pointer_move(&scene, &mut quad, Vec2::new(950.0, 10.0));
        assert_eq!(session.state(), HandleState::Dragging(Corner::TopRight));
    }

    #[test]
    fn test_press_drag_release_commits_corner() {
        let scene = MockScene::simple();
        let mut quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);
        let before_bl = quad.corner(Corner::BottomLeft);

        // Press on the top-right handle, move 5 px toward the center.
        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        let changed = session.pointer_move(&scene, &mut quad, Vec2::new(955.0, 0.0));
        assert!(changed);
        session.pointer_up();

        // Release point (955, 0) inverse-projects to (1910, 0).
        assert_eq!(quad.corner(Corner::TopRight), glam::IVec2::new(1910, 0));
        assert_eq!(quad.corner(Corner::BottomLeft), before_bl);
        assert_eq!(session.state(), HandleState::Idle);
    }

    #[test]
    fn test_reselect_after_release_hits_same_handle() {
        let scene = MockScene::simple();
        let mut quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        session.pointer_move(&scene, &mut quad, Vec2::new(940.0, 20.0));
        session.pointer_up();

        // The dragged handle now projects to the release point; clicking the
        // same pixel reselects it.
        session.pointer_down(&scene, &quad, Vec2::new(940.0, 20.0));
        assert_eq!(session.state(), HandleState::Selected(Corner::TopRight));
    }

    #[test]
    fn test_vanished_placement_disarms() {
        let mut scene = MockScene::simple();
        let mut quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        session.pointer_move(&scene, &mut quad, Vec2::new(950.0, 0.0));
        assert!(session.is_dragging());

        scene.items.clear();
        let changed = session.pointer_move(&scene, &mut quad, Vec2::new(900.0, 0.0));
        assert!(!changed);
        assert_eq!(session.state(), HandleState::Idle);
    }

    #[test]
    fn test_zero_target_suppresses_hit_testing() {
        let mut scene = MockScene::simple();
        scene.target = (0, 0);
        let quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.pointer_down(&scene, &quad, Vec2::new(960.0, 0.0));
        assert_eq!(session.state(), HandleState::Idle);
        assert!(session.handle_positions(&scene, &quad).is_none());
    }

    #[test]
    fn test_zoom_toggle_changes_area_not_quad() {
        let mut scene = MockScene::simple();
        scene.items.insert(
            1,
            ItemPlacement {
                position: Vec2::new(200.0, 100.0),
                scale: Vec2::new(0.5, 0.5),
            },
        );
        let quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        assert_eq!(session.planner_area(&scene), (1920.0, 1080.0));
        session.zoom_to_item = true;
        assert_eq!(session.planner_area(&scene), (960.0, 540.0));
        assert_eq!(quad, PinQuad::from_source_size(1920, 1080));
    }

    #[test]
    fn test_zoom_drag_compensates_item_scale() {
        let mut scene = MockScene::simple();
        scene.items.insert(
            1,
            ItemPlacement {
                position: Vec2::new(200.0, 100.0),
                scale: Vec2::new(0.5, 0.5),
            },
        );
        let mut quad = PinQuad::from_source_size(1920, 1080);

        let mut session = EditorSession::new(&scene);
        session.zoom_to_item = true;
        // Item area 960x540 into a 960x540 surface: scale 1, origin 0.
        session.update_view(&scene, Vec2::ZERO, Vec2::new(960.0, 540.0));

        // Top-left handle projects to the content origin.
        session.pointer_down(&scene, &quad, Vec2::new(0.0, 0.0));
        assert_eq!(session.state(), HandleState::Selected(Corner::TopLeft));

        session.pointer_move(&scene, &mut quad, Vec2::new(10.0, 10.0));
        // 10 px on screen is 20 source pixels at item scale 0.5.
        assert_eq!(quad.corner(Corner::TopLeft), glam::IVec2::new(20, 20));
    }

    #[test]
    fn test_placement_switch_keeps_quad() {
        let mut scene = MockScene::simple();
        scene.insert(
            2,
            ItemPlacement {
                position: Vec2::new(640.0, 0.0),
                scale: Vec2::ONE,
            },
        );
        let quad = PinQuad::from_source_size(1920, 1080);
        let mut session = session_with_view(&scene);

        session.select_item(SceneItemId(2));
        assert_eq!(session.item(), Some(SceneItemId(2)));
        assert_eq!(quad, PinQuad::from_source_size(1920, 1080));
    }
}
