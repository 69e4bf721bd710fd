//! Coordinate space conversions
//!
//! The filter juggles four spaces: source pixels (where the quad corners
//! live), scene-item space (source pixels scaled by the item), scene space
//! (item space plus the item position), and pointer space (the preview
//! panel, after the viewport fit). Everything here is a pure function so the
//! drag math can be tested without a window.

use glam::Vec2;

/// Convert a source-pixel point to normalized texture coordinates.
///
/// A source with zero width or height means "no target yet"; the result is
/// (0, 0) and callers are expected to skip rendering for that frame rather
/// than treat it as an error.
pub fn to_normalized(point: Vec2, source_w: f32, source_h: f32) -> Vec2 {
    if source_w == 0.0 || source_h == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(point.x / source_w, point.y / source_h)
}

/// Map a point from scene-item local space into scene space.
pub fn item_to_scene(point: Vec2, item_scale: Vec2, item_pos: Vec2) -> Vec2 {
    point * item_scale + item_pos
}

/// Map a scene-space point back into scene-item local space.
///
/// Returns `None` for a degenerate item scale (a zero component cannot be
/// inverted); callers treat that as an invalid placement.
pub fn scene_to_item(point: Vec2, item_scale: Vec2, item_pos: Vec2) -> Option<Vec2> {
    if item_scale.x == 0.0 || item_scale.y == 0.0 {
        return None;
    }
    Some((point - item_pos) / item_scale)
}

/// Project a scene-space point onto the preview surface.
pub fn scene_to_pointer(point: Vec2, viewport_scale: f32, viewport_offset: Vec2) -> Vec2 {
    point * viewport_scale + viewport_offset
}

/// Exact inverse of [`scene_to_pointer`].
///
/// Hit-testing relies on this being symmetric: releasing a handle and
/// clicking the same pixel must select the same handle again.
pub fn pointer_to_scene(point: Vec2, viewport_scale: f32, viewport_offset: Vec2) -> Vec2 {
    (point - viewport_offset) / viewport_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_normalized_basic() {
        let uv = to_normalized(Vec2::new(960.0, 540.0), 1920.0, 1080.0);
        assert_eq!(uv, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_to_normalized_zero_dims() {
        assert_eq!(to_normalized(Vec2::new(100.0, 100.0), 0.0, 1080.0), Vec2::ZERO);
        assert_eq!(to_normalized(Vec2::new(100.0, 100.0), 1920.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_to_normalized_round_trip() {
        let (w, h) = (1280.0, 720.0);
        for point in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1280.0, 720.0),
            Vec2::new(-300.0, 950.0),
            Vec2::new(8192.0, -8192.0),
        ] {
            let uv = to_normalized(point, w, h);
            let back = Vec2::new(uv.x * w, uv.y * h);
            assert!((back - point).length() < 1e-3, "{point:?} -> {back:?}");
        }
    }

    #[test]
    fn test_item_scene_round_trip() {
        let scale = Vec2::new(0.5, 2.0);
        let pos = Vec2::new(100.0, -40.0);
        let p = Vec2::new(640.0, 360.0);
        let scene = item_to_scene(p, scale, pos);
        let back = scene_to_item(scene, scale, pos).unwrap();
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn test_scene_to_item_degenerate_scale() {
        assert!(scene_to_item(Vec2::ONE, Vec2::new(0.0, 1.0), Vec2::ZERO).is_none());
        assert!(scene_to_item(Vec2::ONE, Vec2::new(1.0, 0.0), Vec2::ZERO).is_none());
    }

    #[test]
    fn test_pointer_inverse_law() {
        let scale = 0.37;
        let offset = Vec2::new(24.0, 71.5);
        for p in [
            Vec2::ZERO,
            Vec2::new(1920.0, 1080.0),
            Vec2::new(-512.0, 4096.0),
        ] {
            let ptr = scene_to_pointer(p, scale, offset);
            let back = pointer_to_scene(ptr, scale, offset);
            assert!((back - p).length() < 1e-3);
        }
    }
}
