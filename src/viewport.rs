//! Preview viewport fitting
//!
//! Computes the letterbox/pillarbox fit that places a target area (the whole
//! scene, or a zoomed scene item) inside the preview surface without
//! stretching it. Recomputed once per drawn frame; never stateful.

use glam::Vec2;

/// Result of fitting an area into a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    /// Isotropic scale from area pixels to surface pixels.
    pub scale: f32,
    /// Top-left corner of the scaled content within the surface.
    pub offset: Vec2,
    /// Size of the scaled content in surface pixels.
    pub content: Vec2,
}

impl ViewportFit {
    /// True if the given surface-local point lies inside the fitted content.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.offset.x
            && point.y >= self.offset.y
            && point.x <= self.offset.x + self.content.x
            && point.y <= self.offset.y + self.content.y
    }
}

/// Fit `area` into `surface`, preserving aspect ratio and centering.
///
/// If the surface is wider (relative to its height) than the area, the fit is
/// by height, otherwise by width. A zero area dimension is clamped to 1; the
/// upstream source can transiently report 0 while it reconfigures.
pub fn fit_area(area_w: f32, area_h: f32, surface_w: f32, surface_h: f32) -> ViewportFit {
    let area_w = area_w.max(1.0);
    let area_h = area_h.max(1.0);

    let surface_aspect = surface_w / surface_h;
    let area_aspect = area_w / area_h;

    let scale = if surface_aspect > area_aspect {
        surface_h / area_h
    } else {
        surface_w / area_w
    };

    let content = Vec2::new(area_w * scale, area_h * scale);
    let offset = Vec2::new((surface_w - content.x) / 2.0, (surface_h - content.y) / 2.0);

    ViewportFit {
        scale,
        offset,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_fit_by_width() {
        // Tall surface, wide area: fit by width, bars above and below.
        let fit = fit_area(1920.0, 1080.0, 400.0, 800.0);
        assert!((fit.scale - 400.0 / 1920.0).abs() < EPS);
        assert!((fit.offset.x - 0.0).abs() < EPS);
        assert!(fit.offset.y > 0.0);
    }

    #[test]
    fn test_fit_by_height() {
        // Wide surface, square-ish area: fit by height, bars left and right.
        let fit = fit_area(1000.0, 1000.0, 800.0, 400.0);
        assert!((fit.scale - 0.4).abs() < EPS);
        assert!((fit.offset.y - 0.0).abs() < EPS);
        assert!((fit.offset.x - 200.0).abs() < EPS);
    }

    #[test]
    fn test_fit_never_overflows_and_centers() {
        let cases = [
            (1920.0, 1080.0, 500.0, 300.0),
            (100.0, 900.0, 640.0, 480.0),
            (640.0, 480.0, 640.0, 480.0),
            (3840.0, 1.0, 256.0, 256.0),
        ];
        for (aw, ah, sw, sh) in cases {
            let fit = fit_area(aw, ah, sw, sh);
            assert!(fit.scale * aw <= sw + EPS, "{aw}x{ah} in {sw}x{sh}");
            assert!(fit.scale * ah <= sh + EPS, "{aw}x{ah} in {sw}x{sh}");
            assert!((fit.offset.x - (sw - fit.scale * aw) / 2.0).abs() < EPS);
            assert!((fit.offset.y - (sh - fit.scale * ah) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_area_clamped() {
        let fit = fit_area(0.0, 0.0, 640.0, 480.0);
        assert!(fit.scale.is_finite());
        assert!(fit.scale > 0.0);
    }

    #[test]
    fn test_exact_fit_has_no_margin() {
        let fit = fit_area(1920.0, 1080.0, 960.0, 540.0);
        assert!((fit.scale - 0.5).abs() < EPS);
        assert!(fit.offset.length() < EPS);
        assert!((fit.content - glam::Vec2::new(960.0, 540.0)).length() < EPS);
    }

    #[test]
    fn test_contains() {
        let fit = fit_area(1000.0, 1000.0, 800.0, 400.0);
        assert!(fit.contains(Vec2::new(400.0, 200.0)));
        assert!(!fit.contains(Vec2::new(10.0, 200.0))); // in the pillarbox bar
    }
}
