//! Quadrilateral model and persisted settings
//!
//! The four corner points are the filter's single source of truth: the render
//! pass derives normalized UVs from them every tick, and the editor overlay
//! projects them every draw. Corners are signed source-pixel offsets and may
//! lie anywhere — outside the source rectangle, self-intersecting, or
//! degenerate; all of that is valid configuration.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::space;

/// Lower bound for a persisted corner coordinate.
pub const COORD_MIN: i32 = -8192;
/// Upper bound for a persisted corner coordinate.
pub const COORD_MAX: i32 = 8192;

/// One of the four quad corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners, in hit-test order (first match wins).
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Display name for UI labels.
    pub fn label(&self) -> &'static str {
        match self {
            Corner::TopLeft => "Top Left",
            Corner::TopRight => "Top Right",
            Corner::BottomLeft => "Bottom Left",
            Corner::BottomRight => "Bottom Right",
        }
    }

    fn index(&self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }
}

/// The corner-pin quadrilateral: four corners in source pixels plus the
/// outline-display flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PinQuad {
    corners: [IVec2; 4],
    /// Whether the warp shader draws the quad outline into the output.
    pub show_outline: bool,
}

impl Default for PinQuad {
    fn default() -> Self {
        Self {
            corners: [IVec2::ZERO; 4],
            show_outline: false,
        }
    }
}

impl PinQuad {
    /// Identity pin for a source of the given size: corners at the source's
    /// actual corners, outline off.
    pub fn from_source_size(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        Self {
            corners: [
                IVec2::new(0, 0),
                IVec2::new(w, 0),
                IVec2::new(0, h),
                IVec2::new(w, h),
            ],
            show_outline: false,
        }
    }

    /// Get a corner position in source pixels.
    pub fn corner(&self, corner: Corner) -> IVec2 {
        self.corners[corner.index()]
    }

    /// Set a corner position. Both components are written together so a
    /// concurrent reader never observes a half-updated corner.
    pub fn set_corner(&mut self, corner: Corner, position: IVec2) {
        self.corners[corner.index()] = position;
    }

    /// Normalized UV for one corner given the current source dimensions.
    pub fn corner_uv(&self, corner: Corner, source_w: u32, source_h: u32) -> Vec2 {
        space::to_normalized(
            self.corner(corner).as_vec2(),
            source_w as f32,
            source_h as f32,
        )
    }

    /// Normalized UVs for all four corners, in `Corner::ALL` order.
    pub fn uvs(&self, source_w: u32, source_h: u32) -> [Vec2; 4] {
        Corner::ALL.map(|c| self.corner_uv(c, source_w, source_h))
    }
}

/// Persisted filter configuration: a flat key/value set of eight integers and
/// the outline flag. Field names match the persisted settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadSettings {
    #[serde(rename = "topLeftX")]
    pub top_left_x: i32,
    #[serde(rename = "topLeftY")]
    pub top_left_y: i32,
    #[serde(rename = "topRightX")]
    pub top_right_x: i32,
    #[serde(rename = "topRightY")]
    pub top_right_y: i32,
    #[serde(rename = "bottomLeftX")]
    pub bottom_left_x: i32,
    #[serde(rename = "bottomLeftY")]
    pub bottom_left_y: i32,
    #[serde(rename = "bottomRightX")]
    pub bottom_right_x: i32,
    #[serde(rename = "bottomRightY")]
    pub bottom_right_y: i32,
    #[serde(rename = "outline")]
    pub outline: bool,
}

impl QuadSettings {
    /// Snapshot the live quad for persistence.
    pub fn from_quad(quad: &PinQuad) -> Self {
        let tl = quad.corner(Corner::TopLeft);
        let tr = quad.corner(Corner::TopRight);
        let bl = quad.corner(Corner::BottomLeft);
        let br = quad.corner(Corner::BottomRight);
        Self {
            top_left_x: tl.x,
            top_left_y: tl.y,
            top_right_x: tr.x,
            top_right_y: tr.y,
            bottom_left_x: bl.x,
            bottom_left_y: bl.y,
            bottom_right_x: br.x,
            bottom_right_y: br.y,
            outline: quad.show_outline,
        }
    }

    /// Build the live quad, clamping every coordinate to the configuration
    /// range. Clamping happens only at this boundary; the live model itself
    /// is unconstrained.
    pub fn to_quad(&self) -> PinQuad {
        let clamp = |v: i32| v.clamp(COORD_MIN, COORD_MAX);
        let mut quad = PinQuad {
            show_outline: self.outline,
            ..Default::default()
        };
        quad.set_corner(
            Corner::TopLeft,
            IVec2::new(clamp(self.top_left_x), clamp(self.top_left_y)),
        );
        quad.set_corner(
            Corner::TopRight,
            IVec2::new(clamp(self.top_right_x), clamp(self.top_right_y)),
        );
        quad.set_corner(
            Corner::BottomLeft,
            IVec2::new(clamp(self.bottom_left_x), clamp(self.bottom_left_y)),
        );
        quad.set_corner(
            Corner::BottomRight,
            IVec2::new(clamp(self.bottom_right_x), clamp(self.bottom_right_y)),
        );
        quad
    }
}
