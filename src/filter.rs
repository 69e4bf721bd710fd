//! Corner-pin filter instance
//!
//! Owns the live [`PinQuad`] and, once per host tick, derives the normalized
//! UV quad from the target's *current* pixel size. The render pass pulls the
//! packed uniforms each frame; nothing is pushed. A target reporting zero
//! dimensions skips the frame entirely.

use std::fs;
use std::path::Path;

use crate::error::FilterError;
use crate::host::SceneHost;
use crate::quad::{PinQuad, QuadSettings};

/// Uniform block handed to the warp shader.
///
/// Laid out for direct GPU upload: four UV corners, the target's pixel size,
/// and the outline flag packed as a float.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WarpUniforms {
    /// Top-left UV.
    pub uv1: [f32; 2],
    /// Top-right UV.
    pub uv2: [f32; 2],
    /// Bottom-left UV.
    pub uv3: [f32; 2],
    /// Bottom-right UV.
    pub uv4: [f32; 2],
    /// Target width in pixels.
    pub tex_width: f32,
    /// Target height in pixels.
    pub tex_height: f32,
    /// 1.0 when the outline should be drawn into the output.
    pub outline: f32,
    pub _pad: f32,
}

/// One corner-pin filter instance.
pub struct CornerPinFilter {
    quad: PinQuad,
    uniforms: WarpUniforms,
    has_target: bool,
}

impl CornerPinFilter {
    /// Create a filter from persisted settings.
    pub fn new(settings: &QuadSettings) -> Self {
        Self {
            quad: settings.to_quad(),
            uniforms: bytemuck::Zeroable::zeroed(),
            has_target: false,
        }
    }

    /// Create a filter with the identity pin for the given source size.
    pub fn identity(source_w: u32, source_h: u32) -> Self {
        Self {
            quad: PinQuad::from_source_size(source_w, source_h),
            uniforms: bytemuck::Zeroable::zeroed(),
            has_target: false,
        }
    }

    /// Replace the configuration (numeric field edits arrive here).
    pub fn update(&mut self, settings: &QuadSettings) {
        self.quad = settings.to_quad();
    }

    /// Snapshot the current configuration for persistence.
    pub fn settings(&self) -> QuadSettings {
        QuadSettings::from_quad(&self.quad)
    }

    /// The live quad, read by the overlay each draw.
    pub fn quad(&self) -> &PinQuad {
        &self.quad
    }

    /// Mutable access for the drag controller and numeric fields. The next
    /// tick picks the change up; nothing is recomputed eagerly.
    pub fn quad_mut(&mut self) -> &mut PinQuad {
        &mut self.quad
    }

    /// Per-frame tick: recompute the UV quad from the target's current size.
    pub fn tick(&mut self, host: &dyn SceneHost) {
        let (w, h) = host.target_size();
        self.has_target = w > 0 && h > 0;
        if !self.has_target {
            return;
        }

        let uvs = self.quad.uvs(w, h);
        self.uniforms = WarpUniforms {
            uv1: uvs[0].to_array(),
            uv2: uvs[1].to_array(),
            uv3: uvs[2].to_array(),
            uv4: uvs[3].to_array(),
            tex_width: w as f32,
            tex_height: h as f32,
            outline: if self.quad.show_outline { 1.0 } else { 0.0 },
            _pad: 0.0,
        };
    }

    /// Inputs for this frame's warp pass, or `None` when there is no target
    /// and the render pass must be skipped.
    pub fn render_inputs(&self) -> Option<WarpUniforms> {
        self.has_target.then_some(self.uniforms)
    }

    /// Load settings from a JSON file.
    pub fn load_settings(path: &Path) -> Result<QuadSettings, FilterError> {
        let text = fs::read_to_string(path).map_err(|source| FilterError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save the current settings to a JSON file.
    pub fn save_settings(&self, path: &Path) -> Result<(), FilterError> {
        let text = serde_json::to_string_pretty(&self.settings())?;
        fs::write(path, text).map_err(|source| FilterError::WriteSettings {
            path: path.to_path_buf(),
            source,
        })
    }
}
