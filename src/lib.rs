//! Corner Pin Library
//!
//! A corner-pin video filter: warps a rectangular source into an arbitrary
//! quadrilateral and exposes an interactive editor for dragging the four
//! corners over a live scene preview. The host compositor is reached only
//! through the [`host::SceneHost`] trait; the render pass consumes the packed
//! [`filter::WarpUniforms`] recomputed every tick.

pub mod editor;
pub mod error;
pub mod filter;
pub mod host;
pub mod quad;
pub mod space;
pub mod viewport;

// Re-export commonly used types
pub use editor::{EditorSession, EditorWindow, HandleState};
pub use error::FilterError;
pub use filter::{CornerPinFilter, WarpUniforms};
pub use host::{ItemPlacement, SceneHost, SceneItemId};
pub use quad::{Corner, PinQuad, QuadSettings};
pub use viewport::{fit_area, ViewportFit};
