//! Interactive corner-pin editor
//!
//! Session state, the handle drag controller, the overlay painter, and the
//! egui panel that ties them together.

pub mod overlay;
pub mod session;
pub mod window;

pub use overlay::OverlayStyle;
pub use session::{EditorSession, HandleState, DRAG_THRESHOLD, HANDLE_RADIUS};
pub use window::EditorWindow;
