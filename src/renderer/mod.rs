//! Render adapter
//!
//! Turns a read-only view of the `World` into screen-space draw data. The
//! simulation only exposes world coordinates; the camera lives here.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{Camera, Frame, Hud, RenderOptions, TextAlign, TextItem, build_frame};
pub use vertex::Vertex;
