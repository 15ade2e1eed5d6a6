//! Frame presentation.
//!
//! One textured quad, one draw call. `ImagePresenter` targets a window
//! surface; `OffscreenPresenter` targets a readable texture for harnesses
//! that assert on pixels instead of looking at a screen.
//!
//! Convention:
//! - input frames are RGB, row-major, top row first
//! - quad positions are clip-space, texcoords have a top-left origin, so
//!   the image lands right side up without any upload-time flip

mod common;
mod frame;
mod pipeline;
mod presenter;
mod quad;
mod readback;

pub use pipeline::ShaderSet;
pub use presenter::{ImagePresenter, OffscreenPresenter};
