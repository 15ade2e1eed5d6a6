//! Pixelview crate.
//!
//! Renders a raw RGB pixel buffer onto a surface as a single textured quad,
//! so a decoded frame can be eyeballed (or read back and asserted on) by an
//! image-codec test harness.

pub mod device;
pub mod logging;
pub mod present;

mod error;

pub use error::PresentError;
pub use present::{ImagePresenter, OffscreenPresenter, ShaderSet};
