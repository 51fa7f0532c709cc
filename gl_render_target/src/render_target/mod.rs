//! Render targets
//!
//! A render target is a surface a GL framebuffer attachment renders into:
//! a color buffer or a depth/stencil buffer. Downstream attachment logic only
//! sees the `RenderTarget` trait; the backend behind it is fixed by the type
//! of the device that produced it.

mod render_target;
mod surface_render_target;

pub use render_target::*;
pub use surface_render_target::*;
