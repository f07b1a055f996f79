//! GPU rendering subsystem.
//!
//! Renderers issue GPU commands via wgpu and own their GPU resources
//! (pipelines, buffers, textures).
//!
//! Convention:
//! - Card geometry lives in world space: logical pixels, origin at the viewport
//!   center, +Y up.
//! - The vertex shader applies the camera (position + zoom) and converts to NDC
//!   using the viewport uniform.

mod card;
mod common;
mod ctx;

pub use card::{CardCamera, CardDraw, CardRenderer};
pub use ctx::{RenderCtx, RenderTarget};
