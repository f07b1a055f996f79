//! Platform and GPU layer for the Vitrine gallery.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`window`] | winit event loop, `Runtime`, `RuntimeConfig` |
//! | [`core`] | `App` trait and the per-frame `FrameCtx` |
//! | [`device`] | wgpu device and swapchain (`Gpu`, `GpuInit`) |
//! | [`input`] | pointer, wheel and key events translated from winit |
//! | [`time`] | `FrameClock` |
//! | [`coords`] | `Vec2`, `Rect`, `Viewport`, `ColorRgba` |
//! | [`render`] | textured card renderer and its WGSL shader |
//! | [`logging`] | `init_logging` |
//!
//! Nothing here knows about layout or zoom; that lives in `vitrine-gallery`.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
