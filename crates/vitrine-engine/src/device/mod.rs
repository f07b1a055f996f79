//! wgpu device and window surface.
//!
//! [`Gpu`] owns the adapter, device, queue and the swapchain bound to the
//! gallery window. [`GpuInit`] carries the few knobs the studio exposes
//! (vsync, sRGB preference). [`GpuFrame`] is one acquired swapchain image.

mod context;
mod init;
mod present;

pub use context::Gpu;
pub use init::GpuInit;
pub use present::{GpuFrame, SurfaceErrorAction};
