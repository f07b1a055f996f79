/// One acquired swapchain image plus the encoder recording into it.
///
/// Holding a `GpuFrame` blocks acquisition of the next image; hand it back to
/// [`Gpu::submit`](super::Gpu::submit) within the same frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the render loop should do after failing to acquire a swapchain image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain must be configured again before the next frame.
    Reconfigure,
    /// Drop this frame; the next one will likely succeed.
    SkipFrame,
    /// The device cannot continue; close the gallery.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn from_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}
