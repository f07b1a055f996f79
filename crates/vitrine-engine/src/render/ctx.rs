use crate::coords::Viewport;

/// Borrowed GPU handles for one frame, plus what renderers need to know
/// about the surface they draw into.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Pipelines are rebuilt when this changes.
    pub surface_format: wgpu::TextureFormat,
    /// Logical size of the window; the card shader maps world px to NDC with it.
    pub viewport: Viewport,
    /// Card textures with a larger edge are refused.
    pub max_texture_dimension: u32,
}

/// The encoder and swapchain view of the frame being recorded. The surface
/// has already been cleared, so renderers load rather than clear.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
