/// Options for bringing up the gallery's GPU context.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    ///
    /// Card textures are uploaded as `Rgba8UnormSrgb`; a linear target would
    /// render photographs washed out.
    pub prefer_srgb: bool,

    /// `Fifo` paces the frame loop to the display, which the card easing
    /// assumes. The studio's `--no-vsync` asks for `AutoNoVsync`.
    pub present_mode: wgpu::PresentMode,

    /// Requested compositing mode; ignored when the surface lacks it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Swapchain depth hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Chooses the swapchain format from what the surface supports.
    pub fn pick_format(&self, supported: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
        let srgb = supported.iter().copied().find(|f| {
            matches!(f, wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb)
        });
        match srgb {
            Some(f) if self.prefer_srgb => Some(f),
            _ => supported.first().copied(),
        }
    }

    /// Falls back to the surface's first mode when the requested one is missing.
    pub fn pick_alpha_mode(&self, supported: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
        self.alpha_mode
            .filter(|m| supported.contains(m))
            .or_else(|| supported.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }

    /// Present mode to request, downgraded to `Fifo` when unsupported.
    ///
    /// The `Auto*` modes are resolved by wgpu itself and always pass.
    pub fn pick_present_mode(&self, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
        let auto = matches!(
            self.present_mode,
            wgpu::PresentMode::AutoVsync | wgpu::PresentMode::AutoNoVsync
        );
        if auto || supported.contains(&self.present_mode) {
            self.present_mode
        } else {
            wgpu::PresentMode::Fifo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn srgb_preferred_over_first_format() {
        let init = GpuInit::default();
        assert_eq!(init.pick_format(&[F::Bgra8Unorm, F::Bgra8UnormSrgb]), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn linear_when_srgb_not_wanted() {
        let init = GpuInit { prefer_srgb: false, ..GpuInit::default() };
        assert_eq!(init.pick_format(&[F::Bgra8Unorm, F::Bgra8UnormSrgb]), Some(F::Bgra8Unorm));
    }

    #[test]
    fn no_formats_no_surface() {
        assert_eq!(GpuInit::default().pick_format(&[]), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let init = GpuInit {
            alpha_mode: Some(wgpu::CompositeAlphaMode::PreMultiplied),
            ..GpuInit::default()
        };
        assert_eq!(
            init.pick_alpha_mode(&[wgpu::CompositeAlphaMode::Opaque]),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn unsupported_present_mode_becomes_fifo() {
        let init = GpuInit { present_mode: wgpu::PresentMode::Mailbox, ..GpuInit::default() };
        assert_eq!(init.pick_present_mode(&[wgpu::PresentMode::Fifo]), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn auto_present_modes_pass_through() {
        let init = GpuInit { present_mode: wgpu::PresentMode::AutoNoVsync, ..GpuInit::default() };
        assert_eq!(init.pick_present_mode(&[]), wgpu::PresentMode::AutoNoVsync);
    }
}
