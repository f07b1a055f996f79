/// Linear-space RGBA; the sRGB swapchain encodes it on write.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    /// Opaque color from sRGB bytes, e.g. a hex value picked in a design tool.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        fn to_linear(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        Self { r: to_linear(r), g: to_linear(g), b: to_linear(b), a: 1.0 }
    }

    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}
