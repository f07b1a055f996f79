use super::Vec2;

/// Viewport size in logical pixels.
///
/// Renderers treat this as the basis for converting logical px positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Converts a client-space point (top-left origin, +Y down) into normalized
    /// device coordinates (`[-1, 1]`, +Y up).
    ///
    /// Returns `None` when the viewport has no area.
    #[inline]
    pub fn client_to_ndc(self, p: Vec2) -> Option<Vec2> {
        if !self.is_valid() {
            return None;
        }
        Some(Vec2::new(
            (p.x / self.width) * 2.0 - 1.0,
            1.0 - (p.y / self.height) * 2.0,
        ))
    }
}
