use super::Vec2;

/// Axis-aligned rectangle.
///
/// `origin` is the minimum corner: top-left in screen/content space (+Y down),
/// bottom-left in the renderer's world space (+Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Builds a rectangle of `size` centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size * 0.5, size)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Closed containment: `[min, max]` on both axes.
    ///
    /// Closed rather than half-open so a pointer exactly on a card's far edge
    /// still reports a UV of `1.0` instead of missing the card.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x <= max.x && p.y <= max.y
    }

    /// Maps `p` into the rectangle's local `[0, 1]²` coordinates (clamped).
    ///
    /// Returns `None` for empty rectangles.
    #[inline]
    pub fn normalized_point(self, p: Vec2) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        let u = ((p.x - self.origin.x) / self.size.x).clamp(0.0, 1.0);
        let v = ((p.y - self.origin.y) / self.size.y).clamp(0.0, 1.0);
        Some(Vec2::new(u, v))
    }
}
