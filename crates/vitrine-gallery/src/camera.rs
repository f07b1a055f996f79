use vitrine_engine::coords::{Vec2, Viewport};
use vitrine_engine::render::CardCamera;

/// Orthographic camera over world space (logical px, origin at viewport center, +Y up).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// World point shown at the viewport center.
    pub position: Vec2,
    /// Screen px per world px.
    pub zoom: f32,
}

impl Camera {
    pub const IDENTITY: Camera = Camera { position: Vec2::new(0.0, 0.0), zoom: 1.0 };

    pub const fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    pub fn lerp(self, to: Camera, t: f32) -> Camera {
        Camera {
            position: self.position.lerp(to.position, t),
            zoom: self.zoom + (to.zoom - self.zoom) * t,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// World point under client position `client` (top-left origin, +Y down).
    pub fn client_to_world(&self, client: Vec2, viewport: Viewport) -> Option<Vec2> {
        let ndc = viewport.client_to_ndc(client)?;
        if !(self.zoom > 0.0) {
            return None;
        }
        let half = viewport.size() * 0.5;
        Some(Vec2::new(
            self.position.x + ndc.x * half.x / self.zoom,
            self.position.y + ndc.y * half.y / self.zoom,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Camera> for CardCamera {
    fn from(c: Camera) -> Self {
        CardCamera { position: c.position, zoom: c.zoom }
    }
}
