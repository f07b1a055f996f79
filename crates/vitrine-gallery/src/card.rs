use vitrine_engine::coords::{Rect, Vec2, Viewport};
use vitrine_engine::render::CardDraw;

use crate::asset::AssetHandle;
use crate::config::DistortionConfig;
use crate::distortion::DistortionState;

/// Identity of a card: which section and which frame of the section pattern.
///
/// Stable across rebuilds, so a selection can be checked for survival.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CardId {
    pub section: u32,
    pub frame: u32,
}

impl CardId {
    pub const fn new(section: u32, frame: u32) -> Self {
        Self { section, frame }
    }

    /// Packed key for renderer-side maps.
    pub const fn key(self) -> u64 {
        ((self.section as u64) << 32) | self.frame as u64
    }
}

/// Values written to the card shader each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardUniforms {
    pub intensity: f32,
    pub pull: f32,
    /// Warp center, card uv.
    pub pointer: Vec2,
    /// Warp center on the previous frame.
    pub prev_pointer: Vec2,
    pub radius: f32,
    pub strength: f32,
    pub edge_mix: f32,
    pub alpha: f32,
}

impl CardUniforms {
    pub fn new(cfg: &DistortionConfig) -> Self {
        Self {
            intensity: 0.0,
            pull: 0.0,
            pointer: Vec2::new(0.5, 0.5),
            prev_pointer: Vec2::new(0.5, 0.5),
            radius: cfg.radius,
            strength: cfg.strength,
            edge_mix: cfg.edge_mix,
            alpha: 1.0,
        }
    }

    /// Second smoothing stage: moves uniforms toward the animator's current values.
    pub fn blend_toward(&mut self, state: &DistortionState, alpha: f32, cfg: &DistortionConfig) {
        let k = cfg.uniform_lerp;
        self.prev_pointer = self.pointer;
        self.pointer = self.pointer.lerp(state.last_uv, k);
        self.intensity += (state.current_intensity - self.intensity) * k;
        self.pull += (state.current_pull - self.pull) * k;
        if self.intensity.abs() < cfg.snap_epsilon && state.current_intensity == 0.0 {
            self.intensity = 0.0;
        }
        if self.pull.abs() < cfg.snap_epsilon && state.current_pull == 0.0 {
            self.pull = 0.0;
        }
        self.radius = cfg.radius;
        self.strength = cfg.strength;
        self.edge_mix = cfg.edge_mix;
        self.alpha = alpha;
    }

    /// Drops all warp immediately.
    pub fn clear_warp(&mut self) {
        self.intensity = 0.0;
        self.pull = 0.0;
        self.prev_pointer = self.pointer;
    }
}

/// One placed, renderable image instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub id: CardId,
    pub asset: AssetHandle,
    /// Fixed content-space rect (top-left origin, +Y down).
    pub content_rect: Rect,
    /// World-space center; recomputed every frame from the scroll offset.
    pub world_center: Vec2,
    pub anim: DistortionState,
    pub uniforms: CardUniforms,
    pub opacity: f32,
    /// 1 for the selected card, 0 otherwise.
    pub depth: f32,
}

impl CardNode {
    pub fn new(id: CardId, asset: AssetHandle, content_rect: Rect, cfg: &DistortionConfig) -> Self {
        Self {
            id,
            asset,
            content_rect,
            world_center: Vec2::zero(),
            anim: DistortionState::default(),
            uniforms: CardUniforms::new(cfg),
            opacity: 1.0,
            depth: 0.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.content_rect.size
    }

    /// Places the card in world space for `scroll_top`.
    pub fn reposition(&mut self, viewport: Viewport, scroll_top: f32) {
        let r = self.content_rect;
        self.world_center = Vec2::new(
            r.origin.x + r.size.x * 0.5 - viewport.width * 0.5,
            viewport.height * 0.5 - (r.origin.y + r.size.y * 0.5 - scroll_top),
        );
    }

    /// World-space rect (bottom-left origin, +Y up).
    pub fn world_rect(&self) -> Rect {
        Rect::from_center_size(self.world_center, self.size())
    }

    pub fn to_draw(&self) -> CardDraw {
        CardDraw {
            card_key: self.id.key(),
            center: self.world_center,
            size: self.size(),
            pointer: self.uniforms.pointer,
            prev_pointer: self.uniforms.prev_pointer,
            intensity: self.uniforms.intensity,
            pull: self.uniforms.pull,
            radius: self.uniforms.radius,
            strength: self.uniforms.strength,
            edge_mix: self.uniforms.edge_mix,
            alpha: self.uniforms.alpha,
            depth: self.depth,
        }
    }
}
