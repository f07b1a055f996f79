//! Per-card hover-warp animation.
//!
//! Pointer handlers write targets only; [`DistortionState::advance`] runs once
//! per frame and is the only place current values move.

use vitrine_engine::coords::Vec2;

use crate::card::CardId;
use crate::config::DistortionConfig;

const UV_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Smoothed warp state of one card.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistortionState {
    pub current_intensity: f32,
    pub target_intensity: f32,
    pub current_pull: f32,
    pub target_pull: f32,
    /// Smoothed warp center, card uv.
    pub last_uv: Vec2,
    pub target_uv: Vec2,
}

impl Default for DistortionState {
    fn default() -> Self {
        Self {
            current_intensity: 0.0,
            target_intensity: 0.0,
            current_pull: 0.0,
            target_pull: 0.0,
            last_uv: UV_CENTER,
            target_uv: UV_CENTER,
        }
    }
}

impl DistortionState {
    /// Pointer moved over this card. Speeds are pointer travel since the previous move event.
    pub fn hover_move(&mut self, uv: Vec2, speed_px: f32, speed_uv: f32, cfg: &DistortionConfig) {
        self.target_uv = self.target_uv.lerp(uv, cfg.hover_blend);
        let boost = (speed_px * cfg.speed_px_gain).max(speed_uv * cfg.speed_uv_gain);
        self.target_intensity = boost.max(cfg.idle_floor).min(cfg.max_intensity);
        self.target_pull = cfg.hover_pull;
    }

    /// Pointer has rested on the card past the idle timeout.
    pub fn settle(&mut self, cfg: &DistortionConfig) {
        self.target_intensity = cfg.idle_floor;
    }

    /// Advances one frame.
    pub fn advance(&mut self, hovered: bool, cfg: &DistortionConfig) {
        if hovered {
            self.target_pull = cfg.hover_pull;
        } else {
            self.target_intensity = snap(self.target_intensity * cfg.decay, cfg.snap_epsilon);
            self.target_pull = snap(self.target_pull * cfg.pull_decay, cfg.snap_epsilon);
        }

        self.current_intensity = approach(
            self.current_intensity,
            self.target_intensity,
            cfg.easing,
            cfg.snap_epsilon,
        );
        self.current_pull = approach(self.current_pull, self.target_pull, cfg.easing, cfg.snap_epsilon);
        self.last_uv = self.last_uv.lerp(self.target_uv, cfg.easing);
    }

    /// Zeroes intensity and pull, targets included.
    pub fn suppress(&mut self) {
        self.current_intensity = 0.0;
        self.target_intensity = 0.0;
        self.current_pull = 0.0;
        self.target_pull = 0.0;
    }

    pub fn is_idle(&self) -> bool {
        self.current_intensity == 0.0
            && self.target_intensity == 0.0
            && self.current_pull == 0.0
            && self.target_pull == 0.0
    }
}

#[inline]
fn snap(v: f32, eps: f32) -> f32 {
    if v.abs() < eps { 0.0 } else { v }
}

/// Exponential step toward `target`; lands exactly on a zero target once within `eps`.
#[inline]
fn approach(current: f32, target: f32, k: f32, eps: f32) -> f32 {
    let next = current + (target - current) * k;
    if target == 0.0 { snap(next, eps) } else { next }
}

/// Tracks the hovered card and the previous pointer sample used for speed.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HoverTracker {
    pub card: Option<CardId>,
    last_client: Option<Vec2>,
    last_uv: Option<Vec2>,
    /// When the hovered card's intensity falls back to the idle floor.
    reset_deadline_ms: Option<f64>,
}

impl HoverTracker {
    /// Records a pointer sample over `card`; returns `(speed_px, speed_uv)`.
    ///
    /// Entering a different card starts a fresh sample (zero speed). Each sample
    /// replaces the pending idle deadline.
    pub fn sample(
        &mut self,
        card: CardId,
        client: Vec2,
        uv: Vec2,
        now_ms: f64,
        cfg: &DistortionConfig,
    ) -> (f32, f32) {
        if self.card != Some(card) {
            self.card = Some(card);
            self.last_client = None;
            self.last_uv = None;
        }
        let speed_px = self.last_client.map_or(0.0, |c| (client - c).length());
        let speed_uv = self.last_uv.map_or(0.0, |u| (uv - u).length());
        self.last_client = Some(client);
        self.last_uv = Some(uv);
        self.reset_deadline_ms = Some(now_ms + cfg.idle_reset_ms);
        (speed_px, speed_uv)
    }

    /// Returns the hovered card if its idle deadline has passed; the deadline fires once.
    pub fn take_expired(&mut self, now_ms: f64) -> Option<CardId> {
        match self.reset_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.reset_deadline_ms = None;
                self.card
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DistortionConfig {
        DistortionConfig::default()
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn hover_pulls_target_uv_partway() {
        let mut s = DistortionState::default();
        s.hover_move(Vec2::new(1.0, 0.5), 0.0, 0.0, &cfg());
        assert!((s.target_uv.x - (0.5 + 0.5 * 0.45)).abs() < 1e-6);
        assert_eq!(s.target_pull, 0.85);
    }

    #[test]
    fn intensity_is_clamped_between_floor_and_max() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 0.0, 0.0, &c);
        assert_eq!(s.target_intensity, c.idle_floor);
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);
        assert_eq!(s.target_intensity, c.max_intensity);
        s.hover_move(UV_CENTER, 0.0, 0.05, &c);
        assert!((s.target_intensity - 0.05 * c.speed_uv_gain).abs() < 1e-6);
    }

    #[test]
    fn settle_returns_to_floor() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 500.0, 0.0, &c);
        s.settle(&c);
        assert_eq!(s.target_intensity, c.idle_floor);
    }

    // ── smoothing ─────────────────────────────────────────────────────────

    #[test]
    fn current_eases_toward_target() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);
        s.advance(true, &c);
        assert!((s.current_intensity - c.easing).abs() < 1e-6);
        assert!(s.current_intensity < s.target_intensity);
    }

    // ── decay (P6) ────────────────────────────────────────────────────────

    #[test]
    fn unhovered_target_decays_strictly_then_hits_zero() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);

        let mut prev = s.target_intensity;
        let mut frames = 0;
        while s.target_intensity > 0.0 {
            s.advance(false, &c);
            frames += 1;
            if s.target_intensity > 0.0 {
                assert!((s.target_intensity - prev * c.decay).abs() < 1e-6);
            }
            assert!(s.target_intensity < prev);
            prev = s.target_intensity;
            assert!(frames < 200, "did not converge");
        }
        assert_eq!(s.target_intensity, 0.0);
    }

    #[test]
    fn everything_settles_to_exact_zero() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);
        for _ in 0..30 {
            s.advance(true, &c);
        }
        for _ in 0..1000 {
            s.advance(false, &c);
        }
        assert!(s.is_idle());
    }

    #[test]
    fn pull_decays_faster_than_intensity() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);
        s.advance(false, &c);
        assert!((s.target_pull - 0.85 * 0.72).abs() < 1e-6);
    }

    #[test]
    fn suppress_zeroes_immediately() {
        let c = cfg();
        let mut s = DistortionState::default();
        s.hover_move(UV_CENTER, 10_000.0, 0.0, &c);
        s.advance(true, &c);
        s.suppress();
        assert!(s.is_idle());
    }

    // ── hover tracker ─────────────────────────────────────────────────────

    #[test]
    fn speed_is_measured_within_one_card() {
        let c = cfg();
        let mut t = HoverTracker::default();
        let a = CardId::new(0, 0);
        assert_eq!(t.sample(a, Vec2::new(0.0, 0.0), Vec2::new(0.1, 0.1), 0.0, &c), (0.0, 0.0));
        let (px, _) = t.sample(a, Vec2::new(3.0, 4.0), Vec2::new(0.1, 0.1), 10.0, &c);
        assert_eq!(px, 5.0);
        let fresh = t.sample(CardId::new(0, 1), Vec2::new(50.0, 50.0), Vec2::zero(), 20.0, &c);
        assert_eq!(fresh, (0.0, 0.0));
    }

    #[test]
    fn idle_deadline_is_rescheduled_and_fires_once() {
        let c = cfg();
        let mut t = HoverTracker::default();
        let a = CardId::new(0, 0);
        t.sample(a, Vec2::zero(), UV_CENTER, 0.0, &c);
        t.sample(a, Vec2::new(1.0, 0.0), UV_CENTER, 80.0, &c);
        assert_eq!(t.take_expired(150.0), None);
        assert_eq!(t.take_expired(180.0), Some(a));
        assert_eq!(t.take_expired(500.0), None);
    }
}
