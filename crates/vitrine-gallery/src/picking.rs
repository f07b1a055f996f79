//! Pointer → card hit testing and tap classification.

use vitrine_engine::coords::{Vec2, Viewport};

use crate::camera::Camera;
use crate::card::{CardId, CardNode};

/// The topmost card under the pointer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Index into the slice passed to [`pick`].
    pub index: usize,
    pub id: CardId,
    /// Local hit coordinate in `[0, 1]²`; `v` grows upward.
    pub uv: Vec2,
}

/// Returns the nearest card under `client`.
///
/// The camera looks straight down the Z axis, so the ray through the pointer
/// hits every card plane at the same world XY; "nearest" is the highest depth.
/// Among equal depths the card drawn last wins.
pub fn pick(client: Vec2, viewport: Viewport, camera: &Camera, cards: &[CardNode]) -> Option<PickHit> {
    let world = camera.client_to_world(client, viewport)?;

    let mut best: Option<(usize, f32)> = None;
    for (i, card) in cards.iter().enumerate() {
        if !card.world_rect().contains(world) {
            continue;
        }
        if best.is_none_or(|(_, depth)| card.depth >= depth) {
            best = Some((i, card.depth));
        }
    }

    let (index, _) = best?;
    let card = &cards[index];
    let uv = card.world_rect().normalized_point(world)?;
    Some(PickHit { index, id: card.id, uv })
}

/// Pointer-down snapshot used to tell taps from drags.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerDown {
    pub client: Vec2,
    pub scroll_top: f32,
}

/// A press is a tap when pointer travel on each axis and scroll travel all stay below `threshold`.
pub fn is_tap(down: PointerDown, up_client: Vec2, up_scroll_top: f32, threshold: f32) -> bool {
    (up_client.x - down.client.x).abs() < threshold
        && (up_client.y - down.client.y).abs() < threshold
        && (up_scroll_top - down.scroll_top).abs() < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetHandle;
    use crate::config::DistortionConfig;
    use vitrine_engine::coords::Rect;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    /// Card at content rect `(x, y, w, h)`, unscrolled.
    fn card(frame: u32, x: f32, y: f32, w: f32, h: f32) -> CardNode {
        let mut c = CardNode::new(
            CardId::new(0, frame),
            AssetHandle(frame),
            Rect::new(x, y, w, h),
            &DistortionConfig::default(),
        );
        c.reposition(VP, 0.0);
        c
    }

    // ── pick ──────────────────────────────────────────────────────────────

    #[test]
    fn pick_hits_card_under_pointer() {
        let cards = vec![card(0, 0.0, 0.0, 100.0, 100.0), card(1, 200.0, 0.0, 100.0, 100.0)];
        let hit = pick(Vec2::new(250.0, 50.0), VP, &Camera::IDENTITY, &cards).unwrap();
        assert_eq!(hit.id, CardId::new(0, 1));
        assert_eq!(hit.index, 1);
        assert!((hit.uv.x - 0.5).abs() < 1e-4);
        assert!((hit.uv.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn pick_uv_v_grows_upward() {
        let cards = vec![card(0, 0.0, 0.0, 100.0, 100.0)];
        let hit = pick(Vec2::new(10.0, 90.0), VP, &Camera::IDENTITY, &cards).unwrap();
        assert!((hit.uv.x - 0.1).abs() < 1e-4);
        assert!((hit.uv.y - 0.1).abs() < 1e-4);
    }

    #[test]
    fn pick_misses_gap() {
        let cards = vec![card(0, 0.0, 0.0, 100.0, 100.0)];
        assert!(pick(Vec2::new(150.0, 50.0), VP, &Camera::IDENTITY, &cards).is_none());
    }

    #[test]
    fn pick_prefers_raised_card() {
        let mut cards = vec![card(0, 0.0, 0.0, 200.0, 200.0), card(1, 50.0, 50.0, 200.0, 200.0)];
        cards[0].depth = 1.0;
        let hit = pick(Vec2::new(100.0, 100.0), VP, &Camera::IDENTITY, &cards).unwrap();
        assert_eq!(hit.index, 0);

        cards[0].depth = 0.0;
        let hit = pick(Vec2::new(100.0, 100.0), VP, &Camera::IDENTITY, &cards).unwrap();
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn pick_follows_scroll() {
        let mut cards = vec![card(0, 0.0, 300.0, 100.0, 100.0)];
        assert!(pick(Vec2::new(50.0, 50.0), VP, &Camera::IDENTITY, &cards).is_none());
        cards[0].reposition(VP, 300.0);
        assert!(pick(Vec2::new(50.0, 50.0), VP, &Camera::IDENTITY, &cards).is_some());
    }

    #[test]
    fn pick_through_zoomed_camera() {
        // Card centered at world (-300, 250); zoom 2 on it makes it span 200px around the viewport center.
        let cards = vec![card(0, 50.0, 0.0, 100.0, 100.0)];
        let cam = Camera::new(cards[0].world_center, 2.0);
        assert!(pick(Vec2::new(400.0, 300.0), VP, &cam, &cards).is_some());
        assert!(pick(Vec2::new(490.0, 300.0), VP, &cam, &cards).is_some());
        assert!(pick(Vec2::new(510.0, 300.0), VP, &cam, &cards).is_none());
    }

    #[test]
    fn pick_on_degenerate_viewport() {
        let cards = vec![card(0, 0.0, 0.0, 100.0, 100.0)];
        assert!(pick(Vec2::new(0.0, 0.0), Viewport::new(0.0, 0.0), &Camera::IDENTITY, &cards).is_none());
    }

    // ── tap threshold ─────────────────────────────────────────────────────

    #[test]
    fn small_moves_are_taps() {
        let down = PointerDown { client: Vec2::new(100.0, 100.0), scroll_top: 40.0 };
        for d in [0.0, 5.0, 15.0] {
            assert!(is_tap(down, Vec2::new(100.0 + d, 100.0 - d), 40.0 + d, 16.0), "d = {d}");
        }
    }

    #[test]
    fn any_axis_past_threshold_is_a_drag() {
        let down = PointerDown { client: Vec2::new(100.0, 100.0), scroll_top: 0.0 };
        assert!(!is_tap(down, Vec2::new(117.0, 100.0), 0.0, 16.0));
        assert!(!is_tap(down, Vec2::new(100.0, 83.0), 0.0, 16.0));
        assert!(!is_tap(down, Vec2::new(100.0, 100.0), 17.0, 16.0));
    }
}
