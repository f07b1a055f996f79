//! The frame-driven render loop.
//!
//! Input handlers only record targets (hover samples, tween requests). All
//! animated state moves in [`Gallery::frame`], which the host calls once per
//! display refresh with a monotonic timestamp.

use std::collections::HashMap;

use vitrine_engine::coords::{Vec2, Viewport};
use vitrine_grid::{FrameSpec, GridDocument};

use crate::asset::AssetPool;
use crate::backend::{CardBackend, FrameOutput, HostCtx, ScrollMetrics};
use crate::camera::Camera;
use crate::card::{CardId, CardNode};
use crate::config::GalleryConfig;
use crate::detail::DetailResolver;
use crate::distortion::HoverTracker;
use crate::history::{HistoryBackend, HistoryBridge, HistoryState, PopAction};
use crate::layout::{LayoutParams, compute_layout};
use crate::picking::{PointerDown, is_tap, pick};
use crate::zoom::{TapTarget, ZoomEvent, ZoomMachine, ZoomPhase};

pub struct Gallery {
    config: GalleryConfig,
    frames: Vec<FrameSpec>,
    columns: u32,
    pool: AssetPool,
    resolver: Box<dyn DetailResolver>,
    viewport: Viewport,

    cards: Vec<CardNode>,
    section_count: u32,
    section_stride: f32,
    content_height: f32,
    /// Content height at the last infinite-scroll extension.
    extend_guard: f32,
    needs_rebuild: bool,
    reset_scroll: bool,

    zoom: ZoomMachine,
    history: HistoryBridge,
    /// Zoom side effects waiting for the next frame's dispatch.
    pending_events: Vec<ZoomEvent>,

    hover: HoverTracker,
    pointer: Option<Vec2>,
    down: Option<PointerDown>,
}

impl Gallery {
    pub fn new(
        config: GalleryConfig,
        viewport: Viewport,
        grid: &GridDocument,
        pool: AssetPool,
        resolver: Box<dyn DetailResolver>,
    ) -> Self {
        let columns = grid.columns.unwrap_or(config.layout.columns).max(1);
        let section_count = config.layout.initial_sections;
        Self {
            frames: grid.frames.clone(),
            columns,
            pool,
            resolver,
            viewport,
            cards: Vec::new(),
            section_count,
            section_stride: 0.0,
            content_height: viewport.height.max(0.0),
            extend_guard: 0.0,
            needs_rebuild: true,
            reset_scroll: false,
            zoom: ZoomMachine::new(),
            history: HistoryBridge::new(),
            pending_events: Vec::new(),
            hover: HoverTracker::default(),
            pointer: None,
            down: None,
            config,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn cards(&self) -> &[CardNode] {
        &self.cards
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> ZoomPhase {
        self.zoom.phase()
    }

    pub fn selected(&self) -> Option<CardId> {
        self.zoom.selected()
    }

    pub fn camera(&self) -> Camera {
        self.zoom.camera()
    }

    pub fn zoom(&self) -> &ZoomMachine {
        &self.zoom
    }

    pub fn section_count(&self) -> u32 {
        self.section_count
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn assets(&self) -> &AssetPool {
        &self.pool
    }

    // ── content ───────────────────────────────────────────────────────────

    pub fn set_assets(&mut self, pool: AssetPool) {
        self.pool = pool;
        self.content_changed();
    }

    pub fn set_frames(&mut self, grid: &GridDocument) {
        self.frames = grid.frames.clone();
        self.columns = grid.columns.unwrap_or(self.config.layout.columns).max(1);
        self.content_changed();
    }

    /// Card ids are positional, so a selection cannot survive new content
    /// even when its id is rebuilt.
    fn content_changed(&mut self) {
        self.section_count = self.config.layout.initial_sections;
        self.extend_guard = 0.0;
        self.needs_rebuild = true;
        self.reset_scroll = true;
        self.hover.clear();
        let events = self.zoom.reset();
        self.pending_events.extend(events);
    }

    /// New viewport size. Rebuilds the layout and drops any selection.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("gallery: resize {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.needs_rebuild = true;
        self.hover.clear();
        let events = self.zoom.reset();
        self.pending_events.extend(events);
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, client: Vec2, now_ms: f64) {
        self.pointer = Some(client);
        let hit = pick(client, self.viewport, &self.zoom.camera(), &self.cards);
        match hit {
            Some(hit) if self.zoom.phase() == ZoomPhase::None => {
                let cfg = &self.config.distortion;
                let (speed_px, speed_uv) = self.hover.sample(hit.id, client, hit.uv, now_ms, cfg);
                self.cards[hit.index].anim.hover_move(hit.uv, speed_px, speed_uv, cfg);
            }
            _ => self.hover.clear(),
        }
    }

    pub fn pointer_down(&mut self, client: Vec2, scroll_top: f32) {
        self.down = Some(PointerDown { client, scroll_top });
    }

    pub fn pointer_up(&mut self, client: Vec2, scroll_top: f32, now_ms: f64) {
        let Some(down) = self.down.take() else { return };
        if !is_tap(down, client, scroll_top, self.config.tap_threshold_px) {
            return;
        }
        let target = pick(client, self.viewport, &self.zoom.camera(), &self.cards)
            .and_then(|hit| self.tap_target(hit.index));
        let events = self.zoom.tap(target, self.viewport, now_ms, &self.config.zoom);
        self.pending_events.extend(events);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        self.down = None;
        self.hover.clear();
    }

    /// Escape key.
    pub fn escape(&mut self, now_ms: f64) {
        self.close(now_ms);
    }

    /// Explicit close (overlay close button).
    pub fn close(&mut self, now_ms: f64) {
        let events = self.zoom.zoom_out(now_ms, &self.config.zoom);
        self.pending_events.extend(events);
    }

    /// A history pop arrived. Returns whether the gallery intercepted it.
    pub fn pop_state(
        &mut self,
        state: Option<&HistoryState>,
        now_ms: f64,
        history: &mut dyn HistoryBackend,
    ) -> PopAction {
        let action = self.history.on_pop(state, self.zoom.phase(), history);
        if action == PopAction::ZoomOut {
            self.close(now_ms);
        }
        action
    }

    /// The overlay's image is ready.
    pub fn overlay_image_loaded(&mut self) {
        let events = self.zoom.overlay_image_loaded();
        self.pending_events.extend(events);
    }

    fn tap_target(&self, index: usize) -> Option<TapTarget> {
        let card = self.cards.get(index)?;
        let asset = self.pool.get(card.asset)?;
        let detail = self
            .resolver
            .resolve(&asset.project_id, asset.project_slug.as_deref());
        Some(TapTarget {
            card: card.id,
            world_rect: card.world_rect(),
            detail,
            image_url: asset.source_url.clone(),
        })
    }

    // ── frame ─────────────────────────────────────────────────────────────

    pub fn frame(&mut self, now_ms: f64, scroll: ScrollMetrics, host: &mut HostCtx<'_>) -> FrameOutput {
        // A pending reset means the host's scroll offset is already stale.
        let scroll_top = if self.reset_scroll { 0.0 } else { scroll.scroll_top };

        if self.needs_rebuild {
            self.rebuild(host.cards);
        }
        self.maybe_extend(scroll_top, scroll.client_height, host.cards);

        for card in &mut self.cards {
            card.reposition(self.viewport, scroll_top);
        }

        let events = self.zoom.advance(now_ms, &self.config.zoom);
        self.pending_events.extend(events);

        if let Some(id) = self.hover.take_expired(now_ms) {
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                card.anim.settle(&self.config.distortion);
            }
        }

        self.animate_cards();
        self.dispatch(host);

        let camera = self.zoom.camera();
        host.cards.draw(&camera, &self.cards);

        let hovering_card = self
            .pointer
            .and_then(|p| pick(p, self.viewport, &camera, &self.cards))
            .is_some();

        FrameOutput {
            content_height: self.content_height,
            scroll_locked: self.zoom.phase() != ZoomPhase::None,
            reset_scroll: std::mem::take(&mut self.reset_scroll),
            hovering_card,
            phase: self.zoom.phase(),
        }
    }

    /// Releases every card. The next frame rebuilds.
    pub fn teardown(&mut self, backend: &mut dyn CardBackend) {
        for card in self.cards.drain(..) {
            backend.destroy_card(card.id);
        }
        self.needs_rebuild = true;
    }

    fn rebuild(&mut self, backend: &mut dyn CardBackend) {
        self.needs_rebuild = false;

        // Animation state carries over to cards that keep their identity.
        let previous: HashMap<CardId, CardNode> =
            self.cards.drain(..).map(|c| (c.id, c)).collect();
        for id in previous.keys() {
            backend.destroy_card(*id);
        }

        let params = LayoutParams {
            viewport: self.viewport,
            padding: self.config.layout.padding,
            gap: self.config.layout.gap,
            columns: self.columns,
            section_count: self.section_count,
        };
        let layout = compute_layout(&self.frames, &self.pool, &params);
        self.section_stride = layout.section_stride;
        self.content_height = layout.content_height;

        let cfg = &self.config.distortion;
        let mut failed = 0usize;
        let mut cards = Vec::with_capacity(layout.placements.len());
        for p in &layout.placements {
            let mut node = CardNode::new(CardId::new(p.section, p.frame), p.asset, p.rect, cfg);
            if let Some(old) = previous.get(&node.id).filter(|old| old.asset == node.asset) {
                node.anim = old.anim;
                node.uniforms = old.uniforms;
                node.opacity = old.opacity;
            }
            if backend.create_card(&node) {
                cards.push(node);
            } else {
                failed += 1;
            }
        }
        self.cards = cards;

        if failed > 0 {
            log::warn!("gallery: {failed} cards could not be created");
        }
        log::debug!(
            "gallery: rebuilt {} cards in {} sections, content height {:.0}",
            self.cards.len(),
            self.section_count,
            self.content_height
        );

        if let Some(hovered) = self.hover.card {
            if !self.cards.iter().any(|c| c.id == hovered) {
                self.hover.clear();
            }
        }
        if let Some(selected) = self.zoom.selected() {
            if !self.cards.iter().any(|c| c.id == selected) {
                log::debug!("gallery: selected card {selected:?} vanished");
                let events = self.zoom.reset();
                self.pending_events.extend(events);
            }
        }
    }

    /// Grows the section count when the viewport bottom nears the content end.
    fn maybe_extend(&mut self, scroll_top: f32, client_height: f32, backend: &mut dyn CardBackend) {
        let layout = &self.config.layout;
        if self.zoom.phase() != ZoomPhase::None
            || self.section_stride <= 0.0
            || self.section_count >= layout.max_sections
            || self.content_height <= self.extend_guard
        {
            return;
        }
        if scroll_top + client_height < self.content_height - self.section_stride {
            return;
        }
        self.extend_guard = self.content_height;
        self.section_count = (self.section_count + layout.section_growth).min(layout.max_sections);
        log::debug!("gallery: extending to {} sections", self.section_count);
        self.rebuild(backend);
    }

    fn animate_cards(&mut self) {
        let browsing = self.zoom.phase() == ZoomPhase::None;
        let selected = self.zoom.selected();
        let dim = selected.is_some() && !self.zoom.is_zooming_out();
        let hovered = self.hover.card;
        let cfg = &self.config;

        for card in &mut self.cards {
            let is_selected = selected == Some(card.id);

            if browsing {
                card.anim.advance(hovered == Some(card.id), &cfg.distortion);
            } else {
                card.anim.suppress();
            }

            let target = if dim && !is_selected { cfg.zoom.dim_opacity } else { 1.0 };
            card.opacity += (target - card.opacity) * cfg.zoom.opacity_easing;
            if (card.opacity - target).abs() < cfg.distortion.snap_epsilon {
                card.opacity = target;
            }

            card.uniforms.blend_toward(&card.anim, card.opacity, &cfg.distortion);
            if !browsing {
                card.uniforms.clear_warp();
            }
            card.depth = if is_selected { 1.0 } else { 0.0 };
        }
    }

    fn dispatch(&mut self, host: &mut HostCtx<'_>) {
        for event in std::mem::take(&mut self.pending_events) {
            match event {
                ZoomEvent::Entered { detail_url, .. } => {
                    self.history.on_enter(host.history, detail_url.as_deref());
                }
                ZoomEvent::ShowOverlay { detail, image_url } => host.overlay.show(&detail, &image_url),
                ZoomEvent::CoverEntered { detail_url } => {
                    self.history.on_cover(host.history, &detail_url);
                }
                ZoomEvent::OverlayInteractive => host.overlay.set_interactive(true),
                ZoomEvent::ZoomingOut => host.overlay.set_interactive(false),
                ZoomEvent::Cleared => {
                    host.overlay.hide();
                    self.history.on_none(host.history);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetHandle, test_asset};
    use crate::detail::{DetailCatalog, NoDetails, test_record};
    use crate::history::SessionHistory;
    use crate::testing::{OverlayCall, RecordingBackend, RecordingOverlay};
    use crate::zoom::center_camera;

    const VP: Viewport = Viewport::new(1280.0, 800.0);

    const GRID: &str = "columns 12
        1 1 4 3:4 v
        1 5 4 3:4 v
        1 9 4 4:3 h
        2 1 6 16:9 h
        2 7 6 16:9 h";

    fn pool() -> AssetPool {
        let assets = (0..9u32)
            .map(|i| {
                let (w, h) = if i < 6 { (300, 400) } else { (400, 300) };
                let slug = format!("s{i}");
                let mut a = test_asset(i, w, h, Some(&slug));
                a.project_id = format!("id-{slug}");
                a
            })
            .collect();
        AssetPool::from_assets(assets)
    }

    fn catalog() -> Box<dyn DetailResolver> {
        Box::new((0..9).map(|i| test_record(&format!("s{i}"))).collect::<DetailCatalog>())
    }

    fn gallery(resolver: Box<dyn DetailResolver>) -> Gallery {
        let grid = vitrine_grid::parse_str(GRID).unwrap();
        Gallery::new(GalleryConfig::default(), VP, &grid, pool(), resolver)
    }

    struct Host {
        cards: RecordingBackend,
        history: SessionHistory,
        overlay: RecordingOverlay,
        scroll_top: f32,
    }

    impl Host {
        fn new() -> Self {
            Self {
                cards: RecordingBackend::default(),
                history: SessionHistory::new("/gallery"),
                overlay: RecordingOverlay::default(),
                scroll_top: 0.0,
            }
        }

        fn frame(&mut self, g: &mut Gallery, now_ms: f64) -> FrameOutput {
            let mut ctx = HostCtx {
                cards: &mut self.cards,
                history: &mut self.history,
                overlay: &mut self.overlay,
            };
            let scroll = ScrollMetrics { scroll_top: self.scroll_top, client_height: VP.height };
            let out = g.frame(now_ms, scroll, &mut ctx);
            if out.reset_scroll {
                self.scroll_top = 0.0;
            }
            out
        }

        /// Frames every 16ms over `(from, to]`, plus one at `to`.
        fn run(&mut self, g: &mut Gallery, from: f64, to: f64) -> FrameOutput {
            let mut t = from;
            while t + 16.0 < to {
                t += 16.0;
                self.frame(g, t);
            }
            self.frame(g, to)
        }

        fn drain_pops(&mut self, g: &mut Gallery, now_ms: f64) -> Vec<PopAction> {
            self.history
                .take_pops()
                .into_iter()
                .map(|state| g.pop_state(state.as_ref(), now_ms, &mut self.history))
                .collect()
        }
    }

    /// Client position of a card's center under the identity camera.
    fn client_center(card: &CardNode, scroll_top: f32) -> Vec2 {
        card.content_rect.center() - Vec2::new(0.0, scroll_top)
    }

    fn tap(g: &mut Gallery, p: Vec2, now_ms: f64) {
        g.pointer_down(p, 0.0);
        g.pointer_up(p, 0.0, now_ms);
    }

    // ── rebuild ───────────────────────────────────────────────────────────

    #[test]
    fn first_frame_builds_every_section() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        let out = host.frame(&mut g, 0.0);
        assert_eq!(g.cards().len(), 15);
        assert_eq!(host.cards.created.len(), 15);
        assert_eq!(host.cards.draws, 1);
        assert!(out.content_height > VP.height);
        assert!(!out.scroll_locked);
        assert_eq!(out.phase, ZoomPhase::None);
    }

    #[test]
    fn content_change_destroys_every_created_card() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);

        g.set_assets(pool());
        let out = host.frame(&mut g, 16.0);
        assert!(out.reset_scroll);
        assert_eq!(host.cards.destroyed.len(), 15);
        assert_eq!(host.cards.live.len(), g.cards().len());

        g.teardown(&mut host.cards);
        assert!(host.cards.live.is_empty());
        assert_eq!(host.cards.created.len(), host.cards.destroyed.len());
    }

    #[test]
    fn content_change_while_centered_resets_zoom() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 0.0);
        host.run(&mut g, 0.0, 400.0);
        assert_eq!(g.phase(), ZoomPhase::Center);

        g.set_assets(pool());
        let out = host.frame(&mut g, 416.0);
        assert!(out.reset_scroll);
        assert_eq!(out.phase, ZoomPhase::None);
        assert!(!out.scroll_locked);
        assert_eq!(g.selected(), None);
        assert!(g.camera().is_identity());
        assert!(g.cards().iter().all(|c| c.depth == 0.0));
        assert_eq!(host.overlay.calls, vec![OverlayCall::Hide]);
        assert_eq!(host.history.current().url, "/gallery");
    }

    #[test]
    fn failed_cards_are_left_out() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.cards.failing.insert(AssetHandle(0));
        host.frame(&mut g, 0.0);
        assert!(!g.cards().is_empty());
        assert!(g.cards().iter().all(|c| c.asset != AssetHandle(0)));
        assert_eq!(host.cards.last_drawn, g.cards().len());
    }

    #[test]
    fn empty_pool_renders_nothing() {
        let grid = vitrine_grid::parse_str(GRID).unwrap();
        let mut g =
            Gallery::new(GalleryConfig::default(), VP, &grid, AssetPool::default(), Box::new(NoDetails));
        let mut host = Host::new();
        let out = host.frame(&mut g, 0.0);
        assert!(g.cards().is_empty());
        assert_eq!(out.content_height, VP.height);
        host.frame(&mut g, 16.0);
        assert_eq!(g.section_count(), 3);
    }

    // ── infinite scroll ───────────────────────────────────────────────────

    #[test]
    fn nearing_the_end_adds_sections_once() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        let out = host.frame(&mut g, 0.0);

        host.scroll_top = out.content_height - VP.height;
        let grown = host.frame(&mut g, 16.0);
        assert_eq!(g.section_count(), 5);
        assert_eq!(g.cards().len(), 25);
        assert!(grown.content_height > out.content_height);

        host.frame(&mut g, 32.0);
        assert_eq!(g.section_count(), 5);
        assert_eq!(host.cards.live.len(), 25);
    }

    #[test]
    fn no_growth_while_zoomed() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        let out = host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 10.0);
        host.frame(&mut g, 16.0);

        host.scroll_top = out.content_height - VP.height;
        host.frame(&mut g, 32.0);
        assert_eq!(g.section_count(), 3);
    }

    #[test]
    fn content_change_resets_sections_and_scroll() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        let out = host.frame(&mut g, 0.0);
        host.scroll_top = out.content_height - VP.height;
        host.frame(&mut g, 16.0);
        assert_eq!(g.section_count(), 5);

        g.set_frames(&vitrine_grid::parse_str(GRID).unwrap());
        let out = host.frame(&mut g, 32.0);
        assert!(out.reset_scroll);
        assert_eq!(host.scroll_top, 0.0);
        assert_eq!(g.section_count(), 3);
        assert!(!host.frame(&mut g, 48.0).reset_scroll);
    }

    // ── hover distortion ──────────────────────────────────────────────────

    #[test]
    fn hover_warps_then_decays_to_zero() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);

        g.pointer_move(p, 10.0);
        g.pointer_move(p + Vec2::new(40.0, 0.0), 20.0);
        let out = host.frame(&mut g, 32.0);
        assert!(out.hovering_card);
        assert!(g.cards()[0].anim.current_intensity > 0.0);
        assert!(g.cards()[0].uniforms.intensity > 0.0);
        assert!(g.cards()[1].anim.is_idle());

        g.pointer_leave();
        let out = host.run(&mut g, 32.0, 32.0 + 16.0 * 400.0);
        assert!(!out.hovering_card);
        assert!(g.cards()[0].anim.is_idle());
        assert_eq!(g.cards()[0].uniforms.intensity, 0.0);
        assert_eq!(g.cards()[0].uniforms.pull, 0.0);
    }

    #[test]
    fn resting_pointer_falls_back_to_idle_floor() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        g.pointer_move(p, 0.0);
        g.pointer_move(p + Vec2::new(60.0, 0.0), 8.0);
        assert!(g.cards()[0].anim.target_intensity > g.config().distortion.idle_floor);

        host.frame(&mut g, 200.0);
        let floor = g.config().distortion.idle_floor;
        assert_eq!(g.cards()[0].anim.target_intensity, floor);
    }

    #[test]
    fn zoom_suppresses_distortion() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        g.pointer_move(p, 0.0);
        g.pointer_move(p + Vec2::new(30.0, 0.0), 8.0);
        host.frame(&mut g, 16.0);
        assert!(g.cards()[0].uniforms.intensity > 0.0);

        tap(&mut g, p + Vec2::new(30.0, 0.0), 20.0);
        host.frame(&mut g, 32.0);
        assert!(g.cards().iter().all(|c| c.anim.is_idle() && c.uniforms.intensity == 0.0));
    }

    // ── taps ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_does_not_select() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        g.pointer_down(p, 0.0);
        g.pointer_up(p, 40.0, 10.0);
        host.frame(&mut g, 16.0);
        assert_eq!(g.phase(), ZoomPhase::None);
    }

    #[test]
    fn tap_on_empty_space_does_nothing() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        tap(&mut g, Vec2::new(10.0, 10.0), 10.0);
        host.frame(&mut g, 16.0);
        assert_eq!(g.phase(), ZoomPhase::None);
        assert_eq!(host.history.entries().len(), 1);
    }

    #[test]
    fn second_tap_without_detail_zooms_out() {
        let mut g = gallery(Box::new(NoDetails));
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 0.0);
        host.run(&mut g, 0.0, 900.0);
        assert_eq!(g.phase(), ZoomPhase::Center);

        tap(&mut g, Vec2::new(VP.width * 0.5, VP.height * 0.5), 1000.0);
        host.run(&mut g, 900.0, 1800.0);
        assert_eq!(g.phase(), ZoomPhase::None);
        assert!(g.camera().is_identity());
        assert_eq!(host.history.current().url, "/gallery");
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn tap_center_cover_escape() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let card = g.cards()[0].clone();
        let expected_zoom = center_camera(card.world_rect(), VP, &g.config().zoom).zoom;

        tap(&mut g, client_center(&card, 0.0), 16.0);
        let out = host.frame(&mut g, 16.0);
        assert_eq!(out.phase, ZoomPhase::Center);
        assert!(out.scroll_locked);
        assert_eq!(g.selected(), Some(card.id));
        assert_eq!(host.history.current().url, "/work/s0");

        host.run(&mut g, 16.0, 900.0);
        assert!((g.camera().zoom - expected_zoom).abs() < 1e-4);
        assert_eq!(g.cards()[0].depth, 1.0);
        assert!(g.cards()[1].opacity < 1.0);
        assert_eq!(g.cards()[0].opacity, 1.0);

        // The selected card now sits at the viewport center.
        tap(&mut g, Vec2::new(VP.width * 0.5, VP.height * 0.5), 1000.0);
        host.run(&mut g, 900.0, 1500.0);
        assert_eq!(g.phase(), ZoomPhase::Center);
        assert_eq!(
            host.overlay.calls,
            vec![OverlayCall::Show { slug: "s0".into(), image_url: "img/0.jpg".into() }]
        );

        g.overlay_image_loaded();
        host.run(&mut g, 1500.0, 1880.0);
        assert_eq!(host.overlay.calls.len(), 1, "interactive before the tween ended");

        host.run(&mut g, 1880.0, 1920.0);
        assert_eq!(g.phase(), ZoomPhase::Cover);
        assert_eq!(host.overlay.calls.last(), Some(&OverlayCall::Interactive(true)));
        assert_eq!(host.history.current().url, "/work/s0");
        assert_eq!(host.history.entries().len(), 3);

        g.escape(2000.0);
        host.frame(&mut g, 2000.0);
        assert_eq!(host.overlay.calls.last(), Some(&OverlayCall::Interactive(false)));
        let out = host.run(&mut g, 2000.0, 2720.0);
        assert_eq!(out.phase, ZoomPhase::None);
        assert!(!out.scroll_locked);
        assert_eq!(g.selected(), None);
        assert!(g.camera().is_identity());
        assert_eq!(host.overlay.calls.last(), Some(&OverlayCall::Hide));
        assert_eq!(host.history.current().url, "/gallery");
        assert_eq!(host.history.current().state.as_ref().map(|s| s.modal), Some(false));
    }

    #[test]
    fn back_button_while_covered() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 0.0);
        host.run(&mut g, 0.0, 900.0);
        tap(&mut g, Vec2::new(VP.width * 0.5, VP.height * 0.5), 900.0);
        host.run(&mut g, 900.0, 1900.0);
        assert_eq!(g.phase(), ZoomPhase::Cover);

        host.history.back();
        assert_eq!(host.drain_pops(&mut g, 2000.0), vec![PopAction::ZoomOut]);
        assert_eq!(host.history.cursor(), 2);
        assert_eq!(host.drain_pops(&mut g, 2010.0), vec![PopAction::Consumed]);

        host.run(&mut g, 1900.0, 2800.0);
        assert_eq!(g.phase(), ZoomPhase::None);
        assert_eq!(host.history.current().url, "/gallery");
        assert_eq!(host.history.entries().len(), 3);

        // Back at rest, pops are no longer intercepted.
        host.history.back();
        assert_eq!(host.drain_pops(&mut g, 3000.0), vec![PopAction::Ignore]);
    }

    #[test]
    fn resize_while_centered_resets() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let before = g.cards()[0].size();
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 0.0);
        host.run(&mut g, 0.0, 400.0);
        assert_eq!(g.phase(), ZoomPhase::Center);

        g.resize(Viewport::new(1000.0, 800.0));
        let out = host.frame(&mut g, 416.0);
        assert_eq!(out.phase, ZoomPhase::None);
        assert_eq!(g.selected(), None);
        assert!(g.camera().is_identity());
        assert!(g.cards()[0].size().x < before.x);
        assert_eq!(host.overlay.calls, vec![OverlayCall::Hide]);
        assert_eq!(host.history.current().url, "/gallery");
        assert_eq!(host.cards.destroyed.len(), 15);
        assert_eq!(host.cards.live.len(), g.cards().len());
    }

    #[test]
    fn tap_elsewhere_while_centered_zooms_out() {
        let mut g = gallery(catalog());
        let mut host = Host::new();
        host.frame(&mut g, 0.0);
        let p = client_center(&g.cards()[0], 0.0);
        tap(&mut g, p, 0.0);
        host.run(&mut g, 0.0, 900.0);

        tap(&mut g, Vec2::new(5.0, 5.0), 900.0);
        host.run(&mut g, 900.0, 1700.0);
        assert_eq!(g.phase(), ZoomPhase::None);
        assert!(g.cards().iter().all(|c| c.depth == 0.0));
    }
}
