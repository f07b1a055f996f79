//! Three-phase focus state machine: `none` → `center` → `cover`.
//!
//! `phase` and `selected` change together: `phase == None` exactly when
//! nothing is selected. Every method returns the side effects to apply
//! (history, overlay) as [`ZoomEvent`]s instead of calling out.

use vitrine_engine::coords::{Rect, Viewport};

use crate::camera::Camera;
use crate::card::CardId;
use crate::config::ZoomConfig;
use crate::detail::DetailRecord;
use crate::tween::{CameraTween, TweenCompletion};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ZoomPhase {
    /// Free browsing.
    #[default]
    None,
    /// Selected card enlarged, others dimmed.
    Center,
    /// Selected card fills the viewport; detail overlay up.
    Cover,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum OverlayState {
    #[default]
    Hidden,
    /// Visible but not accepting input.
    Shown,
    Interactive,
}

/// The card under a tap, resolved by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TapTarget {
    pub card: CardId,
    /// Card rect in world space at tap time.
    pub world_rect: Rect,
    pub detail: Option<DetailRecord>,
    pub image_url: String,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomEvent {
    /// `none → center`.
    Entered { card: CardId, detail_url: Option<String> },
    /// Cover tween passed the reveal threshold.
    ShowOverlay { detail: DetailRecord, image_url: String },
    /// Phase is now `cover`.
    CoverEntered { detail_url: String },
    OverlayInteractive,
    /// Zoom-out tween started; overlay stops taking input.
    ZoomingOut,
    /// Back at `none`; selection, overlay and pending detail are gone.
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingDetail {
    detail: DetailRecord,
    image_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct ZoomMachine {
    phase: ZoomPhase,
    selected: Option<CardId>,
    camera: Camera,
    tween: Option<CameraTween>,
    pending: Option<PendingDetail>,
    overlay: OverlayState,
    image_loaded: bool,
}

impl ZoomMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn tween(&self) -> Option<&CameraTween> {
        self.tween.as_ref()
    }

    pub fn is_zooming_out(&self) -> bool {
        self.tween.as_ref().is_some_and(CameraTween::is_zoom_out)
    }

    fn cover_pending(&self) -> bool {
        self.phase == ZoomPhase::Cover
            || self.tween.as_ref().is_some_and(|t| t.completion == TweenCompletion::OpenCover)
    }

    /// Handles a tap; `target` is the card under the pointer, if any.
    pub fn tap(
        &mut self,
        target: Option<TapTarget>,
        viewport: Viewport,
        now_ms: f64,
        cfg: &ZoomConfig,
    ) -> Vec<ZoomEvent> {
        if self.is_zooming_out() {
            return Vec::new();
        }

        match (self.phase, target) {
            (ZoomPhase::None, None) => Vec::new(),

            (ZoomPhase::None, Some(t)) => {
                let to = center_camera(t.world_rect, viewport, cfg);
                self.phase = ZoomPhase::Center;
                self.selected = Some(t.card);
                self.pending = None;
                self.start(to, now_ms, cfg.center_duration_ms, TweenCompletion::None, None);
                log::debug!("zoom: none -> center on {:?} (zoom {:.2})", t.card, to.zoom);
                vec![ZoomEvent::Entered {
                    card: t.card,
                    detail_url: t.detail.map(|d| d.url),
                }]
            }

            (_, Some(t)) if self.selected == Some(t.card) => {
                if self.cover_pending() {
                    return Vec::new();
                }
                match t.detail {
                    Some(detail) => {
                        let to = cover_camera(t.world_rect, viewport, cfg);
                        self.pending = Some(PendingDetail { detail, image_url: t.image_url });
                        self.start(
                            to,
                            now_ms,
                            cfg.cover_duration_ms,
                            TweenCompletion::OpenCover,
                            Some(cfg.overlay_reveal_at),
                        );
                        log::debug!("zoom: center -> cover on {:?}", t.card);
                        Vec::new()
                    }
                    None => self.zoom_out(now_ms, cfg),
                }
            }

            (_, _) => self.zoom_out(now_ms, cfg),
        }
    }

    /// Starts a zoom-out toward the identity camera. No-op at `none` or when already zooming out.
    pub fn zoom_out(&mut self, now_ms: f64, cfg: &ZoomConfig) -> Vec<ZoomEvent> {
        if self.phase == ZoomPhase::None || self.is_zooming_out() {
            return Vec::new();
        }
        self.start(
            Camera::IDENTITY,
            now_ms,
            cfg.zoom_out_duration_ms,
            TweenCompletion::ZoomOutComplete,
            None,
        );
        if self.overlay == OverlayState::Interactive {
            self.overlay = OverlayState::Shown;
        }
        log::debug!("zoom: {:?} -> none (tween)", self.phase);
        vec![ZoomEvent::ZoomingOut]
    }

    /// Drops straight to `none` with an identity camera (resize, content change).
    pub fn reset(&mut self) -> Vec<ZoomEvent> {
        self.camera = Camera::IDENTITY;
        if self.phase == ZoomPhase::None && self.tween.is_none() {
            return Vec::new();
        }
        log::debug!("zoom: forced reset from {:?}", self.phase);
        self.clear();
        vec![ZoomEvent::Cleared]
    }

    /// The overlay finished loading its image.
    pub fn overlay_image_loaded(&mut self) -> Vec<ZoomEvent> {
        if self.overlay == OverlayState::Hidden || self.is_zooming_out() {
            return Vec::new();
        }
        self.image_loaded = true;
        self.try_make_interactive()
    }

    /// Advances the live tween to `now_ms`.
    pub fn advance(&mut self, now_ms: f64, cfg: &ZoomConfig) -> Vec<ZoomEvent> {
        let Some(tween) = self.tween.as_mut() else {
            return Vec::new();
        };
        let sample = tween.sample(now_ms, &cfg.easing);
        let completion = tween.completion;
        self.camera = sample.camera;

        let mut events = Vec::new();

        if sample.crossed_threshold && completion == TweenCompletion::OpenCover {
            if let Some(p) = &self.pending {
                self.overlay = OverlayState::Shown;
                events.push(ZoomEvent::ShowOverlay {
                    detail: p.detail.clone(),
                    image_url: p.image_url.clone(),
                });
            }
        }

        if !sample.finished {
            return events;
        }
        self.tween = None;

        match completion {
            TweenCompletion::None => {}
            TweenCompletion::OpenCover => {
                self.phase = ZoomPhase::Cover;
                if let Some(p) = &self.pending {
                    events.push(ZoomEvent::CoverEntered { detail_url: p.detail.url.clone() });
                }
                log::debug!("zoom: cover reached");
                events.extend(self.try_make_interactive());
            }
            TweenCompletion::ZoomOutComplete => {
                self.clear();
                self.camera = Camera::IDENTITY;
                log::debug!("zoom: none reached");
                events.push(ZoomEvent::Cleared);
            }
        }
        events
    }

    fn try_make_interactive(&mut self) -> Vec<ZoomEvent> {
        if self.phase == ZoomPhase::Cover
            && self.tween.is_none()
            && self.image_loaded
            && self.overlay == OverlayState::Shown
        {
            self.overlay = OverlayState::Interactive;
            vec![ZoomEvent::OverlayInteractive]
        } else {
            Vec::new()
        }
    }

    /// New tweens always start from the live camera.
    fn start(
        &mut self,
        to: Camera,
        now_ms: f64,
        duration_ms: f64,
        completion: TweenCompletion,
        threshold: Option<f32>,
    ) {
        let mut tween = CameraTween::new(self.camera, to, now_ms, duration_ms, completion);
        if let Some(th) = threshold {
            tween = tween.with_threshold(th);
        }
        self.tween = Some(tween);
    }

    fn clear(&mut self) {
        self.phase = ZoomPhase::None;
        self.selected = None;
        self.tween = None;
        self.pending = None;
        self.overlay = OverlayState::Hidden;
        self.image_loaded = false;
    }
}

/// Camera framing `rect` with margin, capped at `max_center_zoom`.
pub fn center_camera(rect: Rect, viewport: Viewport, cfg: &ZoomConfig) -> Camera {
    let fit = (cfg.center_fill * viewport.width / rect.size.x)
        .min(cfg.center_fill * viewport.height / rect.size.y);
    Camera::new(rect.center(), fit.min(cfg.max_center_zoom))
}

/// Camera where `rect` covers the viewport, with over-scan.
pub fn cover_camera(rect: Rect, viewport: Viewport, cfg: &ZoomConfig) -> Camera {
    let fill = (viewport.width / rect.size.x).max(viewport.height / rect.size.y);
    Camera::new(rect.center(), fill * cfg.cover_overscan)
}
