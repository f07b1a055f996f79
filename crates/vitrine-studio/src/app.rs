use vitrine_engine::coords::{ColorRgba, Vec2, Viewport};
use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::input::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
use vitrine_engine::window::CursorIcon;
use vitrine_gallery::{Gallery, HistoryBackend, HostCtx, PopAction, ScrollMetrics, SessionHistory, ZoomPhase};

use crate::cards::GpuCards;
use crate::overlay::TitleOverlay;
use crate::scroll::ScrollViewport;

/// Logical px per wheel notch and per arrow key press.
const LINE_HEIGHT: f32 = 48.0;
/// Fraction of the viewport moved by PageUp/PageDown.
const PAGE_FRACTION: f32 = 0.9;
const SCROLL_SMOOTHING: f32 = 0.22;

pub struct StudioApp {
    gallery: Gallery,
    cards: GpuCards,
    history: SessionHistory,
    overlay: TitleOverlay,
    scroll: ScrollViewport,
    modifiers: Modifiers,
    background: ColorRgba,
}

impl StudioApp {
    pub fn new(gallery: Gallery, cards: GpuCards, title: &str) -> Self {
        Self {
            gallery,
            cards,
            history: SessionHistory::new("/"),
            overlay: TitleOverlay::new(title),
            scroll: ScrollViewport::new(SCROLL_SMOOTHING),
            modifiers: Modifiers::default(),
            background: ColorRgba::from_srgb_u8(14, 14, 16),
        }
    }

    fn on_pointer_button(&mut self, button: MouseButton, state: ButtonState, p: Vec2, now_ms: f64) {
        match (button, state) {
            (MouseButton::Left, ButtonState::Pressed) => {
                self.gallery.pointer_down(p, self.scroll.offset());
                self.scroll.begin_drag(p.y);
            }
            (MouseButton::Left, ButtonState::Released) => {
                self.scroll.end_drag();
                self.gallery.pointer_up(p, self.scroll.offset(), now_ms);
            }
            (MouseButton::Back, ButtonState::Pressed) => self.history.back(),
            (MouseButton::Forward, ButtonState::Pressed) => self.history.forward(),
            _ => {}
        }
    }

    fn on_key(&mut self, key: Key, now_ms: f64, viewport: Viewport) {
        let alt = self.modifiers.alt;
        match key {
            Key::Escape => self.gallery.escape(now_ms),
            Key::BrowserBack => self.history.back(),
            Key::BrowserForward => self.history.forward(),
            Key::ArrowLeft if alt => self.history.back(),
            Key::ArrowRight if alt => self.history.forward(),
            Key::ArrowDown => self.scroll.scroll_by(LINE_HEIGHT),
            Key::ArrowUp => self.scroll.scroll_by(-LINE_HEIGHT),
            Key::PageDown | Key::Space => self.scroll.scroll_by(viewport.height * PAGE_FRACTION),
            Key::PageUp => self.scroll.scroll_by(-viewport.height * PAGE_FRACTION),
            Key::Home => self.scroll.scroll_to(0.0),
            Key::End => self.scroll.scroll_to(self.scroll.max_offset()),
            Key::Enter => {
                if let Some(detail) = self.overlay.active_detail() {
                    log::info!("open {} ({})", detail.url, detail.title);
                }
            }
            _ => {}
        }
    }

    /// Delivers history pops queued by back/forward.
    fn drain_history(&mut self, now_ms: f64) {
        for state in self.history.take_pops() {
            let action = self.gallery.pop_state(state.as_ref(), now_ms, &mut self.history);
            if action == PopAction::Ignore {
                log::debug!("history: at {}", self.history.current_path());
            }
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let now_ms = ctx.time.elapsed_ms;
        let viewport = ctx.window.viewport();
        self.gallery.resize(viewport);
        self.scroll.set_locked(self.gallery.phase() != ZoomPhase::None);

        // ── Input ─────────────────────────────────────────────────────────
        for ev in &ctx.input_frame.events {
            match ev {
                InputEvent::ModifiersChanged(m) => self.modifiers = *m,
                InputEvent::PointerMoved(p) => {
                    self.scroll.drag_to(p.y);
                    self.gallery.pointer_move(*p, now_ms);
                }
                InputEvent::PointerButton { button, state, position } => {
                    self.on_pointer_button(*button, *state, *position, now_ms);
                }
                InputEvent::Key { key, state: ButtonState::Pressed, repeat } => {
                    if !*repeat || key.repeats() {
                        self.on_key(*key, now_ms, viewport);
                    }
                }
                InputEvent::PointerLeft => {
                    self.scroll.end_drag();
                    self.gallery.pointer_leave();
                }
                _ => {}
            }
        }
        self.scroll.scroll_by(ctx.input_frame.scroll_delta_px(LINE_HEIGHT));
        self.drain_history(now_ms);
        self.scroll.tick();

        // ── Gallery frame ─────────────────────────────────────────────────
        let scroll = ScrollMetrics { scroll_top: self.scroll.offset(), client_height: viewport.height };
        let mut host = HostCtx {
            cards: &mut self.cards,
            history: &mut self.history,
            overlay: &mut self.overlay,
        };
        let out = self.gallery.frame(now_ms, scroll, &mut host);

        if out.reset_scroll {
            self.scroll.reset();
        }
        self.scroll.set_extent(out.content_height, viewport.height);
        if self.overlay.take_image_ack() {
            self.gallery.overlay_image_loaded();
        }
        if let Some(title) = self.overlay.take_title() {
            ctx.window.set_title(&title);
        }
        ctx.window.set_cursor(if out.hovering_card { CursorIcon::Pointer } else { CursorIcon::Default });

        // ── Render ────────────────────────────────────────────────────────
        let cards = &mut self.cards;
        ctx.render(self.background, |rctx, target| cards.flush(rctx, target))
    }

    fn on_exit(&mut self) {
        self.gallery.teardown(&mut self.cards);
        log::info!("gallery closed at {}", self.history.current_path());
    }
}
