//! Keeps navigation history in step with the zoom state machine.
//!
//! Entering a selection pushes two entries: a sentinel and the detail step.
//! A single "back" from the detail lands on the sentinel; the bridge then goes
//! forward again and zooms out, so the user never leaves the gallery.

use std::collections::VecDeque;

use crate::zoom::ZoomPhase;

/// State object attached to a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub modal: bool,
    pub step: u8,
    pub original_path: String,
}

impl HistoryState {
    const SENTINEL_STEP: u8 = 1;
    const DETAIL_STEP: u8 = 2;

    fn sentinel(original_path: &str) -> Self {
        Self { modal: true, step: Self::SENTINEL_STEP, original_path: original_path.to_string() }
    }

    fn detail(original_path: &str) -> Self {
        Self { modal: true, step: Self::DETAIL_STEP, original_path: original_path.to_string() }
    }

    fn clean(original_path: &str) -> Self {
        Self { modal: false, step: 0, original_path: original_path.to_string() }
    }

    pub fn is_sentinel(&self) -> bool {
        self.modal && self.step == Self::SENTINEL_STEP
    }
}

/// Browser-style session history.
pub trait HistoryBackend {
    fn push_state(&mut self, state: HistoryState, url: &str);
    fn replace_state(&mut self, state: HistoryState, url: &str);
    /// Moves within history; the resulting pop is delivered later, not re-entrantly.
    fn go(&mut self, delta: i32);
    fn current_path(&self) -> String;
}

/// What the caller should do after a pop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PopAction {
    /// Not ours; let navigation proceed.
    Ignore,
    /// Our own forward step echoing back; swallow it.
    Consumed,
    /// Intercepted; zoom out.
    ZoomOut,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryBridge {
    /// Path active before the selection; `Some` while entries are ours.
    original_path: Option<String>,
    awaiting_forward: bool,
}

impl HistoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.original_path.is_some()
    }

    /// `none → center`: push sentinel then detail step.
    pub fn on_enter(&mut self, backend: &mut dyn HistoryBackend, detail_url: Option<&str>) {
        let original = self
            .original_path
            .get_or_insert_with(|| backend.current_path())
            .clone();
        backend.push_state(HistoryState::sentinel(&original), &original);
        backend.push_state(HistoryState::detail(&original), detail_url.unwrap_or(&original));
        log::debug!("history: entered from {original}");
    }

    /// Phase became `cover`: show the detail address without adding an entry.
    pub fn on_cover(&mut self, backend: &mut dyn HistoryBackend, detail_url: &str) {
        let Some(original) = self.original_path.as_deref() else { return };
        backend.replace_state(HistoryState::detail(original), detail_url);
    }

    /// Back at `none`: restore the original address, modal flags cleared.
    pub fn on_none(&mut self, backend: &mut dyn HistoryBackend) {
        let Some(original) = self.original_path.take() else { return };
        backend.replace_state(HistoryState::clean(&original), &original);
        log::debug!("history: restored {original}");
    }

    /// A history pop arrived while the gallery is in `phase`.
    pub fn on_pop(
        &mut self,
        state: Option<&HistoryState>,
        phase: ZoomPhase,
        backend: &mut dyn HistoryBackend,
    ) -> PopAction {
        if self.awaiting_forward {
            self.awaiting_forward = false;
            return PopAction::Consumed;
        }
        if phase == ZoomPhase::None {
            return PopAction::Ignore;
        }
        if state.is_some_and(HistoryState::is_sentinel) {
            log::debug!("history: back onto sentinel, stepping forward");
            self.awaiting_forward = true;
            backend.go(1);
        } else {
            let original = self.original_path.clone().unwrap_or_else(|| backend.current_path());
            backend.push_state(HistoryState::clean(&original), &original);
        }
        PopAction::ZoomOut
    }
}

// ── in-memory backend ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub state: Option<HistoryState>,
    pub url: String,
}

/// In-memory history with browser semantics: pushing truncates forward
/// entries, `go` moves a cursor and queues the pop for later delivery.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    pops: VecDeque<Option<HistoryState>>,
}

impl SessionHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![HistoryEntry { state: None, url: initial_url.to_string() }],
            cursor: 0,
            pops: VecDeque::new(),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Drains pops queued by `go`, oldest first.
    pub fn take_pops(&mut self) -> Vec<Option<HistoryState>> {
        self.pops.drain(..).collect()
    }

    pub fn back(&mut self) {
        self.go(-1);
    }

    pub fn forward(&mut self) {
        self.go(1);
    }
}

impl HistoryBackend for SessionHistory {
    fn push_state(&mut self, state: HistoryState, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { state: Some(state), url: url.to_string() });
        self.cursor = self.entries.len() - 1;
    }

    fn replace_state(&mut self, state: HistoryState, url: &str) {
        self.entries[self.cursor] = HistoryEntry { state: Some(state), url: url.to_string() };
    }

    fn go(&mut self, delta: i32) {
        let target = self.cursor as i64 + delta as i64;
        if delta == 0 || target < 0 || target >= self.entries.len() as i64 {
            return;
        }
        self.cursor = target as usize;
        self.pops.push_back(self.entries[self.cursor].state.clone());
    }

    fn current_path(&self) -> String {
        self.current().url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── session history ───────────────────────────────────────────────────

    #[test]
    fn push_truncates_forward_entries() {
        let mut h = SessionHistory::new("/");
        h.push_state(HistoryState::clean("/"), "/a");
        h.push_state(HistoryState::clean("/"), "/b");
        h.back();
        h.push_state(HistoryState::clean("/"), "/c");
        let urls: Vec<&str> = h.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/a", "/c"]);
        assert_eq!(h.take_pops().len(), 1);
    }

    #[test]
    fn go_out_of_bounds_is_ignored() {
        let mut h = SessionHistory::new("/");
        h.back();
        h.forward();
        assert!(h.take_pops().is_empty());
        assert_eq!(h.cursor(), 0);
    }

    // ── bridge ────────────────────────────────────────────────────────────

    #[test]
    fn enter_pushes_sentinel_then_detail() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        b.on_enter(&mut h, Some("/work/harbour"));
        assert_eq!(h.entries().len(), 3);
        assert!(h.entries()[1].state.as_ref().is_some_and(HistoryState::is_sentinel));
        assert_eq!(h.entries()[1].url, "/gallery");
        assert_eq!(h.current().url, "/work/harbour");
        assert_eq!(h.current().state.as_ref().map(|s| s.step), Some(2));
    }

    #[test]
    fn enter_without_detail_keeps_original_address() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        b.on_enter(&mut h, None);
        assert_eq!(h.current().url, "/gallery");
    }

    #[test]
    fn cover_replaces_and_none_restores() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        b.on_enter(&mut h, None);
        b.on_cover(&mut h, "/work/harbour");
        assert_eq!(h.entries().len(), 3);
        assert_eq!(h.current().url, "/work/harbour");

        b.on_none(&mut h);
        assert_eq!(h.current().url, "/gallery");
        assert_eq!(h.current().state, Some(HistoryState::clean("/gallery")));
        assert!(!b.is_active());
    }

    #[test]
    fn on_none_without_entry_does_nothing() {
        let mut h = SessionHistory::new("/gallery");
        HistoryBridge::new().on_none(&mut h);
        assert_eq!(h.current().state, None);
    }

    #[test]
    fn back_onto_sentinel_steps_forward_and_swallows_echo() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        b.on_enter(&mut h, Some("/work/harbour"));

        h.back();
        let pops = h.take_pops();
        assert_eq!(b.on_pop(pops[0].as_ref(), ZoomPhase::Cover, &mut h), PopAction::ZoomOut);
        assert_eq!(h.cursor(), 2);

        let echo = h.take_pops();
        assert_eq!(echo.len(), 1);
        assert_eq!(b.on_pop(echo[0].as_ref(), ZoomPhase::Cover, &mut h), PopAction::Consumed);
    }

    #[test]
    fn other_pop_while_zoomed_pushes_clean_state() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        b.on_enter(&mut h, None);
        h.go(-2);
        let pops = h.take_pops();
        assert_eq!(b.on_pop(pops[0].as_ref(), ZoomPhase::Center, &mut h), PopAction::ZoomOut);
        assert_eq!(h.current().state, Some(HistoryState::clean("/gallery")));
        assert_eq!(h.entries().len(), 2);
    }

    #[test]
    fn pop_at_none_is_ignored() {
        let mut h = SessionHistory::new("/gallery");
        let mut b = HistoryBridge::new();
        assert_eq!(b.on_pop(None, ZoomPhase::None, &mut h), PopAction::Ignore);
    }
}
