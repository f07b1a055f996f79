//! Seams between the gallery and its host.
//!
//! The gallery never owns GPU objects, history or overlay UI. The host lends
//! them for one frame through [`HostCtx`].

use crate::camera::Camera;
use crate::card::{CardId, CardNode};
use crate::detail::DetailRecord;
use crate::history::HistoryBackend;
use crate::zoom::ZoomPhase;

/// GPU side of the card set.
///
/// Every successful `create_card` is matched by exactly one `destroy_card`,
/// either at the next rebuild or at teardown.
pub trait CardBackend {
    /// Allocates resources for `card`; `false` leaves the card out of the renderable set.
    fn create_card(&mut self, card: &CardNode) -> bool;
    fn destroy_card(&mut self, id: CardId);
    /// Draws `cards` (already positioned and uniform-updated) through `camera`.
    fn draw(&mut self, camera: &Camera, cards: &[CardNode]);
}

/// Detail surface shown over a covered card.
pub trait DetailOverlay {
    /// Show (non-interactive). The host calls back `Gallery::overlay_image_loaded`
    /// once `image_url` is ready.
    fn show(&mut self, detail: &DetailRecord, image_url: &str);
    fn set_interactive(&mut self, interactive: bool);
    fn hide(&mut self);
}

/// Collaborators borrowed for one frame.
pub struct HostCtx<'a> {
    pub cards: &'a mut dyn CardBackend,
    pub history: &'a mut dyn HistoryBackend,
    pub overlay: &'a mut dyn DetailOverlay,
}

/// Scroll container state read each frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub client_height: f32,
}

/// What the host should apply after a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameOutput {
    /// Scrollable height of the gallery content.
    pub content_height: f32,
    /// Scrolling must be blocked (something is selected).
    pub scroll_locked: bool,
    /// Scroll position must be set to 0.
    pub reset_scroll: bool,
    /// A card is under the pointer.
    pub hovering_card: bool,
    pub phase: ZoomPhase,
}
