//! Recording fakes for the host seams.

use std::collections::HashSet;

use crate::asset::AssetHandle;
use crate::backend::{CardBackend, DetailOverlay};
use crate::camera::Camera;
use crate::card::{CardId, CardNode};
use crate::detail::DetailRecord;

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub created: Vec<CardId>,
    pub destroyed: Vec<CardId>,
    pub live: HashSet<CardId>,
    pub draws: usize,
    pub last_camera: Option<Camera>,
    pub last_drawn: usize,
    /// Assets whose cards fail to allocate.
    pub failing: HashSet<AssetHandle>,
}

impl CardBackend for RecordingBackend {
    fn create_card(&mut self, card: &CardNode) -> bool {
        if self.failing.contains(&card.asset) {
            return false;
        }
        assert!(self.live.insert(card.id), "card {:?} created twice", card.id);
        self.created.push(card.id);
        true
    }

    fn destroy_card(&mut self, id: CardId) {
        assert!(self.live.remove(&id), "card {id:?} destroyed while not live");
        self.destroyed.push(id);
    }

    fn draw(&mut self, camera: &Camera, cards: &[CardNode]) {
        for c in cards {
            assert!(self.live.contains(&c.id), "drawing card {:?} that is not live", c.id);
        }
        self.draws += 1;
        self.last_camera = Some(*camera);
        self.last_drawn = cards.len();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OverlayCall {
    Show { slug: String, image_url: String },
    Interactive(bool),
    Hide,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
}

impl DetailOverlay for RecordingOverlay {
    fn show(&mut self, detail: &DetailRecord, image_url: &str) {
        self.calls.push(OverlayCall::Show {
            slug: detail.slug.clone(),
            image_url: image_url.to_string(),
        });
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.calls.push(OverlayCall::Interactive(interactive));
    }

    fn hide(&mut self) {
        self.calls.push(OverlayCall::Hide);
    }
}
