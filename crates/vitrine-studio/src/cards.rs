//! GPU card backend.
//!
//! The gallery calls into [`GpuCards`] during its frame, before a surface
//! frame exists. Create/destroy requests are buffered in order and applied,
//! together with the draw, inside the render pass callback.
//!
//! Images are validated when the gallery asks for a card, so a card that
//! could never be uploaded is refused up front and left out of the layout.

use std::collections::{HashMap, HashSet};

use vitrine_engine::render::{CardCamera, CardDraw, CardRenderer, RenderCtx, RenderTarget};
use vitrine_gallery::{Camera, CardBackend, CardId, CardNode};

use crate::assets::DecodedImage;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum CardCommand {
    Create { card_key: u64, texture_key: u32 },
    Destroy { card_key: u64 },
}

pub struct GpuCards {
    renderer: CardRenderer,
    /// Decoded pixels waiting for their first upload, keyed by asset handle.
    pending_images: HashMap<u32, DecodedImage>,
    /// Textures that failed to upload; their cards are refused from then on.
    rejected: HashSet<u32>,
    /// Edge limit every supported device meets.
    max_edge: u32,
    commands: Vec<CardCommand>,
    camera: CardCamera,
    draws: Vec<CardDraw>,
}

impl GpuCards {
    pub fn new(images: HashMap<u32, DecodedImage>, max_edge: u32) -> Self {
        let (pending_images, bad): (HashMap<_, _>, HashMap<_, _>) =
            images.into_iter().partition(|(_, image)| image.fits_texture(max_edge));
        for (key, image) in &bad {
            log::warn!("image {key} ({}x{}) cannot be a card texture", image.width, image.height);
        }
        Self {
            renderer: CardRenderer::new(),
            pending_images,
            rejected: bad.into_keys().collect(),
            max_edge,
            commands: Vec::new(),
            camera: CardCamera::default(),
            draws: Vec::new(),
        }
    }

    fn has_image(&self, texture_key: u32) -> bool {
        if self.rejected.contains(&texture_key) {
            return false;
        }
        match self.pending_images.get(&texture_key) {
            Some(image) => image.fits_texture(self.max_edge),
            None => self.renderer.has_texture(texture_key),
        }
    }

    /// Applies buffered commands and draws the last submitted card list.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        for cmd in self.commands.drain(..) {
            match cmd {
                CardCommand::Create { card_key, texture_key } => {
                    if let Some(image) = self.pending_images.remove(&texture_key) {
                        if let Err(e) =
                            self.renderer
                                .ensure_texture(ctx, texture_key, image.width, image.height, &image.rgba)
                        {
                            log::warn!("texture upload failed: {e:#}");
                            self.rejected.insert(texture_key);
                            continue;
                        }
                    }
                    if !self.renderer.create_card(ctx, card_key, texture_key) {
                        log::warn!("card {card_key:#x} has no texture");
                    }
                }
                CardCommand::Destroy { card_key } => self.renderer.destroy_card(card_key),
            }
        }
        self.renderer.render(ctx, target, self.camera, &self.draws);
    }
}

impl CardBackend for GpuCards {
    fn create_card(&mut self, card: &CardNode) -> bool {
        let texture_key = card.asset.0;
        if !self.has_image(texture_key) {
            return false;
        }
        self.commands.push(CardCommand::Create { card_key: card.id.key(), texture_key });
        true
    }

    fn destroy_card(&mut self, id: CardId) {
        self.commands.push(CardCommand::Destroy { card_key: id.key() });
    }

    fn draw(&mut self, camera: &Camera, cards: &[CardNode]) {
        self.camera = (*camera).into();
        self.draws.clear();
        self.draws.extend(cards.iter().map(CardNode::to_draw));
    }
}
