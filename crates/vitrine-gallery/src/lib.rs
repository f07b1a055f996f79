//! Interactive card gallery.
//!
//! Lays a repeating frame grid over a pool of images, hit-tests the pointer
//! against the cards every move, warps hovered cards, and runs a
//! `none → center → cover` focus machine whose camera tweens and history
//! entries stay consistent across taps, resizes and back/forward navigation.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`layout`] | `compute_layout`: frame grid + assets → placed rects |
//! | [`gallery`] | `Gallery`: the per-frame loop and input entry points |
//! | [`picking`] | `pick`, tap classification |
//! | [`distortion`] | per-card hover warp smoothing |
//! | [`zoom`] | `ZoomMachine`, camera targets |
//! | [`history`] | `HistoryBridge`, in-memory `SessionHistory` |
//! | [`backend`] | host seams: `CardBackend`, `DetailOverlay`, `HostCtx` |
//!
//! Nothing here touches the GPU or the window; the host lends those through
//! [`HostCtx`] each frame.

pub mod asset;
pub mod backend;
pub mod camera;
pub mod card;
pub mod config;
pub mod detail;
pub mod distortion;
pub mod easing;
pub mod gallery;
pub mod history;
pub mod layout;
pub mod picking;
pub mod tween;
pub mod zoom;

#[cfg(test)]
mod testing;

pub use asset::{Asset, AssetError, AssetHandle, AssetLoader, AssetPool, AssetRecord};
pub use backend::{CardBackend, DetailOverlay, FrameOutput, HostCtx, ScrollMetrics};
pub use camera::Camera;
pub use card::{CardId, CardNode, CardUniforms};
pub use config::{DistortionConfig, GalleryConfig, LayoutConfig, ZoomConfig};
pub use detail::{DetailCatalog, DetailRecord, DetailResolver, NoDetails};
pub use easing::CubicBezier;
pub use gallery::Gallery;
pub use history::{HistoryBackend, HistoryBridge, HistoryEntry, HistoryState, PopAction, SessionHistory};
pub use zoom::{OverlayState, ZoomPhase};
