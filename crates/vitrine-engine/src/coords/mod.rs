//! Coordinate and geometry types shared by the renderer and the gallery.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The card renderer works in a centered, +Y up world space; [`Viewport`]
//! provides the conversion to normalized device coordinates.

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
