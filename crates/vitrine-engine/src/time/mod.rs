//! Frame timing.
//!
//! Gallery animations are keyed off [`FrameTime::elapsed_ms`]; per-frame
//! easing uses the clamped [`FrameTime::dt`].

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
