//! The winit event loop and the gallery window.
//!
//! [`Runtime::run`] blocks until the window closes. Each redraw hands the
//! application a [`FrameCtx`](crate::core::FrameCtx).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, WindowMode};
pub use winit::window::CursorIcon;
