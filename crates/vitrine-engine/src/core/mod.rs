//! The contract between the window runtime and the gallery application.
//!
//! The runtime owns the window and GPU; the application only sees a
//! [`FrameCtx`] once per redraw plus the raw window events it asks for.

mod ctx;

use winit::event::WindowEvent;
use winit::window::WindowId;

pub use ctx::{FrameCtx, WindowCtx};

/// Returned from [`App`] callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub trait App {
    /// Raw window events, delivered before they are folded into the next
    /// frame's input. Most applications only need [`FrameCtx::input_frame`].
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// One redraw. The gallery animates continuously, so this runs every
    /// display refresh while the window is visible.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once as the event loop shuts down, after the last frame.
    fn on_exit(&mut self) {}
}
