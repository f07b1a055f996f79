//! Window input, decoupled from winit.
//!
//! The runtime translates winit events into [`InputEvent`]s, folds them into
//! the window's [`InputState`] and records them in the current
//! [`InputFrame`], which the application drains once per redraw.

mod event;
mod frame;
pub(crate) mod platform;
mod state;

pub use event::{ButtonState, InputEvent, Key, Modifiers, MouseButton, WheelDelta};
pub use frame::InputFrame;
pub use state::InputState;
