use std::collections::HashSet;

use crate::coords::Vec2;

use super::event::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
use super::frame::InputFrame;

/// Held keys, held buttons and pointer position for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// `None` while the pointer is outside the window.
    pub pointer: Option<Vec2>,
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Updates held state from `ev` and forwards it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                // Releases are not delivered to an unfocused window.
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved(p) => self.pointer = Some(*p),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::Key { key, state, .. } => {
                toggle(&mut self.keys_down, *key, *state);
            }
            InputEvent::PointerButton { button, state, .. } => {
                toggle(&mut self.buttons_down, *button, *state);
            }
            InputEvent::Wheel(_) => {}
        }
        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

fn toggle<T: Eq + std::hash::Hash>(held: &mut HashSet<T>, item: T, state: ButtonState) {
    match state {
        ButtonState::Pressed => held.insert(item),
        ButtonState::Released => held.remove(&item),
    };
}
