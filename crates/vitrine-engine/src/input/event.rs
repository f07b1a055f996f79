use crate::coords::Vec2;

/// Keys the gallery binds. Anything else arrives as `Other` with the
/// platform key code so hosts can still log it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Dedicated history keys found on some keyboards.
    BrowserBack,
    BrowserForward,
    Other(u32),
}

impl Key {
    /// Keys that act on every auto-repeat rather than once per press.
    pub fn repeats(self) -> bool {
        matches!(self, Key::ArrowUp | Key::ArrowDown | Key::PageUp | Key::PageDown)
    }
}

/// Shared by keys and pointer buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side buttons; the studio maps them to history navigation.
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Wheel input. Positive `y` rolls away from the user, which reveals
/// content above.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    /// Notched wheel, in lines.
    Lines(Vec2),
    /// Trackpad or high-resolution wheel, in logical pixels.
    Pixels(Vec2),
}

/// Window input in logical pixels, client space (top-left origin, +Y down).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),
    Key {
        key: Key,
        state: ButtonState,
        repeat: bool,
    },
    PointerMoved(Vec2),
    /// `position` is the last known pointer position; winit does not attach
    /// one to button events.
    PointerButton {
        button: MouseButton,
        state: ButtonState,
        position: Vec2,
    },
    Wheel(WheelDelta),
    PointerLeft,
    Focused(bool),
}
