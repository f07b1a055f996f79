use super::event::{InputEvent, WheelDelta};

/// Everything that happened since the previous redraw.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Events in arrival order.
    pub events: Vec<InputEvent>,

    /// Wheel notches, positive when content should move up.
    scroll_lines: f32,
    /// Pixel wheel delta, same sign as `scroll_lines`.
    scroll_pixels: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.scroll_lines = 0.0;
        self.scroll_pixels = 0.0;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        if let InputEvent::Wheel(delta) = &ev {
            match delta {
                WheelDelta::Lines(d) => self.scroll_lines -= d.y,
                WheelDelta::Pixels(d) => self.scroll_pixels -= d.y,
            }
        }
        self.events.push(ev);
    }

    /// Vertical scroll requested this frame, in logical pixels.
    pub fn scroll_delta_px(&self, line_height: f32) -> f32 {
        self.scroll_lines * line_height + self.scroll_pixels
    }
}
