//! Scroll container for the gallery: wheel, drag and key scrolling with an
//! eased offset.

/// Snap distance for the eased offset, logical px.
const SETTLE_PX: f32 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Drag {
    start_y: f32,
    start_target: f32,
}

#[derive(Debug, Clone)]
pub struct ScrollViewport {
    offset: f32,
    target: f32,
    content_height: f32,
    client_height: f32,
    locked: bool,
    drag: Option<Drag>,
    /// Fraction of the remaining distance covered per frame.
    smoothing: f32,
}

impl ScrollViewport {
    pub fn new(smoothing: f32) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            content_height: 0.0,
            client_height: 0.0,
            locked: false,
            drag: None,
            smoothing: smoothing.clamp(0.05, 1.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.client_height).max(0.0)
    }

    pub fn set_extent(&mut self, content_height: f32, client_height: f32) {
        self.content_height = content_height;
        self.client_height = client_height;
        self.target = self.clamp(self.target);
        self.offset = self.clamp(self.offset);
    }

    /// While locked every scroll input is ignored and the offset holds still.
    pub fn set_locked(&mut self, locked: bool) {
        if locked && !self.locked {
            self.target = self.offset;
            self.drag = None;
        }
        self.locked = locked;
    }

    pub fn scroll_by(&mut self, dy: f32) {
        if self.locked || dy == 0.0 {
            return;
        }
        self.target = self.clamp(self.target + dy);
    }

    pub fn scroll_to(&mut self, y: f32) {
        if self.locked {
            return;
        }
        self.target = self.clamp(y);
    }

    pub fn begin_drag(&mut self, y: f32) {
        if self.locked {
            return;
        }
        self.drag = Some(Drag { start_y: y, start_target: self.target });
    }

    /// Drags follow the pointer directly, without easing.
    pub fn drag_to(&mut self, y: f32) {
        let Some(drag) = self.drag else { return };
        self.target = self.clamp(drag.start_target + (drag.start_y - y));
        self.offset = self.target;
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Jumps to the top.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.target = 0.0;
        self.drag = None;
    }

    /// Eases the offset toward the target; call once per frame.
    pub fn tick(&mut self) {
        self.offset += (self.target - self.offset) * self.smoothing;
        if (self.target - self.offset).abs() < SETTLE_PX {
            self.offset = self.target;
        }
    }

    fn clamp(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_offset())
    }
}
