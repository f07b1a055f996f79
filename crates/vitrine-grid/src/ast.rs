/// Orientation class of a frame (and of the assets that may fill it).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Classifies natural image dimensions. Square images count as vertical.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height >= width { Orientation::Vertical } else { Orientation::Horizontal }
    }
}

/// One frame rule of a section pattern.
///
/// `row_start` and `col_start` are 1-based grid coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSpec {
    pub row_start: u32,
    pub col_start: u32,
    pub col_span: u32,
    /// Width divided by height.
    pub aspect_ratio: f32,
    pub orientation: Orientation,
}

impl FrameSpec {
    pub const fn new(
        row_start: u32,
        col_start: u32,
        col_span: u32,
        aspect_ratio: f32,
        orientation: Orientation,
    ) -> Self {
        Self { row_start, col_start, col_span, aspect_ratio, orientation }
    }
}

/// A parsed descriptor: optional column count plus the frames of one section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridDocument {
    pub columns: Option<u32>,
    pub frames: Vec<FrameSpec>,
}
