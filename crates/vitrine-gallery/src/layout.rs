use vitrine_engine::coords::{Rect, Viewport};
use vitrine_grid::{FrameSpec, Orientation};

use crate::asset::{AssetHandle, AssetPool};

/// Per-section round-robin offsets so repeated sections do not repeat asset order.
const VERTICAL_SECTION_OFFSET: usize = 3;
const HORIZONTAL_SECTION_OFFSET: usize = 5;

/// Inputs besides the frames and the asset pool.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutParams {
    pub viewport: Viewport,
    pub padding: f32,
    pub gap: f32,
    pub columns: u32,
    pub section_count: u32,
}

/// One placed card in content space (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub section: u32,
    /// Index of the frame within the section pattern.
    pub frame: u32,
    pub rect: Rect,
    pub asset: AssetHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutput {
    pub placements: Vec<Placement>,
    /// Vertical distance between the tops of consecutive sections.
    pub section_stride: f32,
    pub content_height: f32,
}

impl LayoutOutput {
    fn empty(viewport: Viewport) -> Self {
        Self {
            placements: Vec::new(),
            section_stride: 0.0,
            content_height: viewport.height.max(0.0),
        }
    }
}

/// Column width for `params`; may be non-positive for narrow viewports.
pub fn column_width(params: &LayoutParams) -> f32 {
    let cols = params.columns.max(1) as f32;
    (params.viewport.width - 2.0 * params.padding - params.gap * (cols - 1.0)) / cols
}

/// Lays out `section_count` repetitions of `frames`.
///
/// Row heights include the gap below every row but the last, so the stride
/// is `Σ row heights + gap` with one gap between consecutive rows and one
/// between sections.
///
/// Frames with non-positive or non-finite size are skipped and consume no asset.
/// Empty frames, an empty pool, or zero sections yield no placements and a
/// content height equal to the viewport height.
pub fn compute_layout(frames: &[FrameSpec], pool: &AssetPool, params: &LayoutParams) -> LayoutOutput {
    if frames.is_empty() || pool.is_empty() || params.section_count == 0 {
        return LayoutOutput::empty(params.viewport);
    }

    let col_w = column_width(params);
    let gap = params.gap;

    // Section-local rects; `None` for skipped frames.
    let local: Vec<Option<Rect>> = frames
        .iter()
        .map(|f| {
            let w = f.col_span as f32 * col_w + (f.col_span.saturating_sub(1)) as f32 * gap;
            let h = w / f.aspect_ratio;
            if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
                return None;
            }
            let x = params.padding + (f.col_start.saturating_sub(1)) as f32 * (col_w + gap);
            Some(Rect::new(x, 0.0, w, h))
        })
        .collect();

    let max_row = frames.iter().map(|f| f.row_start.max(1)).max().unwrap_or(1) as usize;
    let mut row_heights = vec![0.0f32; max_row];
    for (f, r) in frames.iter().zip(&local) {
        if let Some(r) = r {
            let row = f.row_start.max(1) as usize - 1;
            row_heights[row] = row_heights[row].max(r.size.y);
        }
    }

    // Each non-empty row except the last also owns the gap below it.
    let last_filled = row_heights.iter().rposition(|&h| h > 0.0);
    let Some(last_filled) = last_filled else {
        return LayoutOutput::empty(params.viewport);
    };
    for (i, h) in row_heights.iter_mut().enumerate() {
        if *h > 0.0 && i < last_filled {
            *h += gap;
        }
    }

    let mut row_tops = Vec::with_capacity(max_row);
    let mut acc = 0.0;
    for h in &row_heights {
        row_tops.push(acc);
        acc += h;
    }
    let section_stride = acc + gap;

    let vertical = pool.pool_for(Orientation::Vertical);
    let horizontal = pool.pool_for(Orientation::Horizontal);

    let mut placements = Vec::with_capacity(frames.len() * params.section_count as usize);
    for section in 0..params.section_count {
        let section_top = section as f32 * section_stride;
        let mut v_next = section as usize * VERTICAL_SECTION_OFFSET;
        let mut h_next = section as usize * HORIZONTAL_SECTION_OFFSET;

        for (i, (f, r)) in frames.iter().zip(&local).enumerate() {
            let Some(r) = r else { continue };

            let asset = match f.orientation {
                Orientation::Vertical => {
                    let a = vertical[v_next % vertical.len()];
                    v_next += 1;
                    a
                }
                Orientation::Horizontal => {
                    let a = horizontal[h_next % horizontal.len()];
                    h_next += 1;
                    a
                }
            };

            let top = section_top + row_tops[f.row_start.max(1) as usize - 1];
            placements.push(Placement {
                section,
                frame: i as u32,
                rect: Rect::new(r.origin.x, top, r.size.x, r.size.y),
                asset,
            });
        }
    }

    let content_height = params
        .viewport
        .height
        .max(section_stride * params.section_count as f32 - gap);

    log::debug!(
        "layout: {} placements, {} sections, stride {:.1}, content {:.1}",
        placements.len(),
        params.section_count,
        section_stride,
        content_height
    );

    LayoutOutput { placements, section_stride, content_height }
}
