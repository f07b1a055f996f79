//! Shared GPU types and utilities used by the card renderer.

use bytemuck::{Pod, Zeroable};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub position: [f32; 2],
    pub viewport: [f32; 2],
    pub zoom: f32,
    pub _pad: [f32; 3], // 16-byte alignment
}

// ── grid vertex ───────────────────────────────────────────────────────────

/// Vertex of the subdivided card mesh. `uv` is in `[0, 1]²` with +V up.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct GridVertex {
    pub uv: [f32; 2],
}

impl GridVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Builds a `segments × segments` quad grid over the unit square.
///
/// The card shader displaces vertices, so a single quad would not bend.
pub(super) fn grid_mesh(segments: u16) -> (Vec<GridVertex>, Vec<u16>) {
    let n = segments.max(1);
    let stride = n + 1;

    let mut vertices = Vec::with_capacity(stride as usize * stride as usize);
    for row in 0..=n {
        for col in 0..=n {
            vertices.push(GridVertex {
                uv: [col as f32 / n as f32, row as f32 / n as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(n as usize * n as usize * 6);
    for row in 0..n {
        for col in 0..n {
            let i0 = row * stride + col;
            let i1 = i0 + 1;
            let i2 = i0 + stride + 1;
            let i3 = i0 + stride;
            indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
        }
    }

    (vertices, indices)
}

/// Returns the `wgpu` minimum binding size for a uniform of type `T`.
pub(super) fn ubo_min_binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_mesh_counts() {
        let (v, i) = grid_mesh(4);
        assert_eq!(v.len(), 25);
        assert_eq!(i.len(), 4 * 4 * 6);
        assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
    }

    #[test]
    fn grid_mesh_spans_unit_square() {
        let (v, _) = grid_mesh(3);
        assert_eq!(v.first().map(|g| g.uv), Some([0.0, 0.0]));
        assert_eq!(v.last().map(|g| g.uv), Some([1.0, 1.0]));
    }

    #[test]
    fn grid_mesh_zero_segments_is_one_quad() {
        let (v, i) = grid_mesh(0);
        assert_eq!(v.len(), 4);
        assert_eq!(i, vec![0, 1, 3, 0, 3, 2]);
    }

    #[test]
    fn uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 32);
    }
}
