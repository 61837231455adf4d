use bytemuck::{Pod, Zeroable};

/// Line/outline vertex layout (16 bytes):
///
///  offset  0  position  [f32; 3]  loc 0
///  offset 12  color     [u8; 4]   loc 1  (RGBA, normalized)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4   // color
    ];

    #[inline]
    pub fn new(x: f32, y: f32, color: [u8; 4]) -> Self {
        Self { position: [x, y, 0.0], color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Filled-circle vertex layout (32 bytes):
///
///  offset  0  position         [f32; 3]  loc 0
///  offset 12  color            [u8; 4]   loc 1
///  offset 16  center_px        [f32; 2]  loc 2
///  offset 24  core_radius_sq   f32       loc 3
///  offset 28  outer_radius_sq  f32       loc 4
///
/// Center and radii are in pixels so the fragment stage can measure distance
/// without being skewed by the non-uniform clip scaling.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CircleVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub center_px: [f32; 2],
    pub core_radius_sq: f32,
    pub outer_radius_sq: f32,
}

impl CircleVertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4,  // color
        2 => Float32x2, // center_px
        3 => Float32,   // core_radius_sq
        4 => Float32    // outer_radius_sq
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
