use crate::geometry::LineVertex;

use super::batch_pass::BatchPass;
use super::common::ViewProjBinding;

/// Strokes and outlines: position + color per vertex.
pub type LinePass = BatchPass<LineVertex>;

pub fn create_line_pass(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    view_proj: &ViewProjBinding,
) -> LinePass {
    BatchPass::new(
        device,
        format,
        "glowline line pass",
        include_str!("shaders/line.wgsl"),
        LineVertex::layout(),
        view_proj,
    )
}
