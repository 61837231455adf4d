use crate::geometry::CircleVertex;

use super::batch_pass::BatchPass;
use super::common::ViewProjBinding;

/// Filled circles: quads whose fragments fade by squared pixel distance.
pub type CirclePass = BatchPass<CircleVertex>;

pub fn create_circle_pass(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    view_proj: &ViewProjBinding,
) -> CirclePass {
    BatchPass::new(
        device,
        format,
        "glowline circle pass",
        include_str!("shaders/circle.wgsl"),
        CircleVertex::layout(),
        view_proj,
    )
}
