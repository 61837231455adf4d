use std::marker::PhantomData;

use bytemuck::Pod;

use crate::geometry::BatchView;

use super::common::{create_triangle_pipeline, GrowableBuffer, ViewProjBinding};

/// Pipeline plus vertex/index buffers for one primitive category.
pub struct BatchPass<V> {
    label: &'static str,
    pipeline: wgpu::RenderPipeline,
    vbo: GrowableBuffer,
    ibo: GrowableBuffer,
    uploaded_vertex_bytes: u64,
    uploaded_indices: u32,
    _vertex: PhantomData<V>,
}

impl<V: Pod> BatchPass<V> {
    pub(super) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        label: &'static str,
        shader: &str,
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        view_proj: &ViewProjBinding,
    ) -> Self {
        Self {
            label,
            pipeline: create_triangle_pipeline(device, format, label, shader, vertex_layout, view_proj),
            vbo: GrowableBuffer::new(label, wgpu::BufferUsages::VERTEX),
            ibo: GrowableBuffer::new(label, wgpu::BufferUsages::INDEX),
            uploaded_vertex_bytes: 0,
            uploaded_indices: 0,
            _vertex: PhantomData,
        }
    }

    /// Replaces the device-side contents with this frame's batch.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: BatchView<'_, V>) {
        let vertex_bytes = batch.vertex_bytes();
        self.vbo.upload(device, queue, vertex_bytes);
        self.ibo.upload(device, queue, batch.index_bytes());
        self.uploaded_vertex_bytes = vertex_bytes.len() as u64;
        self.uploaded_indices = batch.index_count();
    }

    /// Records the indexed draw of the last upload. No-op for an empty batch.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, view_proj: &ViewProjBinding) {
        if self.uploaded_indices == 0 {
            return;
        }
        let index_bytes = self.uploaded_indices as u64 * std::mem::size_of::<u32>() as u64;
        let (Some(vertices), Some(indices)) =
            (self.vbo.slice(self.uploaded_vertex_bytes), self.ibo.slice(index_bytes))
        else {
            log::debug!("{}: nothing uploaded, skipping draw", self.label);
            return;
        };

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, view_proj.bind_group(), &[]);
        rpass.set_vertex_buffer(0, vertices);
        rpass.set_index_buffer(indices, wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.uploaded_indices, 0, 0..1);
    }
}
