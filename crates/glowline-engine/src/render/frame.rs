use glam::{Mat4, Vec3};

use crate::coords::{CoordinateTransform, FrameParams, Viewport};
use crate::geometry::{CircleVertex, GeometryBatch, LineVertex, ShapeRecorder, TrigTable};
use crate::scene::{FieldView, SharedScene};

use super::config::RendererConfig;
use super::ctx::{RenderCtx, RenderTarget};
use super::passes::{create_circle_pass, create_line_pass, CirclePass, LinePass, ViewProjBinding};

/// Geometry counts of one recorded frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub line_vertices: usize,
    pub line_indices: usize,
    pub circle_vertices: usize,
    pub circle_indices: usize,
}

struct GpuResources {
    format: wgpu::TextureFormat,
    view_proj: ViewProjBinding,
    lines: LinePass,
    circles: CirclePass,
}

/// Device-side state. Pipelines can only be built once a surface format is known.
enum GpuState {
    Unbound,
    Bound(GpuResources),
}

/// Per-frame renderer for a `FieldView`.
///
/// Owns the CPU batches (reused across frames) and, once bound to a surface,
/// the two GPU passes. Lines are drawn before circles.
pub struct FrameRenderer {
    config: RendererConfig,
    lines: GeometryBatch<LineVertex>,
    circles: GeometryBatch<CircleVertex>,
    trig: TrigTable,
    state: GpuState,
    projection: Option<(Viewport, Mat4)>,
}

impl FrameRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let (lv, li) = config.line_batch_capacity;
        let (cv, ci) = config.circle_batch_capacity;
        Self {
            lines: GeometryBatch::with_capacity("line batch", lv, li),
            circles: GeometryBatch::with_capacity("circle batch", cv, ci),
            trig: TrigTable::new(&config.trig_sizes),
            state: GpuState::Unbound,
            projection: None,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self.state, GpuState::Bound(_))
    }

    /// Builds pipelines and buffers for `format`. Replaces any previous binding.
    pub fn on_surface_created(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        let view_proj = ViewProjBinding::new(device);
        let lines = create_line_pass(device, format, &view_proj);
        let circles = create_circle_pass(device, format, &view_proj);
        log::info!("frame renderer bound to {format:?}");
        self.state = GpuState::Bound(GpuResources { format, view_proj, lines, circles });
    }

    /// Recomputes the view-projection for the new surface size.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width as f32, height as f32);
        if !viewport.is_valid() {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        self.projection = Some((viewport, view_projection(viewport)));
    }

    fn projection_for(&mut self, viewport: Viewport) -> Mat4 {
        match self.projection {
            Some((vp, m)) if vp == viewport => m,
            _ => {
                let m = view_projection(viewport);
                self.projection = Some((viewport, m));
                m
            }
        }
    }

    /// Records `scene` as seen through `view` into the CPU batches.
    ///
    /// The caller fetches the scene once per frame and skips the frame when the
    /// view has none. Returns `None` without touching anything when the
    /// viewport is degenerate.
    pub fn record_frame<V: FieldView>(
        &mut self,
        view: &V,
        scene: &SharedScene,
        viewport: Viewport,
    ) -> Option<FrameStats> {
        if !viewport.is_valid() {
            return None;
        }

        self.lines.reset();
        self.circles.reset();
        view.begin_frame(viewport.width as u32, viewport.height as u32);
        let params = FrameParams { viewport, line_width: view.line_width() };

        let transform = CoordinateTransform::new(view, params);
        let mut recorder = ShapeRecorder::new(
            &mut self.lines,
            &mut self.circles,
            transform,
            &self.trig,
            &self.config,
        );
        scene.lock().draw(&mut recorder);

        Some(FrameStats {
            line_vertices: self.lines.vertex_count(),
            line_indices: self.lines.index_count(),
            circle_vertices: self.circles.vertex_count(),
            circle_indices: self.circles.index_count(),
        })
    }

    /// Records, uploads and draws one frame of `scene` onto `target`.
    ///
    /// The caller is expected to have cleared the target; this pass loads it.
    pub fn draw_frame<V: FieldView>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view: &V,
        scene: &SharedScene,
    ) -> Option<FrameStats> {
        let rebind = match &self.state {
            GpuState::Bound(res) => res.format != ctx.surface_format,
            GpuState::Unbound => true,
        };
        if rebind {
            self.on_surface_created(ctx.device, ctx.surface_format);
        }

        let stats = self.record_frame(view, scene, ctx.viewport)?;
        let view_proj = self.projection_for(ctx.viewport);

        let GpuState::Bound(res) = &mut self.state else {
            return None;
        };
        res.view_proj.write(ctx.queue, view_proj);
        res.lines.upload(ctx.device, ctx.queue, self.lines.finalize_for_upload());
        res.circles.upload(ctx.device, ctx.queue, self.circles.finalize_for_upload());

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glowline frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        res.lines.draw(&mut rpass, &res.view_proj);
        res.circles.draw(&mut rpass, &res.view_proj);

        Some(stats)
    }
}

/// Maps the aspect-preserving clip space onto the surface's NDC.
///
/// The shorter axis spans `[-short/long, short/long]` in clip space, so the
/// orthographic volume is sized to exactly that range.
pub fn view_projection(viewport: Viewport) -> Mat4 {
    let scale = viewport.scale();
    let hw = viewport.width / scale;
    let hh = viewport.height / scale;
    let projection = Mat4::orthographic_rh(-hw, hw, -hh, hh, 1.0, 5.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
    projection * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{PixelMapping, Vec2};
    use crate::paint::Color;
    use crate::scene::{Scene, ShapeSink, SharedScene};
    use glam::Vec4;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct OneOfEach;

    impl Scene for OneOfEach {
        fn draw(&self, sink: &mut dyn ShapeSink) {
            sink.draw_line(Vec2::new(10.0, 10.0), Vec2::new(100.0, 10.0), Color::WHITE);
            sink.fill_circle(Vec2::new(50.0, 50.0), 5.0, Color::WHITE);
        }
    }

    struct View {
        scene: Option<SharedScene>,
        frames: AtomicU32,
    }

    impl View {
        fn new(scene: Option<SharedScene>) -> Self {
            Self { scene, frames: AtomicU32::new(0) }
        }
    }

    impl PixelMapping for View {
        fn world_to_pixel_x(&self, x: f32) -> f32 { x }
        fn world_to_pixel_y(&self, y: f32) -> f32 { y }
        fn pixel_to_world_x(&self, px: f32) -> f32 { px }
        fn pixel_to_world_y(&self, py: f32) -> f32 { py }
    }

    impl FieldView for View {
        fn scene(&self) -> Option<SharedScene> {
            self.scene.clone()
        }
        fn line_width(&self) -> f32 {
            2.0
        }
        fn begin_frame(&self, _width: u32, _height: u32) {
            self.frames.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn shared(scene: impl Scene + 'static) -> SharedScene {
        Arc::new(Mutex::new(scene))
    }

    #[test]
    fn records_lines_and_circles_into_separate_batches() {
        let mut renderer = FrameRenderer::new(RendererConfig::default());
        let scene = shared(OneOfEach);
        let view = View::new(Some(scene.clone()));

        let stats = renderer.record_frame(&view, &scene, Viewport::new(600.0, 800.0)).unwrap();
        assert_eq!(
            stats,
            FrameStats { line_vertices: 4, line_indices: 6, circle_vertices: 4, circle_indices: 6 }
        );
        assert_eq!(view.frames.load(Ordering::SeqCst), 1);
        assert!(!renderer.is_bound());
    }

    #[test]
    fn batches_restart_every_frame() {
        let mut renderer = FrameRenderer::new(RendererConfig::default());
        let scene = shared(OneOfEach);
        let view = View::new(Some(scene.clone()));
        for _ in 0..3 {
            let stats = renderer.record_frame(&view, &scene, Viewport::new(600.0, 800.0)).unwrap();
            assert_eq!(stats.line_vertices, 4);
            assert_eq!(stats.circle_vertices, 4);
        }
    }

    #[test]
    fn records_the_scene_it_was_handed() {
        let mut renderer = FrameRenderer::new(RendererConfig::default());
        // The view dropped its scene after the caller fetched it.
        let view = View::new(None);
        let scene = shared(OneOfEach);

        let stats = renderer.record_frame(&view, &scene, Viewport::new(600.0, 800.0)).unwrap();
        assert_eq!(stats.line_vertices, 4);
        assert_eq!(stats.circle_vertices, 4);
        assert_eq!(view.frames.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn degenerate_viewport_skips_the_frame() {
        let mut renderer = FrameRenderer::new(RendererConfig::default());
        let scene = shared(OneOfEach);
        let view = View::new(Some(scene.clone()));
        assert!(renderer.record_frame(&view, &scene, Viewport::new(0.0, 800.0)).is_none());
        assert_eq!(view.frames.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn projection_stretches_short_axis_to_ndc() {
        let m = view_projection(Viewport::new(600.0, 800.0));
        let corner = m * Vec4::new(0.75, 1.0, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&corner.z));

        let center = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);
    }

    #[test]
    fn resize_caches_projection() {
        let mut renderer = FrameRenderer::new(RendererConfig::default());
        renderer.on_surface_resized(1000, 500);
        let cached = renderer.projection_for(Viewport::new(1000.0, 500.0));
        assert_eq!(cached, view_projection(Viewport::new(1000.0, 500.0)));

        renderer.on_surface_resized(0, 500);
        assert_eq!(renderer.projection.map(|(vp, _)| vp), Some(Viewport::new(1000.0, 500.0)));
    }
}
