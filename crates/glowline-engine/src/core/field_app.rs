use std::sync::Arc;

use crate::device::Gpu;
use crate::render::{FrameRenderer, FrameStats, RendererConfig};
use crate::scene::FieldView;
use crate::sync::FrameCompleter;

use super::app::{App, AppControl};
use super::ctx::FrameCtx;

/// Ready-made `App` that renders a `FieldView` on every redraw.
///
/// After each redraw the frame barrier is completed, also when the frame was
/// skipped (no scene, surface error), so a waiting simulation tick never stalls
/// on a frame that will not come. On exit the barrier is closed for good.
pub struct FieldApp<V: FieldView> {
    view: Arc<V>,
    renderer: FrameRenderer,
    completer: FrameCompleter,
    last_stats: Option<FrameStats>,
}

impl<V: FieldView> FieldApp<V> {
    pub fn new(view: Arc<V>, completer: FrameCompleter, config: RendererConfig) -> Self {
        Self {
            view,
            renderer: FrameRenderer::new(config),
            completer,
            last_stats: None,
        }
    }

    #[inline]
    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Geometry counts of the last drawn frame, `None` if it was skipped.
    #[inline]
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }
}

impl<V: FieldView> App for FieldApp<V> {
    fn on_surface_created(&mut self, gpu: &Gpu<'_>) {
        self.renderer.on_surface_created(gpu.device(), gpu.surface_format());
        let size = gpu.size();
        self.renderer.on_surface_resized(size.width, size.height);
    }

    fn on_surface_resized(&mut self, width: u32, height: u32) {
        self.renderer.on_surface_resized(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Fetched once: the surface is only acquired for a scene that is drawn.
        let Some(scene) = self.view.scene() else {
            log::debug!("frame {} skipped: no scene", ctx.time.frame_index);
            self.last_stats = None;
            self.completer.complete();
            return AppControl::Continue;
        };

        let clear = self.renderer.config().clear_color;
        let (renderer, view) = (&mut self.renderer, self.view.as_ref());

        let mut stats = None;
        let control = ctx.render(clear, |rctx, target| {
            stats = renderer.draw_frame(rctx, target, view, &scene);
        });

        if stats.is_none() {
            log::debug!("frame {} dropped", ctx.time.frame_index);
        }
        self.last_stats = stats;
        self.completer.complete();
        control
    }

    fn on_exit(&mut self) {
        log::info!("renderer exiting, releasing frame waiters");
        self.completer.close();
    }
}
