use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
///
/// All callbacks run on the event-loop (render) thread.
pub trait App {
    /// The window surface exists and GPU resources can be created.
    fn on_surface_created(&mut self, gpu: &Gpu<'_>) {
        let _ = gpu;
    }

    /// The surface was resized to `width` x `height` physical pixels (both non-zero).
    fn on_surface_resized(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The event loop is shutting down; no further frames will be produced.
    fn on_exit(&mut self) {}
}
