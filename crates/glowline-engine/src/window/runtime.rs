use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::sync::FrameScheduler;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glowline".to_string(),
            initial_size: LogicalSize::new(600.0, 800.0),
        }
    }
}

/// Events other threads post into the event loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RuntimeEvent {
    FrameRequested,
    ExitRequested,
}

/// Cloneable, thread-safe handle to a running event loop.
///
/// Scheduling a frame posts an event; the loop turns it into a redraw.
#[derive(Clone)]
pub struct RuntimeHandle {
    proxy: EventLoopProxy<RuntimeEvent>,
}

impl RuntimeHandle {
    fn send(&self, event: RuntimeEvent) {
        // Fails only once the loop is gone; nothing is left to wake then.
        if self.proxy.send_event(event).is_err() {
            log::debug!("event loop closed, dropping {event:?}");
        }
    }

    pub fn request_exit(&self) {
        self.send(RuntimeEvent::ExitRequested);
    }
}

impl FrameScheduler for RuntimeHandle {
    fn schedule_frame(&self) {
        self.send(RuntimeEvent::FrameRequested);
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `make_app`'s app until the window closes.
    ///
    /// Frames are drawn only when scheduled through the [`RuntimeHandle`] passed
    /// to `make_app`, plus once after each resize.
    pub fn run<A, F>(config: RuntimeConfig, gpu_init: GpuInit, make_app: F) -> Result<()>
    where
        A: CoreApp + 'static,
        F: FnOnce(RuntimeHandle) -> A,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let handle = RuntimeHandle { proxy: event_loop.create_proxy() };
        let app = make_app(handle.clone());
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.error.map_or(Ok(()), Err)
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    /// Setup failure reported by `Runtime::run` once the loop returns.
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        entry.with_gpu(|gpu| {
            let size = gpu.size();
            log::info!("window {id:?} ready ({}x{})", size.width, size.height);
            self.app.on_surface_created(gpu);
        });

        self.window = Some(entry);
        Ok(id)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };
        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        if new_size.width > 0 && new_size.height > 0 {
            self.app.on_surface_resized(new_size.width, new_size.height);
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let app = &mut self.app;
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id: window_id, window: fields.window },
                gpu: fields.gpu,
                time: fields.clock.tick(),
            };
            control = app.on_frame(&mut ctx);
        });

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.error = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::FrameRequested => {
                if let Some(entry) = self.window.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            RuntimeEvent::ExitRequested => self.request_exit(event_loop),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window {window_id:?} closed");
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.window.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(new_size) = new_size {
                    self.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.on_exit();
        self.window = None;
    }
}
