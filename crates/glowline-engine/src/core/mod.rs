//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the code that
//! renders: the `App` callbacks, the per-frame context, and `FieldApp`, the
//! stock app that renders a simulation's `FieldView`.

mod app;
mod ctx;
mod field_app;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use field_app::FieldApp;
