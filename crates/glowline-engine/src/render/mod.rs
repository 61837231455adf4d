//! GPU rendering subsystem.
//!
//! The `FrameRenderer` records a `FieldView`'s scene into two CPU batches
//! (strokes/outlines and filled circles), uploads them and draws both in one
//! render pass over the cleared surface.
//!
//! Convention:
//! - CPU geometry is in aspect-preserving clip space (see `coords`).
//! - The vertex shader applies one view-projection uniform shared by both passes.

mod config;
mod ctx;
mod frame;
mod passes;

pub use config::RendererConfig;
pub use ctx::{RenderCtx, RenderTarget};
pub use frame::{view_projection, FrameRenderer, FrameStats};
pub use passes::{BatchPass, CirclePass, LinePass, ViewProjBinding};
