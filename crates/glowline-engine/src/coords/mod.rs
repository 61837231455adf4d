//! Coordinate spaces and the transforms between them.
//!
//! Three spaces are involved in every frame:
//! - world: simulation units, mapped to pixels by the simulation's `PixelMapping`
//! - pixel: drawable surface, origin top-left, +Y down
//! - clip: aspect-preserving square space, longer side spans `[-1, 1]`, +Y up
//!
//! The view-projection matrix built by the renderer stretches clip space onto the
//! surface's normalized device coordinates.

mod transform;
mod vec2;
mod viewport;

pub use transform::{CoordinateTransform, FrameParams, PixelMapping};
pub use vec2::Vec2;
pub use viewport::Viewport;

#[cfg(test)]
pub(crate) use transform::tests::{params as test_params, IdentityMapping};
