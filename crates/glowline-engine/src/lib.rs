//! Glowline engine crate.
//!
//! A small real-time 2D vector renderer: antialiased strokes, filled circles
//! and polygon outlines, drawn from a scene owned by a simulation thread and
//! paced by a synchronous frame barrier.

pub mod coords;
pub mod core;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod sync;
pub mod time;
pub mod window;
