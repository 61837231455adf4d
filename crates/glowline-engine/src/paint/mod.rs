//! Color model shared between simulation draw calls and vertex data.

pub mod color;

pub use color::Color;
