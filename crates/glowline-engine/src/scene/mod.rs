//! Contracts with the simulation side.
//!
//! The simulation owns the scene and the world -> pixel mapping. Once per frame
//! the renderer locks the scene and lets it emit draw calls into a `ShapeSink`;
//! the lock keeps physics from mutating the scene mid-traversal.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::coords::{PixelMapping, Vec2};
use crate::paint::Color;

/// Receiver of per-frame draw calls. Coordinates and radii are world units.
pub trait ShapeSink {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draws each consecutive pair of `points` as an independent segment.
    fn draw_line_path(&mut self, points: &[Vec2], color: Color) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn frame_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Something that can describe itself as draw calls.
pub trait Scene: Send {
    fn draw(&self, sink: &mut dyn ShapeSink);
}

/// Scene shared between the simulation thread and the render thread.
pub type SharedScene = Arc<Mutex<dyn Scene>>;

/// Simulation-side view state consulted once per frame.
pub trait FieldView: PixelMapping + Send + Sync {
    /// Current scene, or `None` to skip drawing.
    fn scene(&self) -> Option<SharedScene>;

    /// Nominal stroke width in pixels.
    fn line_width(&self) -> f32;

    /// Called at frame start with the surface size, before anything is snapshotted.
    fn begin_frame(&self, width: u32, height: u32) {
        let _ = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Segments(Vec<(Vec2, Vec2)>);

    impl ShapeSink for Segments {
        fn draw_line(&mut self, from: Vec2, to: Vec2, _color: Color) {
            self.0.push((from, to));
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn frame_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    }

    #[test]
    fn line_path_splits_into_segments() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut sink = Segments::default();
        sink.draw_line_path(&pts, Color::WHITE);
        assert_eq!(sink.0, vec![(pts[0], pts[1]), (pts[1], pts[2])]);
    }

    #[test]
    fn short_paths_draw_nothing() {
        let mut sink = Segments::default();
        sink.draw_line_path(&[Vec2::new(3.0, 3.0)], Color::WHITE);
        sink.draw_line_path(&[], Color::WHITE);
        assert!(sink.0.is_empty());
    }
}
