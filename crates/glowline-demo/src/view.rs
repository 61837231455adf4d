use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use glowline_engine::coords::PixelMapping;
use glowline_engine::scene::{FieldView, SharedScene};

use crate::table::Table;

/// World -> pixel fit: uniform scale, y flipped, content centered.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Fit {
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl Fit {
    /// Fits a `world_w` x `world_h` area (plus `margin` px on each side) into the surface.
    fn compute(world_w: f32, world_h: f32, width: u32, height: u32, margin: f32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let scale = ((w - 2.0 * margin) / world_w)
            .min((h - 2.0 * margin) / world_h)
            .max(f32::EPSILON);
        Self {
            scale,
            origin_x: (w - world_w * scale) / 2.0,
            origin_y: (h + world_h * scale) / 2.0,
        }
    }
}

/// What the renderer sees of the table: its scene and a mapping that keeps the
/// whole table in view at any window size.
pub struct TableView {
    table: Arc<Mutex<Table>>,
    world: (f32, f32),
    fit: RwLock<Fit>,
    line_width: f32,
    margin: f32,
}

impl TableView {
    pub fn new(table: Arc<Mutex<Table>>, line_width: f32) -> Self {
        let world = table.lock().size();
        let margin = 12.0;
        Self {
            table,
            world,
            fit: RwLock::new(Fit::compute(world.0, world.1, 600, 800, margin)),
            line_width,
            margin,
        }
    }
}

impl PixelMapping for TableView {
    fn world_to_pixel_x(&self, x: f32) -> f32 {
        let fit = self.fit.read();
        fit.origin_x + x * fit.scale
    }

    fn world_to_pixel_y(&self, y: f32) -> f32 {
        let fit = self.fit.read();
        fit.origin_y - y * fit.scale
    }

    fn pixel_to_world_x(&self, px: f32) -> f32 {
        let fit = self.fit.read();
        (px - fit.origin_x) / fit.scale
    }

    fn pixel_to_world_y(&self, py: f32) -> f32 {
        let fit = self.fit.read();
        (fit.origin_y - py) / fit.scale
    }
}

impl FieldView for TableView {
    fn scene(&self) -> Option<SharedScene> {
        let scene: SharedScene = self.table.clone();
        Some(scene)
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn begin_frame(&self, width: u32, height: u32) {
        let fit = Fit::compute(self.world.0, self.world.1, width, height, self.margin);
        let mut current = self.fit.write();
        if *current != fit {
            log::debug!("refit to {width}x{height}: {:.2} px/unit", fit.scale);
            *current = fit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TableView {
        TableView::new(Arc::new(Mutex::new(Table::new(60.0, 80.0))), 2.0)
    }

    #[test]
    fn table_corners_land_inside_the_margin() {
        let v = view();
        v.begin_frame(600, 800);
        // Width-bound: (600 - 24) / 60 = 9.6 px per unit.
        assert!((v.world_to_pixel_x(0.0) - 12.0).abs() < 1e-3);
        assert!((v.world_to_pixel_x(60.0) - 588.0).abs() < 1e-3);
        let bottom = v.world_to_pixel_y(0.0);
        let top = v.world_to_pixel_y(80.0);
        assert!(bottom > top);
        assert!((top + bottom - 800.0).abs() < 1e-3);
    }

    #[test]
    fn mapping_round_trips() {
        let v = view();
        v.begin_frame(1024, 300);
        let (x, y) = (17.5, 61.25);
        assert!((v.pixel_to_world_x(v.world_to_pixel_x(x)) - x).abs() < 1e-3);
        assert!((v.pixel_to_world_y(v.world_to_pixel_y(y)) - y).abs() < 1e-3);
    }

    #[test]
    fn always_has_a_scene() {
        assert!(view().scene().is_some());
    }
}
