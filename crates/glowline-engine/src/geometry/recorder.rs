use crate::coords::{CoordinateTransform, Vec2};
use crate::paint::Color;
use crate::render::RendererConfig;
use crate::scene::ShapeSink;

use super::{
    add_filled_circle, add_line, add_polygon_outline, outline_min_sides, CircleVertex,
    GeometryBatch, LineVertex, TrigTable,
};

/// `ShapeSink` that turns one frame's draw calls into batch geometry.
///
/// Applies the antialiasing policies: stroke fade bands above a nominal width
/// threshold, a constant ~2 px fade on circles above a radius threshold.
pub struct ShapeRecorder<'a> {
    lines: &'a mut GeometryBatch<LineVertex>,
    circles: &'a mut GeometryBatch<CircleVertex>,
    transform: CoordinateTransform<'a>,
    trig: &'a TrigTable,
    config: &'a RendererConfig,
}

impl<'a> ShapeRecorder<'a> {
    pub fn new(
        lines: &'a mut GeometryBatch<LineVertex>,
        circles: &'a mut GeometryBatch<CircleVertex>,
        transform: CoordinateTransform<'a>,
        trig: &'a TrigTable,
        config: &'a RendererConfig,
    ) -> Self {
        Self { lines, circles, transform, trig, config }
    }

    /// `(core, aa)` stroke widths in pixels; `aa == 0` disables the fade.
    fn stroke_widths(&self) -> (f32, f32) {
        let width = self.transform.params().line_width;
        if width >= self.config.line_aa_min_width {
            (width - self.config.line_aa_inset, width + self.config.line_aa_inset)
        } else {
            (width, 0.0)
        }
    }

    /// Polygon side count requested for an outline of world `radius`.
    pub fn requested_outline_sides(&self, radius: f32) -> u32 {
        // Negative radii saturate to zero.
        let radius_px = self.transform.world_length_to_pixels(radius).ceil() as u32;
        outline_min_sides(
            radius_px,
            self.config.outline_max_sides,
            self.config.outline_exact_radius_px,
        )
    }
}

impl ShapeSink for ShapeRecorder<'_> {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let (core, aa) = self.stroke_widths();
        add_line(self.lines, &self.transform, from, to, core, aa, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let radius_px = self.transform.world_length_to_pixels(radius);
        if radius_px >= self.config.circle_fade_min_radius {
            // One pixel, in world units.
            let delta = 1.0 / self.transform.world_length_to_pixels(1.0);
            add_filled_circle(
                self.circles,
                &self.transform,
                center,
                radius - delta,
                radius + delta,
                color,
            );
        } else {
            add_filled_circle(self.circles, &self.transform, center, radius, radius, color);
        }
    }

    fn frame_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let min_sides = self.requested_outline_sides(radius);
        let (core, aa) = self.stroke_widths();
        add_polygon_outline(
            self.lines,
            &self.transform,
            self.trig,
            center,
            radius,
            min_sides,
            core,
            aa,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{test_params, FrameParams, IdentityMapping, PixelMapping};

    struct Scaled(f32);

    impl PixelMapping for Scaled {
        fn world_to_pixel_x(&self, x: f32) -> f32 { x * self.0 }
        fn world_to_pixel_y(&self, y: f32) -> f32 { y * self.0 }
        fn pixel_to_world_x(&self, px: f32) -> f32 { px / self.0 }
        fn pixel_to_world_y(&self, py: f32) -> f32 { py / self.0 }
    }

    struct Fixture {
        lines: GeometryBatch<LineVertex>,
        circles: GeometryBatch<CircleVertex>,
        trig: TrigTable,
        config: RendererConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let config = RendererConfig::default();
            Self {
                lines: GeometryBatch::with_capacity("lines", 64, 64),
                circles: GeometryBatch::with_capacity("circles", 32, 64),
                trig: TrigTable::new(&config.trig_sizes),
                config,
            }
        }

        fn record<'a>(
            &'a mut self,
            mapping: &'a dyn PixelMapping,
            params: FrameParams,
        ) -> ShapeRecorder<'a> {
            ShapeRecorder::new(
                &mut self.lines,
                &mut self.circles,
                CoordinateTransform::new(mapping, params),
                &self.trig,
                &self.config,
            )
        }
    }

    fn radii_px(v: &CircleVertex) -> (f32, f32) {
        (v.core_radius_sq.sqrt(), v.outer_radius_sq.sqrt())
    }

    #[test]
    fn thin_lines_have_no_fade() {
        let mut f = Fixture::new();
        f.record(&IdentityMapping, test_params(600.0, 800.0, 4.0)).draw_line(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Color::WHITE,
        );
        assert_eq!(f.lines.vertex_count(), 4);
        assert_eq!(f.lines.index_count(), 6);
    }

    #[test]
    fn thick_lines_fade_around_narrower_core() {
        let mut f = Fixture::new();
        f.record(&IdentityMapping, test_params(600.0, 800.0, 5.0)).draw_line(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Color::WHITE,
        );
        assert_eq!(f.lines.vertex_count(), 8);
        assert_eq!(f.lines.index_count(), 18);

        // core = 3 px, aa = 7 px (half-widths in clip units relative to height)
        let v = f.lines.vertices();
        let core = (v[2].position[1] - v[0].position[1]) / 2.0;
        let aa = (v[6].position[1] - v[4].position[1]) / 2.0;
        assert!((core - 3.0 / 800.0).abs() < 1e-6);
        assert!((aa - 7.0 / 800.0).abs() < 1e-6);
    }

    #[test]
    fn line_path_never_shares_vertices() {
        let mut f = Fixture::new();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0), Vec2::new(0.0, 90.0)];
        f.record(&IdentityMapping, test_params(600.0, 800.0, 2.0))
            .draw_line_path(&pts, Color::WHITE);
        assert_eq!(f.lines.vertex_count(), 12);
        assert_eq!(f.lines.index_count(), 18);
    }

    #[test]
    fn small_circle_has_no_fade_band() {
        let mapping = Scaled(4.0);
        let mut f = Fixture::new();
        // 2.25 world units * 4 = 9 px
        f.record(&mapping, test_params(600.0, 800.0, 1.0))
            .fill_circle(Vec2::new(20.0, 20.0), 2.25, Color::WHITE);

        let v = f.circles.vertices()[0];
        assert_eq!(v.core_radius_sq, v.outer_radius_sq);
        assert_eq!(radii_px(&v), (9.0, 9.0));
    }

    #[test]
    fn large_circle_gets_two_pixel_fade_band() {
        let mapping = Scaled(4.0);
        let mut f = Fixture::new();
        // 2.5 world units * 4 = 10 px
        f.record(&mapping, test_params(600.0, 800.0, 1.0))
            .fill_circle(Vec2::new(20.0, 20.0), 2.5, Color::WHITE);

        let (core, outer) = radii_px(&f.circles.vertices()[0]);
        assert!((core - 9.0).abs() < 1e-4);
        assert!((outer - 11.0).abs() < 1e-4);
        // Two pixels == half a world unit at this scale.
        assert!(((outer - core) / 4.0 - 0.5).abs() < 1e-5);
    }

    #[test]
    fn outline_side_heuristic() {
        let mut f = Fixture::new();
        let rec = f.record(&IdentityMapping, test_params(600.0, 800.0, 1.0));
        assert_eq!(rec.requested_outline_sides(1000.0), 1000);
        assert_eq!(rec.requested_outline_sides(50.0), 50);
        assert_eq!(rec.requested_outline_sides(100.0), 64);
        assert_eq!(rec.requested_outline_sides(49.2), 50);
    }

    #[test]
    fn huge_outline_uses_one_side_per_pixel() {
        let mut f = Fixture::new();
        f.record(&IdentityMapping, test_params(600.0, 800.0, 1.0))
            .frame_circle(Vec2::new(300.0, 400.0), 1000.0, Color::WHITE);
        assert_eq!(f.lines.vertex_count(), 2 * 1000);
    }

    #[test]
    fn medium_outline_rounds_up_to_table_size() {
        let mut f = Fixture::new();
        f.record(&IdentityMapping, test_params(600.0, 800.0, 6.0))
            .frame_circle(Vec2::new(300.0, 400.0), 50.0, Color::WHITE);
        // 50 requested -> 64-entry table, antialiased: 4 vertices and 18 indices per side
        assert_eq!(f.lines.vertex_count(), 4 * 64);
        assert_eq!(f.lines.index_count(), 18 * 64);
    }
}
