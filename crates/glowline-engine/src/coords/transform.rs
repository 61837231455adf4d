use super::Viewport;

/// World <-> pixel mapping supplied by the simulation side.
///
/// Pixel space is the drawable surface: origin top-left, +Y down.
pub trait PixelMapping {
    fn world_to_pixel_x(&self, x: f32) -> f32;
    fn world_to_pixel_y(&self, y: f32) -> f32;
    fn pixel_to_world_x(&self, px: f32) -> f32;
    fn pixel_to_world_y(&self, py: f32) -> f32;
}

/// Snapshot of per-frame parameters.
///
/// Taken once when a frame starts and used unchanged until it ends, so a surface
/// resized mid-frame is only observed on the next one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub viewport: Viewport,
    /// Nominal stroke width in pixels.
    pub line_width: f32,
}

/// World -> pixel -> clip mapping for one frame.
///
/// Clip space here is the aspect-preserving square space: the longer surface side
/// spans `[-1, 1]`, the shorter one is scaled down proportionally and centered.
/// Y is flipped (pixel +Y down, clip +Y up).
#[derive(Clone, Copy)]
pub struct CoordinateTransform<'a> {
    mapping: &'a dyn PixelMapping,
    params: FrameParams,
}

impl<'a> CoordinateTransform<'a> {
    pub fn new(mapping: &'a dyn PixelMapping, params: FrameParams) -> Self {
        Self { mapping, params }
    }

    #[inline]
    pub fn params(&self) -> FrameParams {
        self.params
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.params.viewport
    }

    #[inline]
    pub fn pixel_to_clip_x(&self, px: f32) -> f32 {
        let vp = self.params.viewport;
        (2.0 * px / vp.scale() - 1.0) + vp.offset_x()
    }

    #[inline]
    pub fn pixel_to_clip_y(&self, py: f32) -> f32 {
        let vp = self.params.viewport;
        -((2.0 * py / vp.scale() - 1.0) + vp.offset_y())
    }

    #[inline]
    pub fn clip_to_pixel_x(&self, cx: f32) -> f32 {
        let vp = self.params.viewport;
        (cx - vp.offset_x() + 1.0) * vp.scale() / 2.0
    }

    #[inline]
    pub fn clip_to_pixel_y(&self, cy: f32) -> f32 {
        let vp = self.params.viewport;
        (-cy - vp.offset_y() + 1.0) * vp.scale() / 2.0
    }

    #[inline]
    pub fn world_to_pixel_x(&self, x: f32) -> f32 {
        self.mapping.world_to_pixel_x(x)
    }

    #[inline]
    pub fn world_to_pixel_y(&self, y: f32) -> f32 {
        self.mapping.world_to_pixel_y(y)
    }

    #[inline]
    pub fn world_to_clip_x(&self, x: f32) -> f32 {
        self.pixel_to_clip_x(self.mapping.world_to_pixel_x(x))
    }

    #[inline]
    pub fn world_to_clip_y(&self, y: f32) -> f32 {
        self.pixel_to_clip_y(self.mapping.world_to_pixel_y(y))
    }

    #[inline]
    pub fn clip_to_world_x(&self, cx: f32) -> f32 {
        self.mapping.pixel_to_world_x(self.clip_to_pixel_x(cx))
    }

    #[inline]
    pub fn clip_to_world_y(&self, cy: f32) -> f32 {
        self.mapping.pixel_to_world_y(self.clip_to_pixel_y(cy))
    }

    /// Horizontal world length expressed in pixels.
    #[inline]
    pub fn world_length_to_pixels(&self, len: f32) -> f32 {
        self.mapping.world_to_pixel_x(len) - self.mapping.world_to_pixel_x(0.0)
    }

    /// Horizontal world length expressed in clip units.
    #[inline]
    pub fn world_length_to_clip(&self, len: f32) -> f32 {
        self.world_to_clip_x(len) - self.world_to_clip_x(0.0)
    }

    /// Half-width in clip units of a stroke `width_px` pixels wide.
    ///
    /// Always measured against the frame height, whatever the orientation.
    #[inline]
    pub fn stroke_half_width_clip(&self, width_px: f32) -> f32 {
        width_px / self.params.viewport.height
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// World units map 1:1 to pixels.
    pub(crate) struct IdentityMapping;

    impl PixelMapping for IdentityMapping {
        fn world_to_pixel_x(&self, x: f32) -> f32 { x }
        fn world_to_pixel_y(&self, y: f32) -> f32 { y }
        fn pixel_to_world_x(&self, px: f32) -> f32 { px }
        fn pixel_to_world_y(&self, py: f32) -> f32 { py }
    }

    /// Scaled and translated mapping, closer to a real simulation view.
    struct AffineMapping {
        scale: f32,
        origin_x: f32,
        origin_y: f32,
    }

    impl PixelMapping for AffineMapping {
        fn world_to_pixel_x(&self, x: f32) -> f32 { (x - self.origin_x) * self.scale }
        fn world_to_pixel_y(&self, y: f32) -> f32 { (self.origin_y - y) * self.scale }
        fn pixel_to_world_x(&self, px: f32) -> f32 { px / self.scale + self.origin_x }
        fn pixel_to_world_y(&self, py: f32) -> f32 { self.origin_y - py / self.scale }
    }

    pub(crate) fn params(w: f32, h: f32, line_width: f32) -> FrameParams {
        FrameParams { viewport: Viewport::new(w, h), line_width }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn longer_axis_spans_full_clip_range() {
        let t = CoordinateTransform::new(&IdentityMapping, params(600.0, 800.0, 1.0));
        assert!(close(t.pixel_to_clip_y(0.0), 1.0));
        assert!(close(t.pixel_to_clip_y(800.0), -1.0));
        // Short axis: centered, spanning 600/800 of the range.
        assert!(close(t.pixel_to_clip_x(0.0), -0.75));
        assert!(close(t.pixel_to_clip_x(600.0), 0.75));
        assert!(close(t.pixel_to_clip_x(300.0), 0.0));
    }

    #[test]
    fn portrait_horizontal_line_keeps_equal_y() {
        let t = CoordinateTransform::new(&IdentityMapping, params(600.0, 800.0, 1.0));
        let y1 = t.world_to_clip_y(100.0);
        let y2 = t.world_to_clip_y(100.0);
        assert_eq!(y1, y2);
        assert!((t.viewport().offset_x() - (1.0 - 600.0 / 800.0)).abs() < 1e-6);
        // x = (2 * 100 / 800 - 1) + 0.25
        assert!(close(t.world_to_clip_x(100.0), -0.5));
        assert!(close(t.world_to_clip_x(200.0), -0.25));
    }

    #[test]
    fn world_clip_round_trip() {
        let mapping = AffineMapping { scale: 37.5, origin_x: -2.0, origin_y: 21.0 };
        for (w, h) in [(600.0, 800.0), (1920.0, 1080.0), (512.0, 512.0)] {
            let t = CoordinateTransform::new(&mapping, params(w, h, 2.0));
            for &(x, y) in &[(0.0, 0.0), (3.25, 7.5), (-1.5, 19.0), (12.0, 0.125)] {
                let cx = t.world_to_clip_x(x);
                let cy = t.world_to_clip_y(y);
                assert!(close(t.clip_to_world_x(cx), x), "x {x} via {cx} at {w}x{h}");
                assert!(close(t.clip_to_world_y(cy), y), "y {y} via {cy} at {w}x{h}");
            }
        }
    }

    #[test]
    fn stroke_width_is_relative_to_height() {
        let t = CoordinateTransform::new(&IdentityMapping, params(1000.0, 500.0, 1.0));
        assert!(close(t.stroke_half_width_clip(5.0), 0.01));
    }
}
