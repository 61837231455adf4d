/// Drawable surface size in pixels, snapshotted once per frame.
///
/// The longer side defines the aspect-preserving `scale`: it spans the full
/// `[-1, 1]` range while the shorter side is compressed and centered.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Length of the longer side in pixels.
    #[inline]
    pub fn scale(self) -> f32 {
        self.width.max(self.height)
    }

    /// Centering offset applied to the horizontal axis (`0` when width is the longer side).
    #[inline]
    pub fn offset_x(self) -> f32 {
        1.0 - self.width / self.scale()
    }

    /// Centering offset applied to the vertical axis (`0` when height is the longer side).
    #[inline]
    pub fn offset_y(self) -> f32 {
        1.0 - self.height / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_offsets_center_the_short_axis() {
        let vp = Viewport::new(600.0, 800.0);
        assert_eq!(vp.scale(), 800.0);
        assert!((vp.offset_x() - (1.0 - 600.0 / 800.0)).abs() < 1e-6);
        assert_eq!(vp.offset_y(), 0.0);
    }

    #[test]
    fn landscape_offsets_center_the_short_axis() {
        let vp = Viewport::new(1000.0, 500.0);
        assert_eq!(vp.scale(), 1000.0);
        assert_eq!(vp.offset_x(), 0.0);
        assert!((vp.offset_y() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
