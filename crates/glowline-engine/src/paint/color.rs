/// Packed 32-bit straight-alpha color, `0xAARRGGBB`.
///
/// This is the form simulation code hands to draw calls. Vertices carry the
/// color as `[u8; 4]` in R, G, B, A order (see [`Color::to_rgba_bytes`]), which is
/// what a `Unorm8x4` attribute reads regardless of host endianness.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::from_rgba(0, 0, 0, 0);

    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Opaque color.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same RGB with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00ff_ffff) | ((alpha as u32) << 24))
    }

    /// Vertex attribute form.
    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Normalized components for clear colors and other `f64` consumers.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.red() as f64 / 255.0,
            g: self.green() as f64 / 255.0,
            b: self.blue() as f64 / 255.0,
            a: self.alpha() as f64 / 255.0,
        }
    }
}
