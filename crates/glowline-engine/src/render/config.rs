use crate::paint::Color;

/// Renderer tuning.
///
/// Defaults reproduce the stock look: strokes of 5 px and up get a 2 px fade on
/// each side, filled circles of 10 px radius and up get a ~2 px soft edge.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Color the surface is cleared to every frame.
    pub clear_color: Color,

    /// Nominal line width (px) from which strokes are antialiased.
    pub line_aa_min_width: f32,

    /// Antialiased strokes use `width - inset` as core and `width + inset` as fade width.
    pub line_aa_inset: f32,

    /// Pixel radius from which filled circles get a fade band.
    pub circle_fade_min_radius: f32,

    /// Side cap for outlines below `outline_exact_radius_px`.
    pub outline_max_sides: u32,

    /// Pixel radius from which outlines use one side per pixel of radius.
    pub outline_exact_radius_px: u32,

    /// Side counts precomputed for outline approximation.
    pub trig_sizes: Vec<u32>,

    /// Initial `(vertices, indices)` capacity of the line batch.
    pub line_batch_capacity: (usize, usize),

    /// Initial `(vertices, indices)` capacity of the circle batch.
    pub circle_batch_capacity: (usize, usize),
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            line_aa_min_width: 5.0,
            line_aa_inset: 2.0,
            circle_fade_min_radius: 10.0,
            outline_max_sides: 64,
            outline_exact_radius_px: 256,
            trig_sizes: vec![16, 32, 64, 128],
            line_batch_capacity: (64, 64),
            circle_batch_capacity: (32, 64),
        }
    }
}
