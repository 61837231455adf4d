use std::f32::consts::FRAC_PI_2;

use crate::coords::{CoordinateTransform, Vec2};
use crate::paint::Color;

use super::{GeometryBatch, LineVertex};

/// Appends one stroked segment as a quad perpendicular to the segment direction.
///
/// Vertex layout relative to the batch base (`0..4` core, `4..8` fade):
///
/// ```text
/// 6--7   +aa
/// 2--3   +core
/// 0--1   -core
/// 4--5   -aa
/// ```
///
/// The fade quads are only emitted when `aa_width_px > core_width_px`; their outer
/// edge carries the same color with zero alpha.
pub fn add_line(
    batch: &mut GeometryBatch<LineVertex>,
    transform: &CoordinateTransform<'_>,
    from: Vec2,
    to: Vec2,
    core_width_px: f32,
    aa_width_px: f32,
    color: Color,
) {
    let use_aa = aa_width_px > core_width_px;
    let (vertex_count, index_count) = if use_aa { (8, 18) } else { (4, 6) };
    batch.ensure_capacity(vertex_count, index_count);

    let x1 = transform.world_to_clip_x(from.x);
    let y1 = transform.world_to_clip_y(from.y);
    let x2 = transform.world_to_clip_x(to.x);
    let y2 = transform.world_to_clip_y(to.y);

    let perp = (y2 - y1).atan2(x2 - x1) + FRAC_PI_2;
    let (sin_perp, cos_perp) = perp.sin_cos();

    let base = batch.base_index();
    let rgba = color.to_rgba_bytes();

    let core = transform.stroke_half_width_clip(core_width_px);
    let (dx, dy) = (core * cos_perp, core * sin_perp);
    batch.push_vertex(LineVertex::new(x1 - dx, y1 - dy, rgba));
    batch.push_vertex(LineVertex::new(x2 - dx, y2 - dy, rgba));
    batch.push_vertex(LineVertex::new(x1 + dx, y1 + dy, rgba));
    batch.push_vertex(LineVertex::new(x2 + dx, y2 + dy, rgba));

    batch.push_triangle(base, base + 1, base + 2);
    batch.push_triangle(base + 1, base + 2, base + 3);

    if !use_aa {
        return;
    }

    let faded = color.with_alpha(0).to_rgba_bytes();
    let aa = transform.stroke_half_width_clip(aa_width_px);
    let (dx, dy) = (aa * cos_perp, aa * sin_perp);
    batch.push_vertex(LineVertex::new(x1 - dx, y1 - dy, faded));
    batch.push_vertex(LineVertex::new(x2 - dx, y2 - dy, faded));
    batch.push_vertex(LineVertex::new(x1 + dx, y1 + dy, faded));
    batch.push_vertex(LineVertex::new(x2 + dx, y2 + dy, faded));

    // -core edge to -aa edge
    batch.push_triangle(base, base + 1, base + 4);
    batch.push_triangle(base + 1, base + 4, base + 5);
    // +core edge to +aa edge
    batch.push_triangle(base + 2, base + 3, base + 6);
    batch.push_triangle(base + 3, base + 6, base + 7);
}
