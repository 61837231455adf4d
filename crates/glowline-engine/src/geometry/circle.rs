use crate::coords::{CoordinateTransform, Vec2};
use crate::paint::Color;

use super::{CircleVertex, GeometryBatch};

/// Appends a filled circle as one screen-aligned quad sized to `aa_radius`.
///
/// The fragment stage makes the circle: opaque inside `core_radius`, fading
/// linearly (in squared pixel distance) to transparent at `aa_radius`. Both radii
/// are world units.
pub fn add_filled_circle(
    batch: &mut GeometryBatch<CircleVertex>,
    transform: &CoordinateTransform<'_>,
    center: Vec2,
    core_radius: f32,
    aa_radius: f32,
    color: Color,
) {
    batch.ensure_capacity(4, 6);

    let cx = transform.world_to_clip_x(center.x);
    let cy = transform.world_to_clip_y(center.y);
    let r = transform.world_length_to_clip(aa_radius);

    let center_px = [transform.world_to_pixel_x(center.x), transform.world_to_pixel_y(center.y)];
    let core_px = transform.world_length_to_pixels(core_radius);
    let outer_px = transform.world_length_to_pixels(aa_radius);

    let vertex = |x: f32, y: f32| CircleVertex {
        position: [x, y, 0.0],
        color: color.to_rgba_bytes(),
        center_px,
        core_radius_sq: core_px * core_px,
        outer_radius_sq: outer_px * outer_px,
    };

    let base = batch.base_index();
    batch.push_vertex(vertex(cx - r, cy - r));
    batch.push_vertex(vertex(cx + r, cy - r));
    batch.push_vertex(vertex(cx - r, cy + r));
    batch.push_vertex(vertex(cx + r, cy + r));

    batch.push_triangle(base, base + 1, base + 2);
    batch.push_triangle(base + 1, base + 2, base + 3);
}
