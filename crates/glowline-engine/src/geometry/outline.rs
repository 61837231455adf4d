use crate::coords::{CoordinateTransform, Vec2};
use crate::paint::Color;

use super::{GeometryBatch, LineVertex, TrigTable};

/// Appends a ring stroke approximated by a closed N-gon.
///
/// N is the smallest trig table size `>= min_sides` (exactly `min_sides` above the
/// largest table entry). Vertex indices relative to the batch base:
///
/// ```text
/// 2n+1 -- 2n+3 -- ... -- 4n-1    outer fade  (aa only)
///    1 --    3 -- ... -- 2n-1    core outer
///    0 --    2 -- ... -- 2n-2    core inner
///   2n -- 2n+2 -- ... -- 4n-2    inner fade  (aa only)
/// ```
///
/// The last side of every ring wraps to that ring's first pair, addressed from
/// the batch base rather than the loop index.
///
/// Returns the number of sides used.
#[allow(clippy::too_many_arguments)]
pub fn add_polygon_outline(
    batch: &mut GeometryBatch<LineVertex>,
    transform: &CoordinateTransform<'_>,
    trig: &TrigTable,
    center: Vec2,
    radius: f32,
    min_sides: u32,
    core_width_px: f32,
    aa_width_px: f32,
    color: Color,
) -> u32 {
    let values = trig.values_with_size_at_least(min_sides);
    let sides = values.len();
    if sides == 0 {
        return 0;
    }

    let use_aa = aa_width_px > core_width_px;
    let vertex_count = sides * if use_aa { 4 } else { 2 };
    let index_count = sides * if use_aa { 18 } else { 6 };
    batch.ensure_capacity(vertex_count, index_count);

    let cx = transform.world_to_clip_x(center.x);
    let cy = transform.world_to_clip_y(center.y);
    let r = transform.world_length_to_clip(radius);
    let start = batch.base_index();
    let n = sides as u32;

    let push_ring = |batch: &mut GeometryBatch<LineVertex>, half_width: f32, rgba: [u8; 4]| {
        let (inner, outer) = (r - half_width, r + half_width);
        for i in 0..sides {
            let (c, s) = (values.cos_at(i), values.sin_at(i));
            batch.push_vertex(LineVertex::new(cx + inner * c, cy + inner * s, rgba));
            batch.push_vertex(LineVertex::new(cx + outer * c, cy + outer * s, rgba));
        }
    };

    push_ring(batch, transform.stroke_half_width_clip(core_width_px), color.to_rgba_bytes());
    for i in 0..n {
        let a = start + 2 * i;
        let next = if i + 1 < n { a + 2 } else { start };
        batch.push_triangle(a, a + 1, next);
        batch.push_triangle(a + 1, next, next + 1);
    }

    if !use_aa {
        return n;
    }

    push_ring(
        batch,
        transform.stroke_half_width_clip(aa_width_px),
        color.with_alpha(0).to_rgba_bytes(),
    );
    let fade_start = start + 2 * n;
    for i in 0..n {
        let core = start + 2 * i;
        let fade = fade_start + 2 * i;
        let (core_next, fade_next) = if i + 1 < n { (core + 2, fade + 2) } else { (start, fade_start) };

        // inner fade ring to core inner edge
        batch.push_triangle(fade, core, fade_next);
        batch.push_triangle(core, fade_next, core_next);
        // outer fade ring to core outer edge
        batch.push_triangle(fade + 1, core + 1, fade_next + 1);
        batch.push_triangle(core + 1, fade_next + 1, core_next + 1);
    }

    n
}

/// Minimum polygon sides for an outline of `radius_px` pixels.
///
/// Up to 64 sides below 256 px; beyond that one side per pixel of radius.
#[inline]
pub fn outline_min_sides(radius_px: u32, max_sides: u32, exact_from_px: u32) -> u32 {
    if radius_px < exact_from_px { radius_px.min(max_sides) } else { radius_px }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{test_params, IdentityMapping};
    use crate::geometry::add_line;

    fn transform_params() -> crate::coords::FrameParams {
        test_params(600.0, 800.0, 2.0)
    }

    fn square_table() -> TrigTable {
        TrigTable::new(&[4, 16])
    }

    #[test]
    fn square_core_ring_indices_stay_in_ring_and_wrap_to_base() {
        let t = CoordinateTransform::new(&IdentityMapping, transform_params());
        let trig = square_table();
        let mut b = GeometryBatch::with_capacity("lines", 4, 6);
        add_line(&mut b, &t, Vec2::new(0.0, 0.0), Vec2::new(9.0, 9.0), 2.0, 0.0, Color::WHITE);
        let prior = b.base_index();
        let i0 = b.index_count();

        let sides = add_polygon_outline(
            &mut b, &t, &trig, Vec2::new(300.0, 400.0), 50.0, 4, 2.0, 0.0, Color::WHITE,
        );
        assert_eq!(sides, 4);
        assert_eq!(b.vertex_count() as u32 - prior, 8);

        let emitted = &b.indices()[i0..];
        assert_eq!(emitted.len(), 24);
        assert!(emitted.iter().all(|&i| i >= prior && i <= prior + 7));

        let last_side = &emitted[18..];
        assert_eq!(last_side, &[prior + 6, prior + 7, prior, prior + 7, prior, prior + 1]);
    }

    #[test]
    fn aa_rings_wrap_independently() {
        let t = CoordinateTransform::new(&IdentityMapping, transform_params());
        let trig = square_table();
        let mut b = GeometryBatch::with_capacity("lines", 4, 6);
        add_line(&mut b, &t, Vec2::new(0.0, 0.0), Vec2::new(9.0, 9.0), 2.0, 0.0, Color::WHITE);
        let p = b.base_index();
        let i0 = b.index_count();

        add_polygon_outline(
            &mut b, &t, &trig, Vec2::new(300.0, 400.0), 50.0, 4, 3.0, 7.0, Color::WHITE,
        );
        assert_eq!(b.vertex_count() as u32 - p, 16);

        let emitted = &b.indices()[i0..];
        assert_eq!(emitted.len(), 4 * 18);
        assert!(emitted.iter().all(|&i| i >= p && i < p + 16));

        // Fade section starts after the 24 core indices; last side is the final 12.
        let last_fade = &emitted[emitted.len() - 12..];
        assert_eq!(
            last_fade,
            &[
                p + 14, p + 6, p + 8, p + 6, p + 8, p,
                p + 15, p + 7, p + 9, p + 7, p + 9, p + 1,
            ]
        );
    }

    #[test]
    fn fade_ring_is_transparent_and_wider() {
        let t = CoordinateTransform::new(&IdentityMapping, transform_params());
        let trig = square_table();
        let mut b = GeometryBatch::with_capacity("lines", 4, 6);
        let color = Color::from_rgb(255, 128, 0);
        add_polygon_outline(&mut b, &t, &trig, Vec2::new(300.0, 400.0), 50.0, 4, 3.0, 7.0, color);

        let v = b.vertices();
        assert!(v[..8].iter().all(|v| v.color == [255, 128, 0, 255]));
        assert!(v[8..].iter().all(|v| v.color == [255, 128, 0, 0]));

        let cx = t.world_to_clip_x(300.0);
        let dist = |v: &LineVertex| (v.position[0] - cx).abs();
        // i = 0 lies on +X: core inner/outer, then fade inner/outer.
        assert!(dist(&v[8]) < dist(&v[0]));
        assert!(dist(&v[9]) > dist(&v[1]));
    }

    #[test]
    fn side_count_falls_back_to_exact_request() {
        let t = CoordinateTransform::new(&IdentityMapping, transform_params());
        let trig = TrigTable::default();
        let mut b = GeometryBatch::with_capacity("lines", 4, 6);
        let sides = add_polygon_outline(
            &mut b, &t, &trig, Vec2::new(300.0, 400.0), 1000.0, 1000, 2.0, 0.0, Color::WHITE,
        );
        assert_eq!(sides, 1000);
        assert_eq!(b.vertex_count(), 2000);
        assert_eq!(b.index_count(), 6000);
    }

    #[test]
    fn min_sides_heuristic() {
        assert_eq!(outline_min_sides(1000, 64, 256), 1000);
        assert_eq!(outline_min_sides(50, 64, 256), 50);
        assert_eq!(outline_min_sides(200, 64, 256), 64);
        assert_eq!(outline_min_sides(256, 64, 256), 256);
    }
}
