//! Circle and rectangle overlap primitives. Pure functions, no state.

use glam::DVec2;

use crate::types::Position;

/// Do two circles overlap?
pub fn circles_overlap(a: Position, ra: f64, b: Position, rb: f64) -> bool {
    let r = ra + rb;
    a.0.distance_squared(b.0) <= r * r
}

/// Does a circle overlap an axis-aligned rectangle given by center and
/// half-extents? Uses the closest-point-on-rect test.
pub fn circle_rect_overlap(c: Position, r: f64, center: Position, half: DVec2) -> bool {
    let closest = (c.0 - center.0).clamp(-half, half) + center.0;
    c.0.distance_squared(closest) <= r * r
}

/// Is a point inside a circle?
pub fn point_in_circle(p: Position, center: Position, radius: f64) -> bool {
    p.0.distance_squared(center.0) <= radius * radius
}

/// Angular offsets for `count` shots spread evenly across `arc` radians,
/// centered on the aim direction. A single shot gets no offset.
pub fn spread_offsets(count: u32, arc: f64) -> Vec<f64> {
    if count <= 1 || arc <= 0.0 {
        return vec![0.0; count as usize];
    }
    let step = arc / (count - 1) as f64;
    (0..count).map(|i| -arc / 2.0 + step * i as f64).collect()
}
