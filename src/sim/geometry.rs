//! Circle geometry helpers shared by the collision resolver and the AI

use glam::Vec2;

use crate::consts::DIVISOR_EPSILON;

/// Whether two circles interpenetrate (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Penetration depth of two circles given their centre distance (0 when apart)
#[inline]
pub fn overlap_depth(distance: f32, a_radius: f32, b_radius: f32) -> f32 {
    (a_radius + b_radius - distance).max(0.0)
}

/// Unit vector from `from` toward `to` plus the distance between them.
///
/// Returns `None` for coincident centres, where no direction is defined.
pub fn contact_normal(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let distance = delta.length();
    if distance < DIVISOR_EPSILON {
        return None;
    }
    Some((delta / distance, distance))
}

/// Reflect a coordinate back into `[lo, hi]` as if it bounced off both ends.
///
/// Used to fold straight-line predictions through wall rebounds.
pub fn fold_into_range(value: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span <= DIVISOR_EPSILON || !value.is_finite() {
        return value.clamp(lo, hi.max(lo));
    }
    let period = span * 2.0;
    let offset = (value - lo).rem_euclid(period);
    if offset <= span {
        lo + offset
    } else {
        lo + period - offset
    }
}

/// Shortest distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DIVISOR_EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
