//! Collision primitives for axis-aligned geometry
//!
//! Everything on the field is a circle (the ball) or a center-anchored
//! rectangle (paddle, obstacles), so a handful of clamps covers it.

use glam::Vec2;

use crate::constrain;

/// Closest point on a center-anchored rectangle to `point`
#[inline]
pub fn closest_point_on_rect(point: Vec2, center: Vec2, size: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        constrain(point.x, center.x - half.x, center.x + half.x),
        constrain(point.y, center.y - half.y, center.y + half.y),
    )
}

/// Distance from a circle center to the nearest point of a rectangle.
///
/// Zero when the center lies inside the rectangle.
#[inline]
pub fn circle_rect_distance(circle: Vec2, center: Vec2, size: Vec2) -> f32 {
    circle.distance(closest_point_on_rect(circle, center, size))
}

/// Check if a circle overlaps a rectangle (strictly closer than its radius)
#[inline]
pub fn circle_hits_rect(circle: Vec2, radius: f32, center: Vec2, size: Vec2) -> bool {
    circle_rect_distance(circle, center, size) < radius
}

/// Axis-aligned proximity test used for obstacle placement.
///
/// Two rectangles are "too close" when their centers are nearer than the
/// summed extents divided by `divisor` on BOTH axes.
#[inline]
pub fn too_close(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2, divisor: f32) -> bool {
    let delta = (a_center - b_center).abs();
    let limit = (a_size + b_size) / divisor;
    delta.x < limit.x && delta.y < limit.y
}

/// Where along a span a point sits: -1 at the left edge, 0 at the center,
/// +1 at the right edge. Not clamped.
#[inline]
pub fn span_offset(x: f32, center_x: f32, width: f32) -> f32 {
    (x - center_x) / (width / 2.0)
}
