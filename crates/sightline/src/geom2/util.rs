use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::types::Point;

/// z-component of `a × b`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Bearing of `p` seen from `origin`, in `(-π, π]`.
#[inline]
pub fn bearing(origin: Point, p: Point) -> f64 {
    (p.y - origin.y).atan2(p.x - origin.x)
}

/// Bearing of `p` seen from the coordinate origin.
#[inline]
pub fn angle_from_origin(p: Point) -> f64 {
    p.y.atan2(p.x)
}

/// Unit vector at `angle`.
#[inline]
pub fn unit(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Map to `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Map to `(-π, π]`.
pub fn wrap_pi(angle: f64) -> f64 {
    let r = normalize_angle(angle);
    if r > PI {
        r - TAU
    } else {
        r
    }
}
