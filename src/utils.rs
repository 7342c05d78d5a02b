//! Convenience functions and utilities for pupilgen.

use crate::geometry::Vec2D;
use std::f64::consts::TAU;

/// Angles of `n` directions spaced by `360/n` degrees with rotational
/// symmetry about the optical axis, starting at `start_angle` (radians).
/// ```
/// let angles: Vec<f64> = pupilgen::symmetric_angles(4, 0.0).collect();
/// assert_eq!(angles[2], std::f64::consts::PI);
/// ```
pub fn symmetric_angles(n: u32, start_angle: f64) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| start_angle + TAU * f64::from(i) / f64::from(n))
}

/// Positions of `n` points on a circle of `radius`, one at each of the
/// [symmetric_angles].
pub fn polar_positions(n: u32, radius: f64, start_angle: f64) -> Vec<Vec2D> {
    symmetric_angles(n, start_angle)
    .map(|theta| Vec2D::from_polar(radius, theta))
    .collect()
}
