//! Axis-aligned footprint of rotated rectangles

use glam::DVec2;

use crate::deg_to_rad;

/// Size of the axis-aligned box enclosing a `width` x `height` rectangle
/// turned by `degrees`
pub fn rotated_bounds(width: f64, height: f64, degrees: f64) -> DVec2 {
    let (sin, cos) = deg_to_rad(degrees).sin_cos();
    DVec2::new(
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}
