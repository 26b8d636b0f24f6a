//! Scene space to surface space projection
//!
//! Scene space is center-origin and resolution independent. Surface space is
//! the host's CSS pixels with the origin at the top-left corner. One scene
//! unit is `1 / ratio` surface pixels, so scenes look the same on any display
//! once the backing store is scaled by `ratio`.

use glam::DVec2;

use crate::deg_to_rad;
use crate::scene::{Entity, Shape};

/// Surface size as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// CSS pixels
    pub width: f64,
    /// CSS pixels
    pub height: f64,
    /// Device pixel ratio
    pub ratio: f64,
}

impl Dimensions {
    /// A missing or nonsense device pixel ratio falls back to 1
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ratio,
        }
    }

    /// Surface center in CSS pixels
    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Backing store resolution in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.ratio).round() as u32,
            (self.height * self.ratio).round() as u32,
        )
    }

    /// Map a scene point to surface CSS pixels
    #[inline]
    pub fn scene_to_surface(&self, point: DVec2) -> DVec2 {
        self.center() + point / self.ratio
    }

    /// Map a surface point (CSS pixels, top-left origin) back to scene space
    #[inline]
    pub fn surface_to_scene(&self, point: DVec2) -> DVec2 {
        (point - self.center()) * self.ratio
    }
}

/// Rotate `point` about `pivot` by `degrees`, clockwise-positive in y-down space
#[inline]
pub fn rotate_about(point: DVec2, pivot: DVec2, degrees: f64) -> DVec2 {
    pivot + DVec2::from_angle(deg_to_rad(degrees)).rotate(point - pivot)
}

/// Where and how to draw one entity on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    /// Center in surface CSS pixels
    pub center: DVec2,
    /// Unrotated size in surface CSS pixels
    pub size: DVec2,
    /// Clockwise rotation about `center` (radians)
    pub rotation: f64,
}

impl RenderTransform {
    pub fn for_entity(entity: &Entity, dims: &Dimensions) -> Self {
        Self {
            center: dims.scene_to_surface(entity.center()),
            size: entity.size() / dims.ratio,
            rotation: deg_to_rad(entity.rotation()),
        }
    }

    /// Top-left corner of the unrotated rectangle
    pub fn origin(&self) -> DVec2 {
        self.center - self.size / 2.0
    }

    /// Corners after rotation: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [DVec2; 4] {
        let half = self.size / 2.0;
        let rot = DVec2::from_angle(self.rotation);
        [
            DVec2::new(-half.x, -half.y),
            DVec2::new(half.x, -half.y),
            DVec2::new(half.x, half.y),
            DVec2::new(-half.x, half.y),
        ]
        .map(|corner| self.center + rot.rotate(corner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityId, Rectangle};

    fn rect(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Entity {
        Entity::Rectangle(Rectangle {
            id: EntityId::from("r"),
            x,
            y,
            width,
            height,
            color: "red".into(),
            rotation,
        })
    }

    fn approx(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_bad_ratio_falls_back_to_one() {
        assert_eq!(Dimensions::new(10.0, 10.0, 0.0).ratio, 1.0);
        assert_eq!(Dimensions::new(10.0, 10.0, f64::NAN).ratio, 1.0);
        assert_eq!(Dimensions::new(10.0, 10.0, 2.0).ratio, 2.0);
    }

    #[test]
    fn test_backing_size_scales_by_ratio() {
        assert_eq!(Dimensions::new(800.0, 600.0, 2.0).backing_size(), (1600, 1200));
        assert_eq!(Dimensions::new(100.5, 10.0, 1.5).backing_size(), (151, 15));
    }

    #[test]
    fn test_scene_origin_is_surface_center() {
        let dims = Dimensions::new(800.0, 600.0, 2.0);
        assert!(approx(dims.scene_to_surface(DVec2::ZERO), DVec2::new(400.0, 300.0)));
        assert!(approx(dims.scene_to_surface(DVec2::new(100.0, -50.0)), DVec2::new(450.0, 275.0)));
    }

    #[test]
    fn test_surface_to_scene_inverts() {
        let dims = Dimensions::new(1024.0, 768.0, 1.25);
        let p = DVec2::new(-321.0, 77.5);
        assert!(approx(dims.surface_to_scene(dims.scene_to_surface(p)), p));
    }

    #[test]
    fn test_rotate_about_is_clockwise_in_y_down() {
        // +x rotated 90° lands on +y (down the screen)
        let p = rotate_about(DVec2::new(1.0, 0.0), DVec2::ZERO, 90.0);
        assert!(approx(p, DVec2::new(0.0, 1.0)));

        let p = rotate_about(DVec2::new(12.0, 5.0), DVec2::new(10.0, 5.0), 180.0);
        assert!(approx(p, DVec2::new(8.0, 5.0)));
    }

    #[test]
    fn test_render_transform_divides_by_ratio() {
        let dims = Dimensions::new(800.0, 600.0, 2.0);
        let t = RenderTransform::for_entity(&rect(200.0, 100.0, 200.0, 100.0, 90.0), &dims);
        assert!(approx(t.center, DVec2::new(500.0, 350.0)));
        assert!(approx(t.size, DVec2::new(100.0, 50.0)));
        assert!((t.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(approx(t.origin(), DVec2::new(450.0, 325.0)));
    }

    #[test]
    fn test_corners_follow_rotation() {
        let dims = Dimensions::new(200.0, 200.0, 1.0);
        let t = RenderTransform::for_entity(&rect(0.0, 0.0, 40.0, 20.0, 90.0), &dims);
        let [tl, tr, br, bl] = t.corners();
        // A 90° turn swaps the footprint to 20 wide, 40 tall
        assert!(approx(tl, DVec2::new(110.0, 80.0)));
        assert!(approx(tr, DVec2::new(110.0, 120.0)));
        assert!(approx(br, DVec2::new(90.0, 120.0)));
        assert!(approx(bl, DVec2::new(90.0, 80.0)));
    }
}
