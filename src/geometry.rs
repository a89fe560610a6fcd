// src/geometry.rs - 2D angle and distance primitives over landmark positions
use crate::landmark::LandmarkPoint;
use nalgebra::Vector2;

/// Angle in degrees at vertex `p2` between the rays toward `p1` and `p3`.
///
/// Only the (x, y) projection is used; `z` and `visibility` are ignored.
/// A zero-length ray (coincident points) yields the sentinel `0.0` rather
/// than an error, so a degenerate triple never produces a NaN reading.
pub fn angle(p1: &LandmarkPoint, p2: &LandmarkPoint, p3: &LandmarkPoint) -> f64 {
    let ba = Vector2::new(p1.x - p2.x, p1.y - p2.y);
    let bc = Vector2::new(p3.x - p2.x, p3.y - p2.y);

    let mag_ba = ba.norm();
    let mag_bc = bc.norm();
    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    // Clamp tolerates floating-point overshoot past the cosine domain.
    let cos_angle = (ba.dot(&bc) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Euclidean distance between two landmarks over (x, y) only.
pub fn distance(p1: &LandmarkPoint, p2: &LandmarkPoint) -> f64 {
    Vector2::new(p1.x - p2.x, p1.y - p2.y).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LandmarkPoint;

    fn point(x: f64, y: f64) -> LandmarkPoint {
        LandmarkPoint::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_straight_line_is_180() {
        let a = angle(&point(0.0, 0.0), &point(0.5, 0.0), &point(1.0, 0.0));
        assert!((a - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_right_angle_is_90() {
        let a = angle(&point(0.0, 0.0), &point(0.5, 0.0), &point(0.5, 0.5));
        assert!((a - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_folded_rays_are_0() {
        let a = angle(&point(1.0, 0.0), &point(0.0, 0.0), &point(1.0, 0.0));
        assert!(a.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_triple_returns_sentinel() {
        let p = point(0.3, 0.7);
        let a = angle(&p, &p, &p);
        assert_eq!(a, 0.0);
        assert!(!a.is_nan());
    }

    #[test]
    fn test_z_is_ignored() {
        let mut p1 = point(0.0, 0.0);
        let mut p3 = point(1.0, 0.0);
        p1.z = 5.0;
        p3.z = -5.0;
        let a = angle(&p1, &point(0.5, 0.0), &p3);
        assert!((a - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        let d = distance(&point(0.0, 0.0), &point(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_ignores_z() {
        let mut p = point(0.0, 0.0);
        p.z = 9.0;
        assert_eq!(distance(&p, &point(0.0, 0.0)), 0.0);
    }
}
