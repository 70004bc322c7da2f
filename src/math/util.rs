use super::Vector2d;

/// Linearly interpolates between `a` and `b`.
///
/// `t` is not clamped; callers pass `t` in `[0, 1]` for interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Unit vector for a heading angle. A heading of zero points towards
/// negative y, and positive headings turn the vector towards negative x.
///
/// Vehicle motion, hull corners and sensor rays must all map angles to
/// directions through this one function, or sensor readings drift out of
/// alignment with the direction of travel.
pub fn heading_vector(angle: f64) -> Vector2d {
    Vector2d::new(-angle.sin(), -angle.cos())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use cgmath::InnerSpace;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn lerp_endpoints() {
        assert_approx_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_approx_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_approx_eq!(lerp(2.0, 6.0, 0.25), 3.0);
        assert_approx_eq!(lerp(6.0, 2.0, 0.25), 5.0);
    }

    #[test]
    fn heading_zero_points_up() {
        let dir = heading_vector(0.0);
        assert_approx_eq!(dir.x, 0.0);
        assert_approx_eq!(dir.y, -1.0);
    }

    #[test]
    fn heading_vector_is_unit_length() {
        for i in 0..16 {
            let angle = i as f64 * FRAC_PI_2 / 4.0;
            assert_approx_eq!(heading_vector(angle).magnitude(), 1.0);
        }
    }
}
