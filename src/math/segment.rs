use super::{lerp, Point2d, Vector2d};

/// A directed line segment in 2D space.
///
/// Used for road borders, polygon edges and sensor rays. The direction
/// matters: parametric offsets run from `start` (0) to `end` (1).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment2d {
    start: Point2d,
    end: Point2d,
}

/// A point where two segments cross.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    /// The point of intersection in world space.
    pub point: Point2d,
    /// The parametric position of the intersection along the first segment,
    /// in `[0, 1]`.
    pub offset: f64,
}

impl LineSegment2d {
    /// Creates a line segment from its two end points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }

    /// The start point of the segment.
    pub fn start(&self) -> Point2d {
        self.start
    }

    /// The end point of the segment.
    pub fn end(&self) -> Point2d {
        self.end
    }

    /// The vector from the start of the segment to its end.
    pub fn delta(&self) -> Vector2d {
        self.end - self.start
    }

    /// Samples the segment at parametric offset `t`.
    pub fn sample(&self, t: f64) -> Point2d {
        Point2d::new(
            lerp(self.start.x, self.end.x, t),
            lerp(self.start.y, self.end.y, t),
        )
    }

    /// Computes the intersection of two segments.
    ///
    /// Solves the standard parametric line equations; the segments intersect
    /// iff both parameters lie in `[0, 1]` inclusive, so touching end points
    /// count as hits. Parallel and collinear segments report no intersection,
    /// even where a collinear overlap exists.
    pub fn intersection(&self, other: &LineSegment2d) -> Option<Intersection> {
        let r = self.delta();
        let s = other.delta();

        let denom = r.perp_dot(s);
        if denom == 0.0 {
            return None;
        }

        let q = other.start - self.start;
        let t = q.perp_dot(s) / denom;
        let u = q.perp_dot(r) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(Intersection {
            point: self.sample(t),
            offset: t,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::Interval;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment2d {
        LineSegment2d::from_ends(Point2d::new(x1, y1), Point2d::new(x2, y2))
    }

    #[test]
    fn perpendicular_crossing() {
        let a = segment(0.0, 0.0, 10.0, 0.0);
        let b = segment(2.0, -5.0, 2.0, 5.0);
        let hit = a.intersection(&b).unwrap();
        assert_approx_eq!(hit.point.x, 2.0);
        assert_approx_eq!(hit.point.y, 0.0);
        assert_approx_eq!(hit.offset, 0.2);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = segment(0.0, 0.0, 10.0, 0.0);
        let b = segment(0.0, 1.0, 10.0, 1.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn collinear_overlap_does_not_intersect() {
        let a = segment(0.0, 0.0, 10.0, 0.0);
        let b = segment(5.0, 0.0, 15.0, 0.0);
        assert_eq!(a.intersection(&b), None);
        assert_eq!(a.intersection(&a), None);
    }

    #[test]
    fn touching_end_points_intersect() {
        let a = segment(0.0, 0.0, 10.0, 0.0);
        let b = segment(10.0, 0.0, 10.0, 5.0);
        let hit = a.intersection(&b).unwrap();
        assert_approx_eq!(hit.offset, 1.0);

        let c = segment(0.0, -5.0, 0.0, 5.0);
        let hit = a.intersection(&c).unwrap();
        assert_approx_eq!(hit.offset, 0.0);
    }

    #[test]
    fn crossing_beyond_either_segment_misses() {
        let a = segment(0.0, 0.0, 10.0, 0.0);
        // The infinite lines cross at (12, 0), past the end of `a`.
        let b = segment(12.0, -5.0, 12.0, 5.0);
        assert_eq!(a.intersection(&b), None);
        // The infinite lines cross at (2, 0), but `b` stops short of y = 0.
        let b = segment(2.0, -5.0, 2.0, -1.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn random_crossings_recover_the_shared_point() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Two roads diverged in a wood....");
        for _i in 0..100 {
            let p = Point2d::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let theta: f64 = rng.gen_range(0.0..std::f64::consts::PI);
            let phi = theta + rng.gen_range(0.3..std::f64::consts::PI - 0.3);
            let da = Vector2d::new(theta.cos(), theta.sin());
            let db = Vector2d::new(phi.cos(), phi.sin());

            let (back, ahead) = (rng.gen_range(0.5..10.0), rng.gen_range(0.5..10.0));
            let a = LineSegment2d::from_ends(p - back * da, p + ahead * da);
            let b = LineSegment2d::from_ends(p - rng.gen_range(0.5..10.0) * db, p + db);

            let hit = a.intersection(&b).unwrap();
            assert_approx_eq!(hit.point.x, p.x, 1e-6);
            assert_approx_eq!(hit.point.y, p.y, 1e-6);
            assert_approx_eq!(hit.offset, back / (back + ahead), 1e-6);
            assert!(Interval::new(0.0, 1.0).contains(hit.offset));
        }
    }
}
