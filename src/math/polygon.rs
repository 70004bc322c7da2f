use super::{LineSegment2d, Point2d};
use itertools::Itertools;
use smallvec::SmallVec;

/// A closed polygon with at least three points.
///
/// The edge from the last point back to the first is implicit. Vehicle
/// hulls produce their points in a consistent winding order, which the
/// edge pairing here relies on.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: SmallVec<[Point2d; 4]>,
}

impl Polygon {
    /// Creates a polygon from its corner points.
    ///
    /// # Panics
    /// Panics if fewer than three points are given.
    pub fn from_points(points: impl IntoIterator<Item = Point2d>) -> Self {
        let points: SmallVec<[Point2d; 4]> = points.into_iter().collect();
        assert!(
            points.len() >= 3,
            "Polygon must contain at least three points"
        );
        debug_assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        Self { points }
    }

    /// The corner points of the polygon.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Returns an iterator over the edges of the polygon,
    /// including the closing edge from the last point to the first.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment2d> + '_ {
        self.points
            .iter()
            .copied()
            .circular_tuple_windows()
            .map(|(a, b)| LineSegment2d::from_ends(a, b))
    }

    /// Returns true if any edge of this polygon intersects any edge of the
    /// other.
    ///
    /// A polygon entirely inside another shares no edge crossings and is
    /// not reported; vehicles collide at their hull boundaries before that
    /// can occur.
    pub fn intersects(&self, other: &Polygon) -> bool {
        self.edges()
            .any(|edge| other.edges().any(|e| edge.intersection(&e).is_some()))
    }

    /// Returns true if any edge of this polygon intersects the segment.
    pub fn intersects_segment(&self, segment: &LineSegment2d) -> bool {
        self.edges()
            .any(|edge| edge.intersection(segment).is_some())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Polygon {
        Polygon::from_points([
            Point2d::new(x1, y1),
            Point2d::new(x2, y1),
            Point2d::new(x2, y2),
            Point2d::new(x1, y2),
        ])
    }

    #[test]
    fn polygon_intersects_itself() {
        let poly = rectangle(0.0, 0.0, 10.0, 5.0);
        assert!(poly.intersects(&poly));
    }

    #[test]
    fn distant_rectangles_do_not_intersect() {
        let a = rectangle(0.0, 0.0, 10.0, 5.0);
        let b = rectangle(100.0, 100.0, 110.0, 105.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn overlapping_rectangles_intersect() {
        let a = rectangle(0.0, 0.0, 10.0, 5.0);
        let b = rectangle(8.0, -2.0, 18.0, 3.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn edge_count_includes_the_closing_edge() {
        let triangle = Polygon::from_points([
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(0.0, 3.0),
        ]);
        assert_eq!(triangle.edges().count(), 3);
        let rect = rectangle(0.0, 0.0, 1.0, 1.0);
        assert_eq!(rect.edges().count(), 4);
    }

    #[test]
    fn segment_through_polygon_intersects() {
        let poly = rectangle(0.0, 0.0, 10.0, 5.0);
        let through = LineSegment2d::from_ends(Point2d::new(-5.0, 2.0), Point2d::new(15.0, 2.0));
        assert!(poly.intersects_segment(&through));

        let outside = LineSegment2d::from_ends(Point2d::new(-5.0, 20.0), Point2d::new(15.0, 20.0));
        assert!(!poly.intersects_segment(&outside));
    }

    #[test]
    #[should_panic]
    fn two_points_are_rejected() {
        let _ = Polygon::from_points([Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)]);
    }
}
