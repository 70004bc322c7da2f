//! A straight multi-lane road: lane geometry and collidable borders.

use crate::math::{lerp, LineSegment2d, Point2d};

/// How far the borders extend either side of the origin. Large enough that
/// no vehicle reaches an end within a simulation's lifetime.
const HALF_LENGTH: f64 = 1_000_000.0;

/// A straight vertical road divided into equal-width lanes.
///
/// The road itself is only input geometry: its two borders are handed to a
/// [Simulation](crate::Simulation), and its lane centres are convenient
/// spawn positions. The simulation core knows nothing about roads.
#[derive(Clone, Copy, Debug)]
pub struct Road {
    /// The x coordinate of the left edge.
    left: f64,
    /// The x coordinate of the right edge.
    right: f64,
    /// The number of lanes.
    lane_count: usize,
}

impl Road {
    /// Creates a road centred on `centre_x` with the given total width.
    pub fn new(centre_x: f64, width: f64, lane_count: usize) -> Self {
        assert!(lane_count >= 1, "Road must have at least one lane");
        Self {
            left: centre_x - 0.5 * width,
            right: centre_x + 0.5 * width,
            lane_count,
        }
    }

    /// The number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// The x coordinate of the centre of the given lane, counted from the
    /// left. Indices past the last lane clamp to the last lane.
    pub fn lane_center(&self, lane: usize) -> f64 {
        let lane = lane.min(self.lane_count - 1);
        let t = (lane as f64 + 0.5) / self.lane_count as f64;
        lerp(self.left, self.right, t)
    }

    /// The left and right border segments of the road.
    pub fn borders(&self) -> [LineSegment2d; 2] {
        let edge = |x: f64| {
            LineSegment2d::from_ends(
                Point2d::new(x, -HALF_LENGTH),
                Point2d::new(x, HALF_LENGTH),
            )
        };
        [edge(self.left), edge(self.right)]
    }
}
