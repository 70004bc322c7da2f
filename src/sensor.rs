//! The ray-cast distance sensor carried by a vehicle.

use crate::math::{heading_vector, lerp, Intersection, LineSegment2d, Point2d, Polygon};
use smallvec::SmallVec;

/// Number of rays in the default fan.
const RAY_COUNT: usize = 5;

/// Reach of each ray in world units.
const RAY_LENGTH: f64 = 150.0;

/// Total angle covered by the default fan, in radians.
const RAY_SPREAD: f64 = std::f64::consts::FRAC_PI_2;

/// A fan of distance-measuring rays.
///
/// Rays are recast every frame from the owner's position and heading, and
/// each produces at most one reading: the nearest intersection with a road
/// border or another vehicle's hull within the ray's length.
#[derive(Clone, Debug)]
pub struct Sensor {
    /// Number of rays in the fan.
    ray_count: usize,
    /// Reach of each ray in world units.
    ray_length: f64,
    /// Total angle covered by the fan in radians.
    ray_spread: f64,
    /// The rays cast on the last update.
    rays: SmallVec<[LineSegment2d; RAY_COUNT]>,
    /// The reading of each ray, `None` where nothing was hit.
    readings: SmallVec<[Option<Intersection>; RAY_COUNT]>,
}

impl Default for Sensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensor {
    /// Creates a sensor with the default ray layout.
    pub fn new() -> Self {
        Self::with_layout(RAY_COUNT, RAY_LENGTH, RAY_SPREAD)
    }

    /// Creates a sensor with a custom ray layout.
    ///
    /// # Panics
    /// Panics if `ray_count` is zero.
    pub fn with_layout(ray_count: usize, ray_length: f64, ray_spread: f64) -> Self {
        assert!(ray_count >= 1, "Sensor must cast at least one ray");
        Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: SmallVec::new(),
            // All-`None` readings until the first update, so the proximity
            // vector has its full length from the very first frame.
            readings: SmallVec::from_elem(None, ray_count),
        }
    }

    /// The number of rays in the fan, and so the length of
    /// [readings](Self::readings) and [proximities](Self::proximities).
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// The rays cast on the last update.
    pub fn rays(&self) -> &[LineSegment2d] {
        &self.rays
    }

    /// The latest reading of each ray; `None` where the ray hit nothing
    /// within its length.
    pub fn readings(&self) -> &[Option<Intersection>] {
        &self.readings
    }

    /// Per-ray proximity of the latest readings: `1 - offset` of the hit,
    /// or zero for an unobstructed ray. Larger values mean closer obstacles.
    pub fn proximities(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings
            .iter()
            .map(|reading| reading.map_or(0.0, |hit| 1.0 - hit.offset))
    }

    /// Recasts the rays from the given position and heading, then reads
    /// each one against the road borders and the other vehicles' hulls.
    ///
    /// Empty borders and hulls are fine; every reading is then `None`.
    pub fn update(
        &mut self,
        position: Point2d,
        angle: f64,
        borders: &[LineSegment2d],
        hulls: &[&Polygon],
    ) {
        self.cast_rays(position, angle);
        self.readings = self
            .rays
            .iter()
            .map(|ray| Self::read_ray(ray, borders, hulls))
            .collect();
    }

    /// Fans the rays symmetrically around the owner's heading.
    fn cast_rays(&mut self, position: Point2d, angle: f64) {
        self.rays.clear();
        for i in 0..self.ray_count {
            let t = if self.ray_count == 1 {
                0.5
            } else {
                i as f64 / (self.ray_count - 1) as f64
            };
            let ray_angle = lerp(0.5 * self.ray_spread, -0.5 * self.ray_spread, t) + angle;
            let end = position + self.ray_length * heading_vector(ray_angle);
            self.rays.push(LineSegment2d::from_ends(position, end));
        }
    }

    /// Finds the nearest hit along a ray, or `None` if it is unobstructed.
    /// On exactly equal offsets the first candidate wins.
    fn read_ray(
        ray: &LineSegment2d,
        borders: &[LineSegment2d],
        hulls: &[&Polygon],
    ) -> Option<Intersection> {
        let border_hits = borders.iter().filter_map(|border| ray.intersection(border));
        let hull_hits = hulls
            .iter()
            .flat_map(|hull| hull.edges().filter_map(|edge| ray.intersection(&edge)));
        border_hits
            .chain(hull_hits)
            .min_by(|a, b| a.offset.total_cmp(&b.offset))
    }
}
