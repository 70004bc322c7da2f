//! A simulated vehicle: kinematics, hull geometry and damage.

use crate::controller::{ControlSignal, Controller};
use crate::math::{heading_vector, LineSegment2d, Point2d, Polygon};
use crate::sensor::Sensor;
use crate::util::Interval;
use crate::VehicleId;
use smallvec::SmallVec;

/// Speed gained per frame while a throttle channel is engaged.
const ACCELERATION: f64 = 0.2;

/// Speed bled off every frame by rolling friction. Speeds below this
/// snap to zero, so a coasting vehicle comes to an exact stop.
const FRICTION: f64 = 0.05;

/// Heading change per frame while a steering channel is engaged, in radians.
const STEER_RATE: f64 = 0.03;

/// A simulated vehicle.
pub struct Vehicle {
    /// The vehicle's ID.
    pub(crate) id: VehicleId,
    /// Hull width in world units.
    width: f64,
    /// Hull length in world units.
    height: f64,
    /// Top forward speed. Reverse is capped at half this.
    max_speed: f64,
    /// The centre of the vehicle in world space.
    position: Point2d,
    /// Heading in radians; zero faces negative y.
    angle: f64,
    /// Signed scalar speed; negative while reversing.
    speed: f64,
    /// Set when the hull strikes a border or another hull; never cleared.
    /// While set, motion and damage assessment are frozen.
    damaged: bool,
    /// The hull polygon for the current frame.
    hull: Polygon,
    /// The control signal applied during the current frame.
    controls: ControlSignal,
    /// The source of the control signal.
    controller: Controller,
    /// The distance sensor. Scripted traffic carries none.
    sensor: Option<Sensor>,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleAttributes {
    /// The hull width in world units.
    pub width: f64,
    /// The hull length in world units.
    pub height: f64,
    /// The top forward speed in units per frame.
    pub max_speed: f64,
}

impl Vehicle {
    /// Creates a new vehicle at the given position and heading.
    pub(crate) fn new(
        id: VehicleId,
        attributes: &VehicleAttributes,
        position: Point2d,
        angle: f64,
        controller: Controller,
    ) -> Self {
        debug_assert!(position.x.is_finite() && position.y.is_finite() && angle.is_finite());
        let sensor = match controller {
            Controller::Fixed(_) => None,
            _ => Some(Sensor::new()),
        };
        let hull = build_hull(position, angle, attributes.width, attributes.height);
        Self {
            id,
            width: attributes.width,
            height: attributes.height,
            max_speed: attributes.max_speed,
            position,
            angle,
            speed: 0.0,
            damaged: false,
            hull,
            controls: ControlSignal::NONE,
            controller,
            sensor,
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The hull width in world units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The hull length in world units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The coordinates of the centre of the vehicle in world space.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// The heading in radians; zero faces negative y.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The signed scalar speed in units per frame; negative while reversing.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The top forward speed in units per frame.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Whether the vehicle has struck a border or another vehicle.
    /// Damage is sticky: once set, the vehicle's motion is frozen for good.
    pub fn damaged(&self) -> bool {
        self.damaged
    }

    /// The hull polygon for the current frame.
    pub fn hull(&self) -> &Polygon {
        &self.hull
    }

    /// The control signal applied during the current frame.
    pub fn controls(&self) -> ControlSignal {
        self.controls
    }

    /// The vehicle's distance sensor, if it carries one.
    pub fn sensor(&self) -> Option<&Sensor> {
        self.sensor.as_ref()
    }

    pub(crate) fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Scales the top forward speed by the given factor.
    pub(crate) fn scale_max_speed(&mut self, factor: f64) {
        self.max_speed *= factor;
    }

    /// Asks the controller for this frame's control signal, feeding it the
    /// proximities of the previous frame's sensor readings.
    pub(crate) fn apply_controls(&mut self) -> ControlSignal {
        let proximity: SmallVec<[f64; 8]> = self
            .sensor
            .as_ref()
            .map(|sensor| sensor.proximities().collect())
            .unwrap_or_default();
        self.controls = self.controller.control(&proximity);
        self.controls
    }

    /// Integrates one frame of motion and rebuilds the hull.
    /// Does nothing once the vehicle is damaged.
    pub(crate) fn advance(&mut self) {
        if self.damaged {
            return;
        }
        self.integrate();
        self.hull = build_hull(self.position, self.angle, self.width, self.height);
    }

    /// Marks the vehicle damaged if its hull intersects any border or any
    /// other vehicle's hull. Already-damaged vehicles are left untouched.
    pub(crate) fn assess_damage(&mut self, borders: &[LineSegment2d], hulls: &[&Polygon]) {
        if self.damaged {
            return;
        }
        self.damaged = borders
            .iter()
            .any(|border| self.hull.intersects_segment(border))
            || hulls.iter().any(|hull| self.hull.intersects(hull));
    }

    /// Updates the sensor against the current world geometry.
    /// Sensing continues even after the vehicle is damaged.
    pub(crate) fn sense(&mut self, borders: &[LineSegment2d], hulls: &[&Polygon]) {
        if let Some(sensor) = &mut self.sensor {
            sensor.update(self.position, self.angle, borders, hulls);
        }
    }

    /// Applies throttle, friction and steering to the speed and heading,
    /// then moves the vehicle.
    fn integrate(&mut self) {
        if self.controls.forward {
            self.speed += ACCELERATION;
        }
        if self.controls.reverse {
            self.speed -= ACCELERATION;
        }

        // Reverse is capped at half the forward maximum.
        self.speed = Interval::new(-0.5 * self.max_speed, self.max_speed).clamp(self.speed);

        if self.speed > 0.0 {
            self.speed -= FRICTION;
        }
        if self.speed < 0.0 {
            self.speed += FRICTION;
        }
        if self.speed.abs() < FRICTION {
            self.speed = 0.0;
        }

        // Steering flips while reversing, as when backing up a real car.
        if self.speed != 0.0 {
            let flip = if self.speed > 0.0 { 1.0 } else { -1.0 };
            if self.controls.left {
                self.angle += STEER_RATE * flip;
            }
            if self.controls.right {
                self.angle -= STEER_RATE * flip;
            }
        }

        self.position += self.speed * heading_vector(self.angle);
    }
}

/// Builds the oriented rectangular hull centred on `position`.
///
/// The corners sit at the four diagonal angles of the rectangle, each a
/// half-diagonal away from the centre, and are generated in a fixed winding
/// order that the collision edge pairing relies on.
fn build_hull(position: Point2d, angle: f64, width: f64, height: f64) -> Polygon {
    let rad = f64::hypot(width, height) / 2.0;
    let alpha = f64::atan2(width, height);
    let corners = [
        angle - alpha,
        angle + alpha,
        std::f64::consts::PI + angle - alpha,
        std::f64::consts::PI + angle + alpha,
    ];
    Polygon::from_points(
        corners
            .into_iter()
            .map(|corner| position + rad * heading_vector(corner)),
    )
}
