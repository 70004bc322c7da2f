//! The world container and tick driver.

use crate::controller::{ControlSignal, Controller, InputEvent};
use crate::math::{LineSegment2d, Point2d, Polygon};
use crate::vehicle::{Vehicle, VehicleAttributes};
use crate::{VehicleId, VehicleSet};
use rand_distr::Distribution;
use smallvec::SmallVec;

/// An observer invoked with each vehicle's control signal every frame.
type ControlObserver = Box<dyn FnMut(VehicleId, ControlSignal)>;

/// A driving simulation: static road borders and the vehicles moving
/// between them.
///
/// The simulation is single threaded and tick driven; one call to
/// [step](Self::step) completes a full frame for every vehicle before
/// returning.
#[derive(Default)]
pub struct Simulation {
    /// The border segments vehicles collide with.
    borders: Vec<LineSegment2d>,
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// The current frame of simulation.
    frame: usize,
    /// Optional observer of per-frame control signals.
    observer: Option<ControlObserver>,
    /// Draw primitives from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation with no borders and no vehicles.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a border segment to the world.
    pub fn add_border(&mut self, border: LineSegment2d) {
        self.borders.push(border);
    }

    /// Replaces the world's border segments.
    pub fn set_borders(&mut self, borders: Vec<LineSegment2d>) {
        self.borders = borders;
    }

    /// The border segments of the world.
    pub fn borders(&self) -> &[LineSegment2d] {
        &self.borders
    }

    /// Adds a vehicle to the simulation.
    ///
    /// Vehicles with a [fixed controller](Controller::Fixed) are scripted
    /// traffic and carry no sensor; all others sense the world every frame.
    pub fn add_vehicle(
        &mut self,
        attributes: &VehicleAttributes,
        position: Point2d,
        angle: f64,
        controller: Controller,
    ) -> VehicleId {
        self.vehicles
            .insert_with_key(|id| Vehicle::new(id, attributes, position, angle, controller))
    }

    /// Removes a vehicle from the simulation.
    pub fn remove_vehicle(&mut self, id: VehicleId) {
        self.vehicles.remove(id);
    }

    /// Gets a reference to the vehicle with the given ID.
    pub fn get_vehicle(&self, vehicle_id: VehicleId) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    /// Returns an iterator over all the vehicles in the simulation.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Queues an input event for the given vehicle. The event is ignored
    /// unless the vehicle has an input-driven controller.
    pub fn push_input(&mut self, vehicle_id: VehicleId, event: InputEvent) {
        if let Controller::Input(input) = self.vehicles[vehicle_id].controller_mut() {
            input.push(event);
        }
    }

    /// Registers an observer called with every vehicle's control signal
    /// each frame, in place of any logging inside the simulation loop.
    pub fn set_control_observer(&mut self, observer: impl FnMut(VehicleId, ControlSignal) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Randomly scales the top speed of every vehicle, sampling a factor
    /// from a normal distribution with a mean of 1 (no adjustment) and
    /// standard deviation of `stddev`, clamped to `[0.75, 1.25]`.
    ///
    /// Call once after spawning traffic; repeated calls compound.
    pub fn randomise_max_speeds(&mut self, stddev: f64) {
        let mut rand = rand::thread_rng();
        let distr = rand_distr::Normal::new(1.0, stddev).expect("Invalid standard deviation");
        for (_, vehicle) in &mut self.vehicles {
            let factor = distr.sample(&mut rand).clamp(0.75, 1.25);
            vehicle.scale_max_speed(factor);
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// The frame runs in two passes: every vehicle's motion and hull are
    /// advanced first, and only then are damage and sensor readings
    /// computed, so each vehicle sees the current frame's hulls of all the
    /// others regardless of insertion order.
    pub fn step(&mut self) {
        self.apply_controls();
        self.advance_vehicles();
        self.assess_damage();
        self.update_sensors();
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = crate::render::debug_frame(self.vehicles.values());
        }
    }

    /// Gets the draw primitives of the previously simulated frame as JSON.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }

    /// Collects this frame's control signal for every vehicle. Policies are
    /// fed the proximities of the previous frame's readings.
    fn apply_controls(&mut self) {
        for (id, vehicle) in &mut self.vehicles {
            let signal = vehicle.apply_controls();
            log::trace!("frame {}: vehicle {:?} controls {:?}", self.frame, id, signal);
            if let Some(observer) = &mut self.observer {
                observer(id, signal);
            }
        }
    }

    /// Integrates motion and rebuilds the hull of every undamaged vehicle.
    fn advance_vehicles(&mut self) {
        for (_, vehicle) in &mut self.vehicles {
            vehicle.advance();
        }
    }

    /// Checks every undamaged vehicle against the borders and the fresh
    /// hulls of all the others.
    fn assess_damage(&mut self) {
        let hulls = self.hulls();
        for (id, vehicle) in &mut self.vehicles {
            let others = other_hulls(&hulls, id);
            let was_damaged = vehicle.damaged();
            vehicle.assess_damage(&self.borders, &others);
            if !was_damaged && vehicle.damaged() {
                log::debug!("vehicle {:?} damaged on frame {}", id, self.frame);
            }
        }
    }

    /// Updates every sensor against the borders and the fresh hulls of all
    /// the other vehicles. Damaged vehicles keep sensing.
    fn update_sensors(&mut self) {
        let hulls = self.hulls();
        for (id, vehicle) in &mut self.vehicles {
            let others = other_hulls(&hulls, id);
            vehicle.sense(&self.borders, &others);
        }
    }

    /// Snapshots the current hull of every vehicle.
    fn hulls(&self) -> Vec<(VehicleId, Polygon)> {
        self.vehicles
            .iter()
            .map(|(id, vehicle)| (id, vehicle.hull().clone()))
            .collect()
    }
}

/// The hulls of every vehicle except `own`.
fn other_hulls(hulls: &[(VehicleId, Polygon)], own: VehicleId) -> SmallVec<[&Polygon; 8]> {
    hulls
        .iter()
        .filter(|(id, _)| *id != own)
        .map(|(_, hull)| hull)
        .collect()
}
