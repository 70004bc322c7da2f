pub use cgmath;
pub use controller::{Button, ControlSignal, Controller, InputController, InputEvent, Policy};
pub use render::{draw_sensor, draw_vehicle, DrawOp, Shape, Tint};
pub use road::Road;
pub use sensor::Sensor;
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use vehicle::{Vehicle, VehicleAttributes};

mod controller;
pub mod math;
mod render;
mod road;
mod sensor;
mod simulation;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a [Vehicle].
    pub struct VehicleId;
}

type VehicleSet = SlotMap<VehicleId, Vehicle>;
