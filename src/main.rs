use std::time::Instant;

use drive_sim::{math::Point2d, ControlSignal, Controller, Road, Simulation, VehicleAttributes};

const NUM_FRAMES: usize = 10_000;

fn main() {
    let road = Road::new(100.0, 90.0, 3);
    let mut sim = Simulation::new();
    sim.set_borders(road.borders().to_vec());

    let attributes = VehicleAttributes {
        width: 30.0,
        height: 50.0,
        max_speed: 3.0,
    };
    sim.add_vehicle(
        &attributes,
        Point2d::new(road.lane_center(1), 0.0),
        0.0,
        Controller::policy(steer_clear),
    );

    let traffic = VehicleAttributes {
        max_speed: 2.0,
        ..attributes
    };
    let rows = [
        (1, -100.0),
        (0, -300.0),
        (2, -300.0),
        (0, -500.0),
        (1, -500.0),
        (1, -700.0),
        (2, -700.0),
    ];
    for (lane, y) in rows {
        sim.add_vehicle(
            &traffic,
            Point2d::new(road.lane_center(lane), y),
            0.0,
            Controller::dummy(),
        );
    }
    sim.randomise_max_speeds(0.05);

    println!("Simulating...");
    let start = Instant::now();
    for _ in 0..NUM_FRAMES {
        sim.step();
    }
    let frame = start.elapsed() / NUM_FRAMES as u32;
    let intact = sim.iter_vehicles().filter(|v| !v.damaged()).count();
    println!(
        "Avg. frame: {:?} ({} vehicles, {} intact after {} frames)",
        frame,
        sim.iter_vehicles().count(),
        intact,
        sim.frame(),
    );
}

/// Drives forward, steering away from whichever side reads closer.
fn steer_clear(proximity: &[f64]) -> ControlSignal {
    let mid = proximity.len() / 2;
    let left: f64 = proximity[..mid].iter().sum();
    let right: f64 = proximity[mid + 1..].iter().sum();
    ControlSignal {
        left: right > left,
        right: left > right,
        ..ControlSignal::FORWARD
    }
}
