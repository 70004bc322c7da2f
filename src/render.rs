//! Read-only projection of simulation state into draw primitives.
//!
//! The simulation renders nothing itself. These functions flatten a vehicle
//! and its sensor into a list of tinted shapes that any surface (a canvas,
//! an SVG writer, a debug overlay) can draw in order.

use crate::math::{LineSegment2d, Polygon};
use crate::sensor::Sensor;
use crate::vehicle::Vehicle;

/// An abstract colour role. The drawing surface chooses the actual colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    /// The hull of an intact vehicle.
    Body,
    /// The hull of a damaged vehicle.
    BodyDamaged,
    /// The unobstructed part of a sensor ray.
    RayClear,
    /// The part of a sensor ray beyond its hit point.
    RayBlocked,
}

/// A shape to draw.
#[derive(Clone, Debug)]
pub enum Shape {
    Polygon(Polygon),
    Line(LineSegment2d),
}

/// A single tinted shape.
#[derive(Clone, Debug)]
pub struct DrawOp {
    pub shape: Shape,
    pub tint: Tint,
}

/// Appends the draw ops for a vehicle: its hull, tinted by damage state,
/// followed by its sensor if it carries one.
pub fn draw_vehicle(vehicle: &Vehicle, out: &mut Vec<DrawOp>) {
    let tint = if vehicle.damaged() {
        Tint::BodyDamaged
    } else {
        Tint::Body
    };
    out.push(DrawOp {
        shape: Shape::Polygon(vehicle.hull().clone()),
        tint,
    });
    if let Some(sensor) = vehicle.sensor() {
        draw_sensor(sensor, out);
    }
}

/// Appends the draw ops for a sensor's rays.
///
/// Each ray is drawn from its origin up to the hit point, then the blocked
/// remainder from the far end back to the hit point. An unobstructed ray's
/// blocked part is zero length.
pub fn draw_sensor(sensor: &Sensor, out: &mut Vec<DrawOp>) {
    for (ray, reading) in sensor.rays().iter().zip(sensor.readings()) {
        let hit = reading.map_or(ray.end(), |r| r.point);
        out.push(DrawOp {
            shape: Shape::Line(LineSegment2d::from_ends(ray.start(), hit)),
            tint: Tint::RayClear,
        });
        out.push(DrawOp {
            shape: Shape::Line(LineSegment2d::from_ends(ray.end(), hit)),
            tint: Tint::RayBlocked,
        });
    }
}

/// Flattens every vehicle's draw ops into a JSON frame.
#[cfg(feature = "debug")]
pub(crate) fn debug_frame<'a>(vehicles: impl Iterator<Item = &'a Vehicle>) -> serde_json::Value {
    use serde_json::json;

    let mut ops = Vec::new();
    for vehicle in vehicles {
        draw_vehicle(vehicle, &mut ops);
    }
    json!(ops
        .iter()
        .map(|op| {
            let tint = match op.tint {
                Tint::Body => "body",
                Tint::BodyDamaged => "body_damaged",
                Tint::RayClear => "ray_clear",
                Tint::RayBlocked => "ray_blocked",
            };
            match &op.shape {
                Shape::Polygon(polygon) => json!({
                    "type": "polygon",
                    "tint": tint,
                    "points": polygon.points().iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                }),
                Shape::Line(line) => json!({
                    "type": "line",
                    "tint": tint,
                    "p1": [line.start().x, line.start().y],
                    "p2": [line.end().x, line.end().y],
                }),
            }
        })
        .collect::<Vec<_>>())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point2d;

    #[test]
    fn rays_are_split_at_the_hit_point() {
        let mut sensor = Sensor::new();
        let wall = LineSegment2d::from_ends(Point2d::new(-200.0, -100.0), Point2d::new(200.0, -100.0));
        sensor.update(Point2d::new(0.0, 0.0), 0.0, &[wall], &[]);

        let mut ops = Vec::new();
        draw_sensor(&sensor, &mut ops);
        // One clear and one blocked segment per ray.
        assert_eq!(ops.len(), 2 * sensor.ray_count());

        // The middle ray's clear part ends at the wall and its blocked part
        // spans from the far end back to the same point.
        let hit = sensor.readings()[2].unwrap().point;
        let (clear, blocked) = match (&ops[4], &ops[5]) {
            (
                DrawOp { shape: Shape::Line(clear), tint: Tint::RayClear },
                DrawOp { shape: Shape::Line(blocked), tint: Tint::RayBlocked },
            ) => (*clear, *blocked),
            other => panic!("unexpected ops: {:?}", other),
        };
        assert_eq!(clear.end(), hit);
        assert_eq!(blocked.end(), hit);
        assert_eq!(blocked.start(), sensor.rays()[2].end());
    }

    #[test]
    fn unobstructed_rays_have_zero_length_blocked_parts() {
        let mut sensor = Sensor::new();
        sensor.update(Point2d::new(0.0, 0.0), 0.0, &[], &[]);

        let mut ops = Vec::new();
        draw_sensor(&sensor, &mut ops);
        for pair in ops.chunks(2) {
            if let Shape::Line(blocked) = &pair[1].shape {
                assert_eq!(blocked.start(), blocked.end());
            } else {
                panic!("expected a line");
            }
        }
    }
}
