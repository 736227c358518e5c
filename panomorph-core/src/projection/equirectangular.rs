use std::f64::consts::{PI, TAU};

use crate::foundation::core::Point;
use crate::projection::Projection;
use crate::sphere::direction::{Angles, Direction};

/// Full-sphere unwrap mapping azimuth and altitude linearly onto a 2:1
/// rectangle. Every point maps to a direction and back; this projection has
/// no gaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct EquirectangularProjection;

impl Projection for EquirectangularProjection {
    fn aspect_ratio(&self) -> f64 {
        2.0
    }

    fn point_to_direction(&self, point: Point) -> Option<Direction> {
        Some(Direction::Angles(Angles {
            azimuth: point.x * TAU,
            altitude: (point.y - 0.5) * PI,
        }))
    }

    fn direction_to_point(&self, direction: Direction) -> Option<Point> {
        let angles = direction.to_angles();
        Some(Point::new(
            angles.azimuth / TAU,
            angles.altitude / PI + 0.5,
        ))
    }
}
