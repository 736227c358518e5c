//! Mappings between normalized image points and sphere directions.

pub mod cubemap;
pub mod equirectangular;
pub mod hemispherical;
pub mod registry;

use crate::foundation::core::Point;
use crate::sphere::direction::Direction;

/// A pure mapping between normalized 2D image points in `[0,1] x [0,1]` and
/// directions on the unit sphere.
///
/// Implementations carry no mutable state (hemispherical holds only its
/// field of view), so one instance is shared read-only by all render
/// workers. `None` on either mapping marks a projection gap, a region of
/// the domain with no valid counterpart; gaps are expected outcomes, not
/// errors.
pub trait Projection: Send + Sync {
    /// Width-to-height ratio of the ideal image for this projection.
    fn aspect_ratio(&self) -> f64;

    /// Map a normalized image point to the direction it depicts.
    fn point_to_direction(&self, point: Point) -> Option<Direction>;

    /// Map a direction to the normalized image point depicting it.
    fn direction_to_point(&self, direction: Direction) -> Option<Point>;
}
