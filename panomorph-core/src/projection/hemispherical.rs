use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::Point;
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::projection::Projection;
use crate::sphere::direction::{Angles, Direction};

/// Radial fisheye projection centered on the image, covering a configurable
/// angular field of view (180 degrees on both axes by default, which is the
/// upper hemisphere).
///
/// Directions outside the field have no image point; those projection gaps
/// are a first-class outcome, not an error.
#[derive(Clone, Copy, Debug)]
pub struct HemisphericalProjection {
    /// Angle between the left and right image edge, radians.
    fov_x: f64,
    /// Angle between the top and bottom image edge, radians.
    fov_y: f64,
}

impl HemisphericalProjection {
    /// Default field of view on both axes, in degrees.
    pub const DEFAULT_FOV_DEG: f64 = 180.0;

    /// Build a projection from per-axis fields of view in degrees.
    pub fn new(fov_x_deg: f64, fov_y_deg: f64) -> PanomorphResult<Self> {
        if !(fov_x_deg.is_finite() && fov_y_deg.is_finite()) || fov_x_deg <= 0.0 || fov_y_deg <= 0.0
        {
            return Err(PanomorphError::validation(format!(
                "field of view must be a positive number of degrees, got {fov_x_deg}x{fov_y_deg}"
            )));
        }
        Ok(Self {
            fov_x: fov_x_deg.to_radians(),
            fov_y: fov_y_deg.to_radians(),
        })
    }
}

impl Default for HemisphericalProjection {
    fn default() -> Self {
        Self {
            fov_x: Self::DEFAULT_FOV_DEG.to_radians(),
            fov_y: Self::DEFAULT_FOV_DEG.to_radians(),
        }
    }
}

impl Projection for HemisphericalProjection {
    fn aspect_ratio(&self) -> f64 {
        1.0
    }

    fn point_to_direction(&self, point: Point) -> Option<Direction> {
        let angle_x = (point.x - 0.5) * self.fov_x;
        let angle_y = (point.y - 0.5) * self.fov_y;
        let radial = (angle_x * angle_x + angle_y * angle_y).sqrt();
        let altitude = FRAC_PI_2 - radial;

        // Center column: same +-pi/2 fallback as the vector conversion.
        let azimuth = if angle_x == 0.0 {
            if angle_y < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 }
        } else {
            let mut azimuth = angle_y.atan2(angle_x);
            if azimuth < 0.0 {
                azimuth += TAU;
            }
            azimuth
        };

        Some(Direction::Angles(Angles { azimuth, altitude }))
    }

    fn direction_to_point(&self, direction: Direction) -> Option<Point> {
        let angles = direction.to_angles();
        let radial = FRAC_PI_2 - angles.altitude;

        let x = radial * angles.azimuth.cos() / self.fov_x + 0.5;
        if !(0.0..=1.0).contains(&x) {
            return None;
        }

        let y = radial * angles.azimuth.sin() / self.fov_y + 0.5;
        if !(0.0..=1.0).contains(&y) {
            return None;
        }

        Some(Point::new(x, y))
    }
}
