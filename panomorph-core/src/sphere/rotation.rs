use std::str::FromStr;

use crate::foundation::error::PanomorphError;
use crate::sphere::direction::{Vec3, rotate_pair};

/// Rotation about the X, Y and Z axes in degrees, applied in that order.
///
/// Parsed from the `"<x>,<y>,<z>"` form accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation {
    pub x_deg: f64,
    pub y_deg: f64,
    pub z_deg: f64,
}

impl Rotation {
    pub fn new(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self {
            x_deg,
            y_deg,
            z_deg,
        }
    }

    /// Apply the three axis rotations to `v`, X first, then Y, then Z.
    ///
    /// Each step rotates the vector produced by the previous one; the three
    /// are deliberately not composed into a single matrix so the order of
    /// application stays explicit.
    pub fn apply(self, v: Vec3) -> Vec3 {
        let v = rotate_about_x(v, self.x_deg.to_radians());
        let v = rotate_about_y(v, self.y_deg.to_radians());
        rotate_about_z(v, self.z_deg.to_radians())
    }
}

impl FromStr for Rotation {
    type Err = PanomorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let &[x, y, z] = parts.as_slice() else {
            return Err(PanomorphError::validation(format!(
                "rotation must be '<x>,<y>,<z>' in degrees, got '{s}'"
            )));
        };
        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                PanomorphError::validation(format!(
                    "rotation component '{part}' is not a number (in '{s}')"
                ))
            })
        };
        Ok(Self {
            x_deg: parse(x)?,
            y_deg: parse(y)?,
            z_deg: parse(z)?,
        })
    }
}

fn rotate_about_x(v: Vec3, angle: f64) -> Vec3 {
    let (y, z) = rotate_pair(v.y, v.z, angle);
    Vec3 { x: v.x, y, z }
}

fn rotate_about_y(v: Vec3, angle: f64) -> Vec3 {
    let (z, x) = rotate_pair(v.z, v.x, angle);
    Vec3 { x, y: v.y, z }
}

fn rotate_about_z(v: Vec3, angle: f64) -> Vec3 {
    let (x, y) = rotate_pair(v.x, v.y, angle);
    Vec3 { x, y, z: v.z }
}
