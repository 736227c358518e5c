//! Unit-sphere direction algebra.
//!
//! A direction is held either as a 3D vector or as an (azimuth, altitude)
//! angle pair. Both representations describe the same thing; consumers pick
//! whichever is convenient via [`Direction::to_vector`] /
//! [`Direction::to_angles`] at the point of need and never branch on which
//! variant they were handed.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::sphere::rotation::Rotation;

/// Direction as a 3D vector. Not required to be unit length; only the
/// ratios between components are authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to the angle representation.
    ///
    /// The poles and the null vector leave azimuth mathematically
    /// unconstrained; both resolve to `azimuth = 0`. That fallback is part
    /// of the conversion contract, callers can rely on it.
    pub fn to_angles(self) -> Angles {
        if self.x == 0.0 && self.z == 0.0 {
            if self.y == 0.0 {
                return Angles {
                    azimuth: 0.0,
                    altitude: 0.0,
                };
            }
            return Angles {
                azimuth: 0.0,
                altitude: if self.y < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 },
            };
        }

        let altitude = self.y.atan2((self.x * self.x + self.z * self.z).sqrt());

        if self.x == 0.0 {
            return Angles {
                azimuth: if self.z < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 },
                altitude,
            };
        }

        let mut azimuth = self.z.atan2(self.x);
        if azimuth < 0.0 {
            azimuth += TAU;
        }
        Angles { azimuth, altitude }
    }
}

/// Direction as a spherical angle pair. Once normalized via
/// [`Angles::clamped`], `azimuth` lies in `[0, 2*pi)` and `altitude` in
/// `[-pi/2, pi/2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Angles {
    pub azimuth: f64,
    pub altitude: f64,
}

impl Angles {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self { azimuth, altitude }
    }

    /// Convert to the vector representation.
    ///
    /// Built as two planar rotations of `(1, 0, 0)`, altitude about the
    /// pitch axis then azimuth about the yaw axis. This mirrors
    /// [`Vec3::to_angles`] term for term, so round-trips are exact.
    pub fn to_vector(self) -> Vec3 {
        let (x, y) = rotate_pair(1.0, 0.0, self.altitude);
        let (x, z) = rotate_pair(x, 0.0, self.azimuth);
        Vec3 { x, y, z }
    }

    /// Renormalize into the canonical ranges while preserving the direction.
    ///
    /// Altitude is first wrapped into `[-pi, pi]`; if it still exceeds
    /// `+-pi/2` the direction points past a pole, so altitude is reflected
    /// and azimuth flipped by `pi`. Azimuth is then wrapped into
    /// `[0, 2*pi)`. Idempotent.
    pub fn clamped(self) -> Self {
        let mut altitude = self.altitude;
        let mut azimuth = self.azimuth;

        while altitude < -PI {
            altitude += TAU;
        }
        while altitude > PI {
            altitude -= TAU;
        }

        if altitude < -FRAC_PI_2 {
            altitude = -PI - altitude;
            azimuth += PI;
        } else if altitude > FRAC_PI_2 {
            altitude = PI - altitude;
            azimuth += PI;
        }

        while azimuth < 0.0 {
            azimuth += TAU;
        }
        while azimuth >= TAU {
            azimuth -= TAU;
        }

        debug_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&altitude));
        debug_assert!((0.0..TAU).contains(&azimuth));
        Self { azimuth, altitude }
    }
}

/// A direction on the unit sphere, in whichever representation the producer
/// had on hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Vector(Vec3),
    Angles(Angles),
}

impl Direction {
    pub fn to_vector(self) -> Vec3 {
        match self {
            Self::Vector(v) => v,
            Self::Angles(a) => a.to_vector(),
        }
    }

    pub fn to_angles(self) -> Angles {
        match self {
            Self::Vector(v) => v.to_angles(),
            Self::Angles(a) => a,
        }
    }

    /// Rotate about the X, Y and Z axes in that order, returning a new
    /// direction. Never mutates in place, so a direction value can be
    /// shared or reused by the caller without aliasing surprises.
    pub fn rotated(self, rotation: Rotation) -> Self {
        Self::Vector(rotation.apply(self.to_vector()))
    }
}

impl From<Vec3> for Direction {
    fn from(v: Vec3) -> Self {
        Self::Vector(v)
    }
}

impl From<Angles> for Direction {
    fn from(a: Angles) -> Self {
        Self::Angles(a)
    }
}

/// Rotate the coordinate pair `(a, b)` by `angle` radians in its plane.
pub(crate) fn rotate_pair(a: f64, b: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (a * cos - b * sin, a * sin + b * cos)
}
