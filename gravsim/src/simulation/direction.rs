//! Direction of a 3D vector as a pair of bearings in degrees
//!
//! - `plane`: bearing in the horizontal plane, from +y towards +x
//! - `z`: elevation above the horizontal plane
//!
//! Both angles are kept in `[0, 360)` at all times.

use std::fmt;
use std::ops::Neg;

use super::error::MechanicsError;

const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Direction {
    plane: f64,
    z: f64,
}

impl Direction {
    /// Build a direction, wrapping both angles into `[0, 360)`
    pub fn new(plane: f64, z: f64) -> Result<Self, MechanicsError> {
        if !plane.is_finite() || !z.is_finite() {
            return Err(MechanicsError::NonFiniteAngle { plane, z });
        }
        Ok(Self::normalised(plane, z))
    }

    /// Direction lying in the horizontal plane
    pub fn planar(plane: f64) -> Result<Self, MechanicsError> {
        Self::new(plane, 0.0)
    }

    /// Callers guarantee finite inputs
    pub(crate) fn normalised(plane: f64, z: f64) -> Self {
        Self {
            plane: normalise(plane),
            z: normalise(z),
        }
    }

    pub fn plane(&self) -> f64 {
        self.plane
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn plane_r(&self) -> f64 {
        self.plane.to_radians()
    }

    pub fn z_r(&self) -> f64 {
        self.z.to_radians()
    }

    pub fn set_plane(&mut self, plane: f64) -> Result<(), MechanicsError> {
        *self = Self::new(plane, self.z)?;
        Ok(())
    }

    pub fn set_z(&mut self, z: f64) -> Result<(), MechanicsError> {
        *self = Self::new(self.plane, z)?;
        Ok(())
    }
}

/// Wrap an angle into `[0, 360)`
///
/// `rem_euclid` can round a tiny negative angle up to exactly 360, which is
/// folded back to 0, as is negative zero.
fn normalise(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    if wrapped >= FULL_TURN || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

impl Neg for Direction {
    type Output = Direction;

    /// Opposite direction: swing the bearing half a turn and mirror the elevation
    fn neg(self) -> Direction {
        Direction::normalised(self.plane + 180.0, -self.z)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Direction({}, {})", self.plane, self.z)
    }
}
