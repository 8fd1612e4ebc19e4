//! Cartesian points in simulation space
//!
//! Points are plain values: moving a point produces a new one.

use std::fmt;
use std::ops::Add;

use nalgebra::Vector3;

use super::direction::Direction;
use super::vectors::Displacement;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coords {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn components(&self) -> NVec3 {
        NVec3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Coords) -> f64 {
        (other.components() - self.components()).norm()
    }

    /// Direction of the displacement from `self` to `other`
    pub fn direction_to(&self, other: &Coords) -> Direction {
        self.displacement_to(other).direction
    }

    pub fn displacement_to(&self, other: &Coords) -> Displacement {
        Displacement::from_vector(other.components() - self.components())
    }

    /// Displacement from the origin to this point
    pub fn to_displacement(&self) -> Displacement {
        Displacement::from_vector(self.components())
    }

    pub fn from_displacement(displacement: &Displacement) -> Self {
        Self::from(displacement.components())
    }
}

impl From<NVec3> for Coords {
    fn from(v: NVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Coords {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add<Displacement> for Coords {
    type Output = Coords;

    fn add(self, displacement: Displacement) -> Coords {
        Coords::from(self.components() + displacement.components())
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coords({}, {}, {})", self.x, self.y, self.z)
    }
}
