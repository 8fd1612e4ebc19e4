//! Polar 3D vectors and the kinematic quantities built on them
//!
//! A [`Vector3D`] stores a magnitude and a [`Direction`]. The Cartesian form is
//! derived on demand:
//!
//! ```text
//! x = sin(plane) * cos(z) * magnitude
//! y = cos(plane) * cos(z) * magnitude
//! z = sin(z) * magnitude
//! ```
//!
//! All arithmetic is element-wise on the Cartesian components, with the result
//! converted back to polar form. The kind parameter keeps displacements,
//! velocities, accelerations and forces from being mixed by accident; the
//! physical conversions between them live on the concrete aliases.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use super::bearing::bearing;
use super::direction::Direction;
use super::coords::NVec3;

/// Marker types naming what a [`Vector3D`] measures
pub mod kind {
    use std::fmt::Debug;

    pub trait Kind: Copy + Default + Debug + PartialEq {
        const NAME: &'static str;
    }

    macro_rules! kinds {
        ($($name:ident),*) => {
            $(
                #[derive(Debug, Clone, Copy, Default, PartialEq)]
                pub struct $name;

                impl Kind for $name {
                    const NAME: &'static str = stringify!($name);
                }
            )*
        };
    }

    kinds!(Displacement, Velocity, Acceleration, Force);
}

use kind::Kind;

pub type Displacement = Vector3D<kind::Displacement>;
pub type Velocity = Vector3D<kind::Velocity>;
pub type Acceleration = Vector3D<kind::Acceleration>;
pub type Force = Vector3D<kind::Force>;

/// Magnitude + direction pair
///
/// The magnitude is not forced to be non-negative; a negative magnitude simply
/// points the other way once converted to components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D<K: Kind> {
    pub magnitude: f64,
    pub direction: Direction,
    _kind: PhantomData<K>,
}

impl<K: Kind> Vector3D<K> {
    pub fn new(magnitude: f64, direction: Direction) -> Self {
        Self {
            magnitude,
            direction,
            _kind: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, Direction::default())
    }

    /// Recover magnitude and bearings from Cartesian components
    ///
    /// A vector with no horizontal extent keeps a plane bearing of 0, and the
    /// zero vector keeps an elevation of 0. Non-finite components carry through
    /// to the magnitude, while an angle that cannot be resolved falls back to 0.
    pub fn from_components(x: f64, y: f64, z: f64) -> Self {
        let planar_magnitude = x.hypot(y);
        let magnitude = planar_magnitude.hypot(z);

        let plane = if planar_magnitude != 0.0 { bearing(x, y) } else { 0.0 };
        let elevation = if magnitude != 0.0 { bearing(z, planar_magnitude) } else { 0.0 };

        Self::new(magnitude, Direction::normalised(finite_or_zero(plane), finite_or_zero(elevation)))
    }

    pub fn from_vector(v: NVec3) -> Self {
        Self::from_components(v.x, v.y, v.z)
    }

    pub fn components(&self) -> NVec3 {
        let (sin_p, cos_p) = self.direction.plane_r().sin_cos();
        let (sin_z, cos_z) = self.direction.z_r().sin_cos();
        NVec3::new(
            sin_p * cos_z * self.magnitude,
            cos_p * cos_z * self.magnitude,
            sin_z * self.magnitude,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }

    /// Same magnitude and direction, reinterpreted as another quantity
    fn retag<L: Kind>(&self, magnitude: f64) -> Vector3D<L> {
        Vector3D::new(magnitude, self.direction)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let a = self.components();
        let b = other.components();
        Self::from_vector(a.zip_map(&b, op))
    }

    fn map_with(&self, scalar: f64, op: impl Fn(f64, f64) -> f64) -> Self {
        Self::from_vector(self.components().map(|c| op(c, scalar)))
    }
}

fn finite_or_zero(angle: f64) -> f64 {
    if angle.is_finite() {
        angle
    } else {
        0.0
    }
}

/// Floored remainder: the result takes the sign of the divisor
fn floored_rem(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

impl Velocity {
    /// Distance covered in `time` at this constant velocity
    pub fn to_displacement(&self, time: f64) -> Displacement {
        self.retag(self.magnitude * time)
    }
}

impl Acceleration {
    /// Change in velocity over `time`
    pub fn to_velocity(&self, time: f64) -> Velocity {
        self.retag(self.magnitude * time)
    }

    /// `s = u*t + a*t^2/2` starting from initial velocity `u`
    pub fn to_displacement(&self, time: f64, initial: &Velocity) -> Displacement {
        let drift = initial.to_displacement(time);
        let push: Displacement = self.retag(0.5 * self.magnitude * time * time);
        if drift.is_zero() {
            push
        } else {
            drift + push
        }
    }

    /// `F = m*a`
    pub fn to_force(&self, mass: f64) -> Force {
        self.retag(self.magnitude * mass)
    }
}

impl Force {
    /// `a = F/m`
    pub fn to_acceleration(&self, mass: f64) -> Acceleration {
        self.retag(self.magnitude / mass)
    }
}

impl<K: Kind> Add for Vector3D<K> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a + b)
    }
}

impl<K: Kind> Sub for Vector3D<K> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a - b)
    }
}

impl<K: Kind> Mul for Vector3D<K> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a * b)
    }
}

impl<K: Kind> Div for Vector3D<K> {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a / b)
    }
}

impl<K: Kind> Rem for Vector3D<K> {
    type Output = Self;
    fn rem(self, other: Self) -> Self {
        self.zip_with(&other, floored_rem)
    }
}

impl<K: Kind> Mul<f64> for Vector3D<K> {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.map_with(scalar, |a, b| a * b)
    }
}

impl<K: Kind> Mul<Vector3D<K>> for f64 {
    type Output = Vector3D<K>;
    fn mul(self, v: Vector3D<K>) -> Vector3D<K> {
        v * self
    }
}

impl<K: Kind> Div<f64> for Vector3D<K> {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        self.map_with(scalar, |a, b| a / b)
    }
}

impl<K: Kind> Rem<f64> for Vector3D<K> {
    type Output = Self;
    fn rem(self, scalar: f64) -> Self {
        self.map_with(scalar, floored_rem)
    }
}

impl<K: Kind> Neg for Vector3D<K> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(self.magnitude, -self.direction)
    }
}

impl<K: Kind> fmt::Display for Vector3D<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", K::NAME, self.magnitude, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: NVec3, b: NVec3) {
        let scale = b.norm().max(1.0);
        assert!((a - b).norm() < 1e-9 * scale, "{:?} != {:?}", a, b);
    }

    #[test]
    fn components_follow_bearing_convention() {
        // bearing 90 in the plane points along +x
        let v = Displacement::new(2.0, Direction::planar(90.0).unwrap());
        assert_vec_close(v.components(), NVec3::new(2.0, 0.0, 0.0));

        let up = Displacement::new(3.0, Direction::new(0.0, 90.0).unwrap());
        assert_vec_close(up.components(), NVec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn round_trip_axes_and_octants() {
        let samples = [
            (1.0, 0.0, 0.0),
            (-1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, -1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.0, 0.0, -1.0),
            (3.0, -4.0, 5.0),
            (-3.0, -4.0, -5.0),
            (-2.5, 7.0, 0.25),
        ];
        for (x, y, z) in samples {
            let v = Force::from_components(x, y, z);
            assert_vec_close(v.components(), NVec3::new(x, y, z));
        }
    }

    #[test]
    fn zero_vector() {
        let v = Velocity::from_components(0.0, 0.0, 0.0);
        assert!(v.is_zero());
        assert_eq!(v.direction, Direction::default());
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Displacement::from_components(1.0, 2.0, 3.0);
        let b = Displacement::from_components(4.0, -1.0, 0.5);
        assert_vec_close((a + b).components(), NVec3::new(5.0, 1.0, 3.5));
        assert_vec_close((a - b).components(), NVec3::new(-3.0, 3.0, 2.5));
        assert_vec_close((a * b).components(), NVec3::new(4.0, -2.0, 1.5));
        assert_vec_close((a * 2.0).components(), NVec3::new(2.0, 4.0, 6.0));
        assert_vec_close((2.0 * a).components(), NVec3::new(2.0, 4.0, 6.0));
        assert_vec_close((a / 2.0).components(), NVec3::new(0.5, 1.0, 1.5));

        let c = Displacement::from_components(5.0, 6.0, 7.0);
        assert_vec_close((c % 4.0).components(), NVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn remainder_takes_sign_of_divisor() {
        let a = Displacement::from_components(-5.0, 6.0, -7.0);
        assert_vec_close((a % 4.0).components(), NVec3::new(3.0, 2.0, 1.0));
        assert_vec_close((a % -4.0).components(), NVec3::new(-1.0, -2.0, -3.0));

        let b = Displacement::from_components(3.0, -4.0, 5.0);
        assert_vec_close((a % b).components(), NVec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn non_finite_components_keep_direction_in_range() {
        let v = Force::from_components(f64::INFINITY, f64::INFINITY, 0.0);
        assert!(v.magnitude.is_infinite());
        assert!((0.0..360.0).contains(&v.direction.plane()));
        assert!((0.0..360.0).contains(&v.direction.z()));

        let nan = Force::from_components(f64::NAN, 1.0, 0.0);
        assert!(nan.magnitude.is_nan());
        assert_eq!(nan.direction, Direction::default());
    }

    #[test]
    fn negation_flips_components() {
        let a = Velocity::from_components(1.0, -2.0, 3.0);
        assert_vec_close((-a).components(), NVec3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn kinematic_conversions() {
        let dir = Direction::new(45.0, 10.0).unwrap();

        let v = Velocity::new(3.0, dir);
        let s = v.to_displacement(2.0);
        assert_eq!(s.magnitude, 6.0);
        assert_eq!(s.direction, dir);

        let a = Acceleration::new(4.0, dir);
        assert_eq!(a.to_velocity(0.5).magnitude, 2.0);
        assert_eq!(a.to_force(3.0).magnitude, 12.0);
        assert_eq!(Force::new(12.0, dir).to_acceleration(3.0).magnitude, 4.0);

        let s = a.to_displacement(2.0, &Velocity::zero());
        assert_eq!(s.magnitude, 8.0);
        assert_eq!(s.direction, dir);
    }

    #[test]
    fn displacement_with_initial_velocity() {
        let a = Acceleration::from_components(0.0, 2.0, 0.0);
        let u = Velocity::from_components(1.0, 0.0, 0.0);
        // u*t = (3, 0, 0), a*t^2/2 = (0, 9, 0)
        let s = a.to_displacement(3.0, &u);
        assert_vec_close(s.components(), NVec3::new(3.0, 9.0, 0.0));
    }
}
