//! Point masses and their per-tick integration
//!
//! A particle carries mass, position, velocity and the acceleration
//! accumulated from forces since its last tick, plus display metadata
//! (`name`, `colour`) that the engine never reads.

use std::fmt;

use super::coords::{Coords, NVec3};
use super::error::MechanicsError;
use super::vectors::{Acceleration, Force, Velocity};

/// Display colour label, opaque to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colour(pub String);

impl Default for Colour {
    fn default() -> Self {
        Colour("black".to_string())
    }
}

impl From<&str> for Colour {
    fn from(s: &str) -> Self {
        Colour(s.to_string())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    name: String,
    mass: f64,
    position: Coords,
    velocity: Velocity,
    acceleration: Acceleration,
    colour: Colour,
}

impl Particle {
    /// At rest at the origin, unnamed and black
    pub fn new(mass: f64) -> Result<Self, MechanicsError> {
        Ok(Self {
            name: String::new(),
            mass: check_mass(mass)?,
            position: Coords::origin(),
            velocity: Velocity::zero(),
            acceleration: Acceleration::zero(),
            colour: Colour::default(),
        })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    pub fn with_position(mut self, position: Coords) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_colour(mut self, colour: impl Into<Colour>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn acceleration(&self) -> Acceleration {
        self.acceleration
    }

    pub fn colour(&self) -> &Colour {
        &self.colour
    }

    /// Stored title-cased: "lunar probe" becomes "Lunar Probe"
    pub fn set_name(&mut self, name: &str) {
        self.name = title_case(name);
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), MechanicsError> {
        self.mass = check_mass(mass)?;
        Ok(())
    }

    pub fn set_position(&mut self, position: Coords) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Acceleration) {
        self.acceleration = acceleration;
    }

    pub fn set_colour(&mut self, colour: impl Into<Colour>) {
        self.colour = colour.into();
    }

    /// Add the acceleration `force` produces on this mass (`a = F/m`)
    /// Contributions stack until the next tick clears them
    pub fn apply_force(&mut self, force: &Force) {
        let a = force.to_acceleration(self.mass);
        self.acceleration = if self.acceleration.is_zero() {
            a
        } else {
            self.acceleration + a
        };
    }

    /// Integrate one tick of length `dt` under the accumulated acceleration
    ///
    /// - `x' = x + v*dt + a*dt^2/2`
    /// - `v' = v + a*dt`
    /// - `a' = 0`
    pub fn tick(&mut self, dt: f64) {
        let drift = self.velocity.to_displacement(dt);
        let push = self.acceleration.to_displacement(dt, &Velocity::zero());
        self.position = self.position + drift + push;

        if !self.acceleration.is_zero() {
            self.velocity = self.velocity + self.acceleration.to_velocity(dt);
        }
        self.acceleration = Acceleration::zero();
    }

    /// Momentum `m*v` as a Cartesian vector
    pub fn momentum(&self) -> NVec3 {
        self.velocity.components() * self.mass
    }
}

fn check_mass(mass: f64) -> Result<f64, MechanicsError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(MechanicsError::InvalidMass(mass))
    }
}

/// Upper-case the first letter of every word, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Particle({}, {}, {}, {}, {})",
            self.name, self.mass, self.position, self.velocity, self.acceleration
        )
    }
}
