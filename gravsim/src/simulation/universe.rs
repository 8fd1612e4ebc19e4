//! The universe: every particle, every field, and the discrete step that
//! advances them together
//!
//! One tick is two phases:
//! 1. every field, in insertion order, adds its forces to particle accelerations
//! 2. every particle integrates over `tick_length` and clears its acceleration
//!
//! No particle may integrate before all forces are in.

use std::ops::{Shl, ShlAssign};

use log::{debug, warn};

use super::coords::{Coords, NVec3};
use super::error::MechanicsError;
use super::fields::Field;
use super::particle::Particle;
use super::vectors::Acceleration;

/// Seconds per tick unless configured otherwise
pub const DEFAULT_TICK_LENGTH: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Universe {
    particles: Vec<Particle>,
    fields: Vec<Box<dyn Field>>,
    tick_length: f64,
    steps: u64,   // ticks completed
    elapsed: f64, // simulated seconds
}

impl Universe {
    pub fn new(fields: Vec<Box<dyn Field>>) -> Self {
        Self {
            particles: Vec::new(),
            fields,
            tick_length: DEFAULT_TICK_LENGTH,
            steps: 0,
            elapsed: 0.0,
        }
    }

    pub fn with_tick_length(mut self, tick_length: f64) -> Result<Self, MechanicsError> {
        self.set_tick_length(tick_length)?;
        Ok(self)
    }

    pub fn set_tick_length(&mut self, tick_length: f64) -> Result<(), MechanicsError> {
        if !(tick_length.is_finite() && tick_length > 0.0) {
            return Err(MechanicsError::InvalidTickLength(tick_length));
        }
        self.tick_length = tick_length;
        Ok(())
    }

    pub fn tick_length(&self) -> f64 {
        self.tick_length
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Append a particle; returns `self` so additions can be chained
    pub fn add_particle(&mut self, particle: Particle) -> &mut Self {
        self.particles.push(particle);
        self
    }

    pub fn add_field(&mut self, field: Box<dyn Field>) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Edits go through [`Particle`]'s setters, which validate mass
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }

    /// Concrete field at `index`, if it is an `F`
    pub fn field_mut<F: Field + 'static>(&mut self, index: usize) -> Option<&mut F> {
        self.fields
            .get_mut(index)
            .and_then(|f| f.as_any_mut().downcast_mut::<F>())
    }

    /// Current positions in particle order
    pub fn positions(&self) -> Vec<NVec3> {
        self.particles.iter().map(|p| p.position().components()).collect()
    }

    /// Advance every particle by one tick under every field
    ///
    /// If a field fails, accelerations are put back as they were, no particle
    /// moves and the step counter does not advance.
    pub fn tick(&mut self) -> Result<(), MechanicsError> {
        let saved: Vec<Acceleration> = self.particles.iter().map(Particle::acceleration).collect();

        // Phase 1: accumulate forces from all fields
        for field in &self.fields {
            if let Err(e) = field.apply(self.steps, &mut self.particles) {
                warn!("tick {} rejected by {} field: {}", self.steps, field.name(), e);
                for (p, a) in self.particles.iter_mut().zip(saved.iter()) {
                    p.set_acceleration(*a);
                }
                return Err(e);
            }
        }

        // Phase 2: integrate
        let dt = self.tick_length;
        for p in self.particles.iter_mut() {
            p.tick(dt);
        }

        self.steps += 1;
        self.elapsed += dt;
        debug!("tick {} done, t = {} s", self.steps, self.elapsed);
        Ok(())
    }

    /// Run `ticks` ticks, stopping at the first failure
    pub fn advance(&mut self, ticks: u64) -> Result<(), MechanicsError> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Independent deep copy: no particle or field is shared with `self`
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Sum of `m*v` over all particles
    pub fn total_momentum(&self) -> NVec3 {
        self.particles.iter().map(Particle::momentum).sum()
    }

    /// Mass-weighted mean position, `None` when empty
    pub fn centre_of_mass(&self) -> Option<Coords> {
        if self.particles.is_empty() {
            return None;
        }
        let total_mass: f64 = self.particles.iter().map(Particle::mass).sum();
        let weighted: NVec3 = self
            .particles
            .iter()
            .map(|p| p.position().components() * p.mass())
            .sum();
        Some(Coords::from(weighted / total_mass))
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// `universe << particle << particle`
impl Shl<Particle> for Universe {
    type Output = Universe;

    fn shl(mut self, particle: Particle) -> Universe {
        self.add_particle(particle);
        self
    }
}

/// `universe <<= particle`
impl ShlAssign<Particle> for Universe {
    fn shl_assign(&mut self, particle: Particle) {
        self.add_particle(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::fields::{ConstantForce, Gravity};
    use crate::simulation::vectors::{Force, Velocity};

    fn body(mass: f64, x: f64) -> Particle {
        Particle::new(mass).unwrap().with_position(Coords::new(x, 0.0, 0.0))
    }

    #[test]
    fn chained_append() {
        let mut u = Universe::default();
        u.add_particle(body(1.0, 0.0)).add_particle(body(2.0, 1.0));
        let u = u << body(3.0, 2.0) << body(4.0, 3.0);
        assert_eq!(u.particles().len(), 4);
        assert_eq!(u.particle(3).unwrap().mass(), 4.0);

        let mut u = u;
        u <<= body(5.0, 4.0);
        assert_eq!(u.particles().len(), 5);
    }

    #[test]
    fn tick_counts_steps_and_time() {
        let mut u = Universe::default().with_tick_length(0.5).unwrap();
        u <<= body(1.0, 0.0);
        u.advance(4).unwrap();
        assert_eq!(u.steps(), 4);
        assert!((u.elapsed() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_tick_length() {
        assert!(Universe::default().with_tick_length(0.0).is_err());
        let mut u = Universe::default();
        assert_eq!(
            u.set_tick_length(f64::NAN).unwrap_err().to_string(),
            "invalid tick length NaN: must be finite and greater than zero"
        );
        assert_eq!(u.tick_length(), DEFAULT_TICK_LENGTH);
    }

    #[test]
    fn failed_tick_leaves_state_untouched() {
        let push = Force::from_components(1.0, 0.0, 0.0);
        let fields: Vec<Box<dyn Field>> = vec![
            Box::new(ConstantForce::new(push)),
            Box::new(Gravity::new(1.0)),
        ];
        let mut u = Universe::new(fields);
        u <<= body(1.0, 2.0);
        u <<= body(1.0, 2.0);
        let before = u.particles().to_vec();

        assert!(matches!(
            u.tick(),
            Err(MechanicsError::DegenerateConfiguration { .. })
        ));
        assert_eq!(u.particles(), &before[..]);
        assert_eq!(u.steps(), 0);
    }

    #[test]
    fn field_mut_downcasts() {
        let fields: Vec<Box<dyn Field>> = vec![Box::new(Gravity::new(1.0))];
        let mut u = Universe::new(fields);
        u.field_mut::<Gravity>(0).unwrap().g = 3.0;
        assert!(u.field_mut::<ConstantForce>(0).is_none());
        assert!(u.field_mut::<Gravity>(1).is_none());
        assert_eq!(u.fields()[0].name(), "gravity");
        assert_eq!(u.field_mut::<Gravity>(0).unwrap().g, 3.0);
    }

    #[test]
    fn centre_of_mass_and_momentum() {
        assert!(Universe::default().centre_of_mass().is_none());

        let mut u = Universe::default();
        u <<= body(1.0, 0.0).with_velocity(Velocity::from_components(3.0, 0.0, 0.0));
        u <<= body(3.0, 4.0).with_velocity(Velocity::from_components(-1.0, 0.0, 0.0));
        let com = u.centre_of_mass().unwrap();
        assert!((com.x - 3.0).abs() < 1e-12);
        assert!(u.total_momentum().norm() < 1e-12);
    }
}
