//! Force fields acting on every particle of a universe
//!
//! A field reads the current particle state and pushes forces into each
//! particle's acceleration through [`Particle::apply_force`]. Fields never
//! integrate; the universe ticks particles only after every field has run.

use std::any::Any;
use std::fmt;

use log::trace;

use super::coords::Coords;
use super::error::MechanicsError;
use super::particle::Particle;
use super::vectors::Force;

/// SI gravitational constant, m^3 kg^-1 s^-2
pub const G_SI: f64 = 6.67408e-11;

/// A rule that computes forces from global state and applies them
///
/// `step` is the universe's tick counter; current fields ignore it.
pub trait Field: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, step: u64, particles: &mut [Particle]) -> Result<(), MechanicsError>;

    /// Deep copy behind the trait object
    fn clone_box(&self) -> Box<dyn Field>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn Field> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Newtonian inverse-square attraction between every pair of particles
#[derive(Debug, Clone, PartialEq)]
pub struct Gravity {
    pub g: f64, // gravitational constant
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Force felt by `subject` from `actor`, pointing from subject towards actor
    ///
    /// Returns `None` when the two coincide or sit so close that the force is
    /// not a finite number.
    pub fn force_between(&self, subject: &Particle, actor: &Particle) -> Option<Force> {
        self.pair_force(
            (subject.position(), subject.mass()),
            (actor.position(), actor.mass()),
        )
    }

    fn pair_force(&self, subject: (Coords, f64), actor: (Coords, f64)) -> Option<Force> {
        let (x_s, m_s) = subject;
        let (x_a, m_a) = actor;
        let distance_sq = x_s.distance_to(&x_a).powi(2);
        if distance_sq == 0.0 {
            return None;
        }
        let magnitude = self.g * (m_s * m_a) / distance_sq;
        if !magnitude.is_finite() {
            return None;
        }
        Some(Force::new(magnitude, x_s.direction_to(&x_a)))
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(G_SI)
    }
}

impl Field for Gravity {
    fn name(&self) -> &'static str {
        "gravity"
    }

    /// Visits every ordered pair `(subject, actor)` with distinct indices and
    /// applies the pull of `actor` to `subject` only, so each particle sums the
    /// pull of all others exactly once.
    ///
    /// Coincident or near-coincident particles, whose pull would not be finite,
    /// fail the whole pass before any particle is touched.
    fn apply(&self, _step: u64, particles: &mut [Particle]) -> Result<(), MechanicsError> {
        let n = particles.len();
        if n < 2 {
            return Ok(());
        }

        // Positions and masses are read from a snapshot so that the state seen
        // by every pair is the state at the start of the pass
        let state: Vec<(Coords, f64)> = particles
            .iter()
            .map(|p| (p.position(), p.mass()))
            .collect();

        for i in 0..n {
            for j in (i + 1)..n {
                if self.pair_force(state[i], state[j]).is_none() {
                    return Err(MechanicsError::DegenerateConfiguration { subject: i, actor: j });
                }
            }
        }

        for (i, subject) in particles.iter_mut().enumerate() {
            for (j, actor) in state.iter().enumerate() {
                if i == j {
                    continue;
                }
                let force = self
                    .pair_force(state[i], *actor)
                    .ok_or(MechanicsError::DegenerateConfiguration { subject: i, actor: j })?;
                trace!("gravity on {} from {}: {}", i, j, force);
                subject.apply_force(&force);
            }
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The same force pushed onto every particle each tick
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantForce {
    pub force: Force,
}

impl ConstantForce {
    pub fn new(force: Force) -> Self {
        Self { force }
    }
}

impl Field for ConstantForce {
    fn name(&self) -> &'static str {
        "constant_force"
    }

    fn apply(&self, _step: u64, particles: &mut [Particle]) -> Result<(), MechanicsError> {
        for p in particles.iter_mut() {
            p.apply_force(&self.force);
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::direction::Direction;

    fn body(mass: f64, x: f64, y: f64, z: f64) -> Particle {
        Particle::new(mass).unwrap().with_position(Coords::new(x, y, z))
    }

    #[test]
    fn pair_force_is_inverse_square() {
        let g = Gravity::new(1.0);
        let a = body(2.0, 0.0, 0.0, 0.0);
        let near = body(3.0, 1.0, 0.0, 0.0);
        let far = body(3.0, 2.0, 0.0, 0.0);
        let f_near = g.force_between(&a, &near).unwrap();
        let f_far = g.force_between(&a, &far).unwrap();
        assert!((f_near.magnitude - 6.0).abs() < 1e-12);
        assert!((f_near.magnitude / f_far.magnitude - 4.0).abs() < 1e-12);
    }

    #[test]
    fn pair_force_points_at_actor() {
        let g = Gravity::new(1.0);
        let a = body(1.0, 0.0, 0.0, 0.0);
        let b = body(1.0, 0.0, -5.0, 0.0);
        let f = g.force_between(&a, &b).unwrap();
        assert!((f.direction.plane() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_pair_has_no_force() {
        let g = Gravity::new(1.0);
        let a = body(1.0, 1.0, 1.0, 1.0);
        assert!(g.force_between(&a, &a.clone()).is_none());
    }

    #[test]
    fn coincident_particles_fail_without_mutation() {
        let mut particles = vec![
            body(1.0, 0.0, 0.0, 0.0),
            body(1.0, 5.0, 0.0, 0.0),
            body(1.0, 5.0, 0.0, 0.0),
        ];
        let before = particles.clone();
        let err = Gravity::new(1.0).apply(0, &mut particles).unwrap_err();
        assert_eq!(err, MechanicsError::DegenerateConfiguration { subject: 1, actor: 2 });
        assert_eq!(particles, before);
    }

    #[test]
    fn near_coincident_particles_fail_without_mutation() {
        let mut particles = vec![body(1.0, 0.0, 0.0, 0.0), body(1.0, 1e-160, 0.0, 0.0)];
        let before = particles.clone();
        let err = Gravity::new(1.0).apply(0, &mut particles).unwrap_err();
        assert_eq!(err, MechanicsError::DegenerateConfiguration { subject: 0, actor: 1 });
        assert_eq!(particles, before);
    }

    #[test]
    fn overflowing_force_is_rejected() {
        let g = Gravity::new(1.0);
        let a = body(1e200, 0.0, 0.0, 0.0);
        let b = body(1e200, 1.0, 0.0, 0.0);
        assert!(g.force_between(&a, &b).is_none());
    }

    #[test]
    fn constant_force_reaches_every_particle() {
        let push = Force::new(10.0, Direction::new(20.0, 20.0).unwrap());
        let mut particles = vec![body(2.0, 0.0, 0.0, 0.0), body(5.0, 1.0, 0.0, 0.0)];
        ConstantForce::new(push).apply(0, &mut particles).unwrap();
        assert!((particles[0].acceleration().magnitude - 5.0).abs() < 1e-12);
        assert!((particles[1].acceleration().magnitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn boxed_clone_is_independent() {
        let original: Box<dyn Field> = Box::new(Gravity::new(1.0));
        let mut copy = original.clone();
        copy.as_any_mut().downcast_mut::<Gravity>().unwrap().g = 2.0;
        assert_eq!(original.as_any().downcast_ref::<Gravity>().unwrap().g, 1.0);
    }
}
