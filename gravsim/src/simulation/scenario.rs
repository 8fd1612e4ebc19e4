//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - the run pacing (`SimulationConfig`)
//! - the universe (particles at t = 0 and the active fields, in file order)

use log::info;

use crate::configuration::config::{
    ConfigError, FieldConfig, ParticleConfig, ScenarioConfig, SimulationConfig, VectorConfig,
};
use crate::simulation::coords::Coords;
use crate::simulation::direction::Direction;
use crate::simulation::error::MechanicsError;
use crate::simulation::fields::{ConstantForce, Field, Gravity, G_SI};
use crate::simulation::particle::Particle;
use crate::simulation::universe::Universe;
use crate::simulation::vectors::{kind::Kind, Force, Vector3D, Velocity};

/// Everything a run needs: the universe to step and how to pace it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub simulation: SimulationConfig,
    pub universe: Universe,
}

impl Scenario {
    /// Validates `cfg` first, so hand-built configs get the same checks as files
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Fields: map `FieldConfig` -> boxed runtime fields, order preserved
        let fields = cfg
            .fields
            .iter()
            .map(build_field)
            .collect::<Result<Vec<_>, _>>()?;

        let mut universe = Universe::new(fields).with_tick_length(cfg.simulation.tick_length)?;

        // Particles: map `ParticleConfig` -> runtime `Particle`
        for pc in &cfg.particles {
            universe.add_particle(build_particle(pc)?);
        }

        info!(
            "scenario built: {} particles, {} fields, tick {} s",
            universe.particles().len(),
            universe.fields().len(),
            universe.tick_length()
        );

        Ok(Self {
            simulation: cfg.simulation,
            universe,
        })
    }

    /// The moon circling the earth, inclined 5.14 degrees, under SI gravity
    pub fn lunar_orbit() -> Result<Self, MechanicsError> {
        let distance = 384.4e6;
        let inclination = 5.14_f64.to_radians();

        let moon = Particle::new(7.342e22)?
            .with_name("moon")
            .with_position(Coords::new(distance, 0.0, distance * inclination.tan()))
            .with_velocity(Velocity::new(1022.0, Direction::planar(0.0)?))
            .with_colour("grey");
        let earth = Particle::new(5.97237e24)?
            .with_name("earth")
            .with_colour("blue");

        let fields: Vec<Box<dyn Field>> = vec![Box::new(Gravity::new(G_SI))];
        let universe = Universe::new(fields) << moon << earth;

        Ok(Self {
            simulation: SimulationConfig::default(),
            universe,
        })
    }
}

fn build_field(fc: &FieldConfig) -> Result<Box<dyn Field>, MechanicsError> {
    let field: Box<dyn Field> = match *fc {
        FieldConfig::Gravity { g } => Box::new(Gravity::new(g)),
        FieldConfig::ConstantForce { magnitude, plane, z } => {
            Box::new(ConstantForce::new(Force::new(magnitude, Direction::new(plane, z)?)))
        }
    };
    Ok(field)
}

fn build_particle(pc: &ParticleConfig) -> Result<Particle, ConfigError> {
    let position = match pc.position.as_slice() {
        [x, y, z] => Coords::new(*x, *y, *z),
        _ => {
            return Err(ConfigError::Validation(format!(
                "particle {} position must have 3 components, got {:?}",
                pc.name, pc.position
            )))
        }
    };
    let mut particle = Particle::new(pc.mass)?
        .with_name(&pc.name)
        .with_position(position)
        .with_velocity(polar(&pc.velocity)?)
        .with_acceleration(polar(&pc.acceleration)?);
    if let Some(colour) = &pc.colour {
        particle.set_colour(colour.as_str());
    }
    Ok(particle)
}

fn polar<K: Kind>(vc: &VectorConfig) -> Result<Vector3D<K>, MechanicsError> {
    Ok(Vector3D::new(vc.magnitude, Direction::new(vc.plane, vc.z)?))
}
