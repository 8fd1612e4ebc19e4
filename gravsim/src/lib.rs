pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::bearing::bearing;
pub use simulation::direction::Direction;
pub use simulation::vectors::{Vector3D, Displacement, Velocity, Acceleration, Force};
pub use simulation::coords::{Coords, NVec3};
pub use simulation::particle::{Particle, Colour};
pub use simulation::fields::{Field, Gravity, ConstantForce, G_SI};
pub use simulation::universe::{Universe, DEFAULT_TICK_LENGTH};
pub use simulation::scenario::Scenario;
pub use simulation::error::MechanicsError;

pub use configuration::config::{ScenarioConfig, SimulationConfig, FieldConfig, ParticleConfig, VectorConfig, ConfigError};

pub use benchmark::benchmark::{bench_gravity, bench_tick_curve};
