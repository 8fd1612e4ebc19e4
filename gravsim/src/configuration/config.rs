//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SimulationConfig`] – tick length and playback pacing
//! - [`FieldConfig`]      – the ordered list of force fields
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The lunar orbit seed written out as a scenario file:
//!
//! ```yaml
//! simulation:
//!   tick_length: 0.1        # seconds per tick
//!   ticks_per_frame: 200    # ticks between reported frames
//!   frames: 50
//!
//! fields:
//!   - gravity:
//!       g: 6.67408e-11
//!
//! particles:
//!   - name: moon
//!     mass: 7.342e22
//!     position: [384.4e6, 0.0, 34577302.3]
//!     velocity: { magnitude: 1022.0, plane: 0.0 }
//!     colour: grey
//!   - name: earth
//!     mass: 5.97237e24
//!     position: [0.0, 0.0, 0.0]
//!     colour: blue
//! ```
//!
//! Angles are in degrees. Omitted velocities and accelerations are zero, and
//! an omitted colour is black.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::error::MechanicsError;
use crate::simulation::universe::DEFAULT_TICK_LENGTH;

/// Ticks per reported frame when the file does not say
pub const DEFAULT_TICKS_PER_FRAME: u64 = 200;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Build error: {0}")]
    Build(#[from] MechanicsError),
}

/// Pacing of a run
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_length: f64,     // seconds per tick
    pub ticks_per_frame: u64, // physics ticks between two reported frames
    pub frames: u64,          // frames to report
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_length: DEFAULT_TICK_LENGTH,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            frames: 1,
        }
    }
}

/// A force field, written as a single-key map: `- gravity: { g: ... }`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldConfig {
    /// Pairwise Newtonian attraction with constant `g`
    Gravity { g: f64 },

    /// One fixed force applied to every particle every tick
    ConstantForce {
        magnitude: f64,
        #[serde(default)]
        plane: f64,
        #[serde(default)]
        z: f64,
    },
}

/// Polar vector: magnitude plus bearings in degrees
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct VectorConfig {
    pub magnitude: f64,
    #[serde(default)]
    pub plane: f64,
    #[serde(default)]
    pub z: f64,
}

/// Initial state of a single particle
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    #[serde(default)]
    pub name: String,
    pub mass: f64,
    #[serde(default = "origin")]
    pub position: Vec<f64>, // Cartesian [x, y, z]
    #[serde(default)]
    pub velocity: VectorConfig,
    #[serde(default)]
    pub acceleration: VectorConfig,
    #[serde(default)]
    pub colour: Option<String>,
}

fn origin() -> Vec<f64> {
    vec![0.0; 3]
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine would refuse or that make no sense to run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !(sim.tick_length.is_finite() && sim.tick_length > 0.0) {
            return Err(ConfigError::Validation(format!(
                "tick_length must be > 0, got {}",
                sim.tick_length
            )));
        }
        if sim.ticks_per_frame == 0 {
            return Err(ConfigError::Validation("ticks_per_frame must be > 0".to_string()));
        }

        for field in &self.fields {
            let finite = match field {
                FieldConfig::Gravity { g } => g.is_finite(),
                FieldConfig::ConstantForce { magnitude, plane, z } => {
                    magnitude.is_finite() && plane.is_finite() && z.is_finite()
                }
            };
            if !finite {
                return Err(ConfigError::Validation(format!(
                    "field {:?} has non-finite parameters",
                    field
                )));
            }
        }

        for (i, p) in self.particles.iter().enumerate() {
            if !(p.mass.is_finite() && p.mass > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "particle {} ({}) mass must be > 0, got {}",
                    i, p.name, p.mass
                )));
            }
            if p.position.len() != 3 || p.position.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "particle {} ({}) position must be 3 finite components, got {:?}",
                    i, p.name, p.position
                )));
            }
            for v in [&p.velocity, &p.acceleration] {
                if !(v.magnitude.is_finite() && v.plane.is_finite() && v.z.is_finite()) {
                    return Err(ConfigError::Validation(format!(
                        "particle {} ({}) has a non-finite vector {:?}",
                        i, p.name, v
                    )));
                }
            }
        }
        Ok(())
    }
}
