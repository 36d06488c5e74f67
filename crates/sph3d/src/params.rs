//! Simulation configuration.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRAVITY, DEFAULT_PRESSURE_FACTOR, DEFAULT_RESTITUTION, DEFAULT_SMOOTHING_RADIUS,
    DEFAULT_TARGET_DENSITY,
};

/// Tuning parameters for an SPH box simulation.
///
/// Defaults reproduce a small box of water-like fluid that settles within a
/// few hundred frames at 60 Hz.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SphParams {
    /// Center of the bounding box (world space).
    #[serde(with = "vec3_serde")]
    pub box_center: Vec3,
    /// Half-size of the bounding box per axis. All components must be > 0.
    #[serde(with = "vec3_serde")]
    pub box_half_extents: Vec3,
    /// Downward (-Z) gravity magnitude.
    pub gravity: f32,
    /// Fraction of normal velocity retained (sign-flipped) on a wall bounce.
    /// 0 = fully inelastic, 1 = perfectly elastic.
    pub restitution: f32,
    /// Rest density the equation of state relaxes toward.
    pub target_density: f32,
    /// Stiffness of the linear equation of state.
    pub pressure_factor: f32,
    /// Kernel support radius. Particles farther apart than this do not
    /// influence each other.
    pub smoothing_radius: f32,
    /// Particles per axis of the spawn lattice (N^3 total). Values below 1
    /// are clamped to 1 at spawn time.
    pub particle_count_per_axis: i32,
    /// Lattice spacing of the spawn grid.
    pub grid_spacing: f32,
    /// Per-axis uniform jitter amplitude applied to spawn positions.
    pub jitter_factor: f32,
    /// Collision radius of every particle.
    pub particle_radius: f32,
    /// Mass of every particle.
    pub particle_mass: f32,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            box_center: Vec3::ZERO,
            box_half_extents: Vec3::new(100.0, 200.0, 200.0),
            gravity: DEFAULT_GRAVITY,
            restitution: DEFAULT_RESTITUTION,
            target_density: DEFAULT_TARGET_DENSITY,
            pressure_factor: DEFAULT_PRESSURE_FACTOR,
            smoothing_radius: DEFAULT_SMOOTHING_RADIUS,
            particle_count_per_axis: 8,
            grid_spacing: 30.0,
            jitter_factor: 1.0,
            particle_radius: 10.0,
            particle_mass: 1.0,
        }
    }
}

/// Rejected configuration values.
///
/// A zero smoothing radius would make every density evaluate to zero and the
/// fluid silently stop being a fluid, so these are checked up front instead
/// of surfacing as degenerate physics.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamsError {
    NonPositiveSmoothingRadius(f32),
    NonPositiveHalfExtents(Vec3),
    RestitutionOutOfRange(f32),
    NonPositiveParticleRadius(f32),
    NonPositiveParticleMass(f32),
    NegativeGridSpacing(f32),
    NegativeJitter(f32),
    ParticleLargerThanBox { radius: f32, half_extents: Vec3 },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSmoothingRadius(r) => {
                write!(f, "smoothing radius must be > 0, got {}", r)
            }
            Self::NonPositiveHalfExtents(e) => {
                write!(f, "box half extents must be > 0 on every axis, got {}", e)
            }
            Self::RestitutionOutOfRange(r) => {
                write!(f, "restitution must be within [0, 1], got {}", r)
            }
            Self::NonPositiveParticleRadius(r) => {
                write!(f, "particle radius must be > 0, got {}", r)
            }
            Self::NonPositiveParticleMass(m) => {
                write!(f, "particle mass must be > 0, got {}", m)
            }
            Self::NegativeGridSpacing(s) => {
                write!(f, "grid spacing must be >= 0, got {}", s)
            }
            Self::NegativeJitter(j) => {
                write!(f, "jitter factor must be >= 0, got {}", j)
            }
            Self::ParticleLargerThanBox {
                radius,
                half_extents,
            } => write!(
                f,
                "particle radius {} does not fit inside half extents {}",
                radius, half_extents
            ),
        }
    }
}

impl std::error::Error for ParamsError {}

impl SphParams {
    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.smoothing_radius > 0.0) {
            return Err(ParamsError::NonPositiveSmoothingRadius(
                self.smoothing_radius,
            ));
        }
        if !(self.box_half_extents.min_element() > 0.0) {
            return Err(ParamsError::NonPositiveHalfExtents(self.box_half_extents));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ParamsError::RestitutionOutOfRange(self.restitution));
        }
        if !(self.particle_radius > 0.0) {
            return Err(ParamsError::NonPositiveParticleRadius(self.particle_radius));
        }
        if !(self.particle_mass > 0.0) {
            return Err(ParamsError::NonPositiveParticleMass(self.particle_mass));
        }
        if !(self.grid_spacing >= 0.0) {
            return Err(ParamsError::NegativeGridSpacing(self.grid_spacing));
        }
        if !(self.jitter_factor >= 0.0) {
            return Err(ParamsError::NegativeJitter(self.jitter_factor));
        }
        if self.particle_radius >= self.box_half_extents.min_element() {
            return Err(ParamsError::ParticleLargerThanBox {
                radius: self.particle_radius,
                half_extents: self.box_half_extents,
            });
        }
        Ok(())
    }

    /// World-space `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (
            self.box_center - self.box_half_extents,
            self.box_center + self.box_half_extents,
        )
    }

    /// Save configuration to a JSON file.
    pub fn save_json(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn load_json(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}

/// Custom serde module for Vec3 (glam doesn't have serde by default)
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Vec3Repr {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Vec3Repr {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let repr = Vec3Repr::deserialize(deserializer)?;
        Ok(Vec3::new(repr.x, repr.y, repr.z))
    }
}
