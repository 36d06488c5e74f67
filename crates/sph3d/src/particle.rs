//! Particle representation for the SPH simulation.

use glam::Vec3;

/// A single SPH particle.
///
/// A particle's identity is its index in [`Particles3D::list`]; the index is
/// stable for the lifetime of the simulation.
#[derive(Clone, Copy, Debug)]
pub struct Particle3D {
    /// World position
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Collision radius against the domain walls
    pub radius: f32,
    /// Mass used by the density and pressure sums
    pub mass: f32,
}

impl Particle3D {
    /// Create a new particle at the given position with zero velocity.
    pub fn new(position: Vec3, radius: f32, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            mass,
        }
    }
}

/// Collection of particles.
#[derive(Clone, Debug, Default)]
pub struct Particles3D {
    pub list: Vec<Particle3D>,
}

impl Particles3D {
    /// Create an empty particle collection.
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: Vec::with_capacity(capacity),
        }
    }

    /// Add a stationary particle.
    pub fn spawn(&mut self, position: Vec3, radius: f32, mass: f32) {
        self.list.push(Particle3D::new(position, radius, mass));
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Clear all particles.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}
