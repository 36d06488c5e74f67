//! 3D SPH fluid simulation in a box.
//!
//! A smoothed-particle-hydrodynamics simulator: a fixed set of particles
//! advanced frame-by-frame under gravity, kernel-derived pressure forces and
//! elastic box collisions. The crate owns nothing but particle state; a
//! renderer or headless driver calls [`SphSimulation3D::step`] and reads
//! [`SphSimulation3D::particle_states`] afterwards.
//!
//! # Example
//!
//! ```
//! use sph3d::{SphParams, SphSimulation3D};
//!
//! let mut sim = SphSimulation3D::with_seed(SphParams::default(), 42).unwrap();
//! assert_eq!(sim.particle_count(), 512); // 8^3 grid
//!
//! for _ in 0..10 {
//!     sim.step(1.0 / 60.0);
//! }
//!
//! for state in sim.particle_states() {
//!     let _ = (state.position, state.velocity, state.radius);
//! }
//! ```

pub mod boundary;
pub mod constants;
pub mod density;
pub mod kernels;
pub mod params;
pub mod particle;
pub mod pressure;
pub mod spawn;

pub use glam::Vec3;
pub use params::{ParamsError, SphParams};
pub use particle::{Particle3D, Particles3D};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use constants::DENSITY_EPSILON;

/// 3D SPH box simulation.
///
/// Owns the particle set and the per-particle density cache (always the same
/// length; the cache is recomputed at the start of every step and consumed by
/// the pressure phase of the same frame). A step must not be re-entered
/// concurrently for the same simulation.
pub struct SphSimulation3D {
    /// Simulation tuning. Treated as read-only between resets.
    pub params: SphParams,
    /// All particles in the simulation.
    pub particles: Particles3D,
    /// Density at each particle's position, index-parallel with `particles`.
    densities: Vec<f32>,
    /// Current simulation frame.
    pub frame: u32,
    /// Base seed for spawn jitter and the coincident-particle direction
    /// fallback. Fixed at construction, so a seeded simulation replays.
    seed: u64,
}

impl SphSimulation3D {
    /// Create a simulation with a fresh random seed.
    pub fn new(params: SphParams) -> Result<Self, ParamsError> {
        Self::with_seed(params, rand::random())
    }

    /// Create a simulation with a fixed seed. Spawn jitter and the
    /// degenerate-direction fallback become reproducible.
    pub fn with_seed(params: SphParams, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;

        let mut sim = Self {
            params,
            particles: Particles3D::new(),
            densities: Vec::new(),
            frame: 0,
            seed,
        };
        sim.respawn();
        Ok(sim)
    }

    /// Create a simulation from an externally supplied particle placement.
    /// The placements are settled into the box before the first frame.
    pub fn from_particles(
        params: SphParams,
        particles: Particles3D,
        seed: u64,
    ) -> Result<Self, ParamsError> {
        params.validate()?;

        let densities = vec![0.0; particles.len()];
        let mut sim = Self {
            params,
            particles,
            densities,
            frame: 0,
            seed,
        };
        sim.settle_spawn();
        Ok(sim)
    }

    /// Destroy and regenerate the full particle set. All-or-nothing: the
    /// density cache is rebuilt in lockstep with the particle list.
    pub fn reset(&mut self, params: SphParams) -> Result<(), ParamsError> {
        params.validate()?;
        self.params = params;
        self.frame = 0;
        self.respawn();
        Ok(())
    }

    fn respawn(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.particles = spawn::spawn_grid(&self.params, &mut rng);
        self.densities = vec![0.0; self.particles.len()];
        self.settle_spawn();
    }

    /// Zero-dt collision pass so jittered or externally supplied placements
    /// start inside the box.
    fn settle_spawn(&mut self) {
        let (min, max) = self.params.bounds();
        boundary::resolve_box_collisions(
            &mut self.particles,
            min,
            max,
            self.params.restitution,
            0.0,
        );
    }

    /// Advance the simulation by one frame.
    ///
    /// Three phases with a barrier between each:
    /// 1. densities for every particle (parallel map over the frame-start
    ///    position snapshot);
    /// 2. gravity plus pressure acceleration applied to velocities (parallel
    ///    map reading only the position and density snapshots);
    /// 3. position integration and box collision response.
    pub fn step(&mut self, dt: f32) {
        debug_assert!(dt > 0.0 && dt.is_finite(), "Invalid timestep: {}", dt);
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        if self.particles.is_empty() {
            return;
        }
        debug_assert_eq!(
            self.densities.len(),
            self.particles.len(),
            "density cache out of sync with particles"
        );

        // 1. Density snapshot for this frame.
        density::compute_all_densities(
            &self.particles,
            self.params.smoothing_radius,
            &mut self.densities,
        );

        // 2. Velocity update from gravity and pressure. Each particle reads
        // only the snapshots, so the map commits independently per particle.
        let particles = &self.particles;
        let densities = &self.densities;
        let params = &self.params;
        let gravity_dv = Vec3::NEG_Z * params.gravity * dt;
        let frame_seed = self.seed ^ ((self.frame as u64) << 32);

        let velocity_deltas: Vec<Vec3> = (0..particles.len())
            .into_par_iter()
            .map(|i| {
                // Per-particle stream keeps the coincident-direction fallback
                // reproducible and race-free inside the parallel map.
                let mut rng = ChaCha8Rng::seed_from_u64(frame_seed.wrapping_add(i as u64));
                let force =
                    pressure::compute_pressure_force(i, particles, densities, params, &mut rng);

                let density = densities[i];
                let pressure_acceleration = if density > DENSITY_EPSILON {
                    force / density
                } else {
                    Vec3::ZERO
                };

                gravity_dv + pressure_acceleration * dt
            })
            .collect();

        self.particles
            .list
            .iter_mut()
            .zip(velocity_deltas.iter())
            .for_each(|(p, dv)| p.velocity += *dv);

        // 3. Integrate and collide against the box walls.
        let (min, max) = self.params.bounds();
        boundary::resolve_box_collisions(
            &mut self.particles,
            min,
            max,
            self.params.restitution,
            dt,
        );

        self.frame += 1;
    }

    /// Read-only snapshot of all particle states for a renderer.
    pub fn particle_states(&self) -> &[Particle3D] {
        &self.particles.list
    }

    /// Density at each particle's position, as of the last completed step.
    pub fn densities(&self) -> &[f32] {
        &self.densities
    }

    /// Total particle count.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// World bounds as `(min, max)` corners.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.params.bounds()
    }
}
