//! Particle spawning on a jittered cubic lattice.

use glam::Vec3;
use rand::Rng;

use crate::constants::JITTER_EPSILON;
use crate::params::SphParams;
use crate::particle::Particles3D;

/// Spawn `N^3` stationary particles on a cubic lattice centered on the box
/// center, with each axis independently jittered by a uniform offset in
/// `[-jitter_factor, +jitter_factor]`.
///
/// The RNG is passed in explicitly so callers (and tests) control seeding.
/// A per-axis count below 1 is clamped to 1 with a warning.
pub fn spawn_grid(params: &SphParams, rng: &mut impl Rng) -> Particles3D {
    let mut count = params.particle_count_per_axis;
    if count < 1 {
        log::warn!(
            "particle_count_per_axis {} is below 1, clamping to 1",
            count
        );
        count = 1;
    }

    let spacing = params.grid_spacing;
    let total_span = if count > 1 {
        (count - 1) as f32 * spacing
    } else {
        0.0
    };
    let half_span = Vec3::splat(total_span / 2.0);
    let jitter = params.jitter_factor;

    let total = (count as usize).pow(3);
    let mut particles = Particles3D::with_capacity(total);

    for x in 0..count {
        for y in 0..count {
            for z in 0..count {
                let grid_pos = if count > 1 {
                    Vec3::new(x as f32, y as f32, z as f32) * spacing
                } else {
                    Vec3::ZERO
                };

                let mut position = params.box_center + grid_pos - half_span;

                if jitter > JITTER_EPSILON {
                    position.x += rng.gen::<f32>() * 2.0 * jitter - jitter;
                    position.y += rng.gen::<f32>() * 2.0 * jitter - jitter;
                    position.z += rng.gen::<f32>() * 2.0 * jitter - jitter;
                }

                particles.spawn(position, params.particle_radius, params.particle_mass);
            }
        }
    }

    log::info!("spawned {} particles", particles.len());
    particles
}
