//! Equation of state and pairwise pressure forces.

use glam::Vec3;
use rand::Rng;

use crate::constants::DENSITY_EPSILON;
use crate::kernels::smoothing_kernel_derivative;
use crate::params::SphParams;
use crate::particle::Particles3D;

/// Linear equation of state.
///
/// Positive when local density is below the target (particles pull together
/// under the force sign used in [`compute_pressure_force`]), negative above
/// it. The `target - density` ordering is load-bearing: flipping it reverses
/// every pressure force in the simulation.
#[inline]
pub fn density_to_pressure(density: f32, params: &SphParams) -> f32 {
    params.pressure_factor * (params.target_density - density)
}

/// Symmetrized pressure for a particle pair: the mean of the two particles'
/// independently derived pressures. Symmetric in its arguments, so the pair
/// force comes out equal and opposite.
#[inline]
pub fn shared_pressure(density_a: f32, density_b: f32, params: &SphParams) -> f32 {
    let pressure_a = density_to_pressure(density_a, params);
    let pressure_b = density_to_pressure(density_b, params);
    (pressure_a + pressure_b) / 2.0
}

/// Uniformly distributed unit vector, used when two particles coincide
/// exactly and no direction can be derived from their offset.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Net pressure force on particle `index` from every other particle.
///
/// `densities` must be the density snapshot for the same frame (see
/// `compute_all_densities`). Neighbors with near-zero density are skipped
/// rather than dividing by zero; the self-contribution in the density pass
/// keeps densities strictly positive for any physical configuration, so the
/// guard only engages for degenerate setups.
///
/// Coincident particles (zero offset) get a random direction instead of a
/// singular one, injecting a finite repulsive impulse. The RNG is explicit so
/// the fallback is reproducible under a fixed seed.
pub fn compute_pressure_force(
    index: usize,
    particles: &Particles3D,
    densities: &[f32],
    params: &SphParams,
    rng: &mut impl Rng,
) -> Vec3 {
    let position = particles.list[index].position;
    let density_i = densities[index];
    let mut force = Vec3::ZERO;

    for (j, other) in particles.list.iter().enumerate() {
        if j == index {
            continue;
        }
        let density_j = densities[j];
        if density_j <= DENSITY_EPSILON {
            continue;
        }

        let offset = other.position - position;
        let distance = offset.length();
        let direction = if distance == 0.0 {
            random_unit_vector(rng)
        } else {
            offset / distance
        };

        let slope = smoothing_kernel_derivative(distance, params.smoothing_radius);
        let pressure = shared_pressure(density_j, density_i, params);
        force += pressure * slope * direction * other.mass / density_j;
    }

    force
}
