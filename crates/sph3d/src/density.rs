//! Kernel-weighted density estimation.

use glam::Vec3;
use rayon::prelude::*;

use crate::kernels::smoothing_kernel;
use crate::particle::Particles3D;

/// Density at an arbitrary sample point: the kernel-weighted sum of every
/// particle's mass. Brute-force over all particles; a particle whose own
/// position is sampled contributes its full kernel value (self-inclusion),
/// which keeps densities strictly positive wherever particles exist.
pub fn compute_density(sample_point: Vec3, particles: &Particles3D, smoothing_radius: f32) -> f32 {
    let mut density = 0.0;
    // TODO: only visit particles within the smoothing radius once a spatial
    // index is worth the bookkeeping for the particle counts we run.
    for particle in &particles.list {
        let distance = (particle.position - sample_point).length();
        density += particle.mass * smoothing_kernel(distance, smoothing_radius);
    }
    density
}

/// Fill `densities[i]` with the density at particle `i`'s position.
///
/// Reads only the frame-start position snapshot, so the per-particle
/// evaluations are independent and run as a parallel map.
pub fn compute_all_densities(particles: &Particles3D, smoothing_radius: f32, densities: &mut [f32]) {
    debug_assert_eq!(
        densities.len(),
        particles.len(),
        "density array out of sync with particles"
    );
    densities
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, density)| {
            *density = compute_density(particles.list[i].position, particles, smoothing_radius);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::smoothing_kernel;

    #[test]
    fn test_density_of_empty_set_is_zero() {
        let particles = Particles3D::new();
        assert_eq!(compute_density(Vec3::ZERO, &particles, 25.0), 0.0);
    }

    #[test]
    fn test_self_contribution_at_own_position() {
        let mut particles = Particles3D::new();
        particles.spawn(Vec3::new(5.0, 5.0, 5.0), 10.0, 2.0);

        let h = 25.0;
        let density = compute_density(Vec3::new(5.0, 5.0, 5.0), &particles, h);
        let expected = 2.0 * smoothing_kernel(0.0, h);
        assert!((density - expected).abs() < 1e-6);
    }

    #[test]
    fn test_particles_outside_radius_contribute_nothing() {
        let mut particles = Particles3D::new();
        particles.spawn(Vec3::ZERO, 10.0, 1.0);
        particles.spawn(Vec3::new(100.0, 0.0, 0.0), 10.0, 1.0);

        let h = 25.0;
        let density = compute_density(Vec3::ZERO, &particles, h);
        let self_only = smoothing_kernel(0.0, h);
        assert!(
            (density - self_only).abs() < 1e-6,
            "Far particle leaked into density: {} vs {}",
            density,
            self_only
        );
    }

    #[test]
    fn test_density_is_nonnegative() {
        let mut particles = Particles3D::new();
        for i in 0..10 {
            particles.spawn(Vec3::splat(i as f32 * 3.0), 10.0, 1.0);
        }
        for p in particles.list.clone() {
            assert!(compute_density(p.position, &particles, 25.0) >= 0.0);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut particles = Particles3D::new();
        for i in 0..20 {
            particles.spawn(
                Vec3::new(i as f32 * 4.0, (i % 5) as f32 * 6.0, (i % 3) as f32 * 8.0),
                10.0,
                1.0,
            );
        }

        let h = 25.0;
        let mut parallel = vec![0.0; particles.len()];
        compute_all_densities(&particles, h, &mut parallel);

        for (i, &d) in parallel.iter().enumerate() {
            let sequential = compute_density(particles.list[i].position, &particles, h);
            assert_eq!(d, sequential, "Mismatch at particle {}", i);
        }
    }
}
