//! Property-based tests for the SPH simulation using proptest
//!
//! These tests verify physics invariants hold across random initial
//! conditions:
//! - No NaN values in positions/velocities
//! - Particle count conservation
//! - Spatial bounds containment

use glam::Vec3;
use proptest::prelude::*;
use sph3d::{Particles3D, SphParams, SphSimulation3D};

const HALF_EXTENT: f32 = 200.0;
const PARTICLE_RADIUS: f32 = 10.0;
const DT: f32 = 1.0 / 60.0;
const SIMULATION_STEPS: usize = 30;

fn test_params() -> SphParams {
    SphParams {
        box_center: Vec3::ZERO,
        box_half_extents: Vec3::splat(HALF_EXTENT),
        particle_radius: PARTICLE_RADIUS,
        ..Default::default()
    }
}

/// Strategy to generate positions inside the box with a radius margin
fn valid_position() -> impl Strategy<Value = Vec3> {
    let lo = -HALF_EXTENT + PARTICLE_RADIUS * 1.5;
    let hi = HALF_EXTENT - PARTICLE_RADIUS * 1.5;
    (lo..hi, lo..hi, lo..hi).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Strategy to generate reasonable initial velocities
fn valid_velocity() -> impl Strategy<Value = Vec3> {
    (-50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Strategy to generate a set of 4-64 particles
fn particle_set() -> impl Strategy<Value = (Vec<Vec3>, Vec<Vec3>)> {
    (4usize..=64).prop_flat_map(|count| {
        (
            prop::collection::vec(valid_position(), count..=count),
            prop::collection::vec(valid_velocity(), count..=count),
        )
    })
}

fn run_simulation(positions: Vec<Vec3>, velocities: Vec<Vec3>, seed: u64) -> SphSimulation3D {
    let params = test_params();
    let mut particles = Particles3D::new();
    for (pos, vel) in positions.iter().zip(velocities.iter()) {
        particles.spawn(*pos, params.particle_radius, params.particle_mass);
        particles.list.last_mut().unwrap().velocity = *vel;
    }

    let mut sim = SphSimulation3D::from_particles(params, particles, seed).unwrap();
    for _ in 0..SIMULATION_STEPS {
        sim.step(DT);
    }
    sim
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: particle state must never contain NaN or infinity
    #[test]
    fn test_no_nan_in_particle_state(
        (positions, velocities) in particle_set(),
        seed in any::<u64>(),
    ) {
        let sim = run_simulation(positions, velocities, seed);
        for (i, p) in sim.particle_states().iter().enumerate() {
            prop_assert!(
                p.position.is_finite(),
                "Particle {} position not finite: {}", i, p.position
            );
            prop_assert!(
                p.velocity.is_finite(),
                "Particle {} velocity not finite: {}", i, p.velocity
            );
        }
        for (i, &d) in sim.densities().iter().enumerate() {
            prop_assert!(d.is_finite() && d >= 0.0, "Density {} invalid: {}", i, d);
        }
    }

    /// Property: particle count is conserved across any number of steps
    #[test]
    fn test_particle_count_conserved(
        (positions, velocities) in particle_set(),
        seed in any::<u64>(),
    ) {
        let expected = positions.len();
        let sim = run_simulation(positions, velocities, seed);
        prop_assert_eq!(sim.particle_count(), expected);
        prop_assert_eq!(sim.densities().len(), expected);
    }

    /// Property: every particle stays inside the box, inflated by its radius
    #[test]
    fn test_particles_contained_in_box(
        (positions, velocities) in particle_set(),
        seed in any::<u64>(),
    ) {
        let sim = run_simulation(positions, velocities, seed);
        let (min, max) = sim.bounds();
        for (i, p) in sim.particle_states().iter().enumerate() {
            for axis in 0..3 {
                prop_assert!(
                    p.position[axis] - p.radius >= min[axis] - 1e-3
                        && p.position[axis] + p.radius <= max[axis] + 1e-3,
                    "Particle {} outside box on axis {}: {}", i, axis, p.position
                );
            }
        }
    }

    /// Property: a seeded run replays bit-identically
    #[test]
    fn test_seeded_run_is_deterministic(
        (positions, velocities) in particle_set(),
        seed in any::<u64>(),
    ) {
        let a = run_simulation(positions.clone(), velocities.clone(), seed);
        let b = run_simulation(positions, velocities, seed);
        for (pa, pb) in a.particle_states().iter().zip(b.particle_states()) {
            prop_assert_eq!(pa.position, pb.position);
            prop_assert_eq!(pa.velocity, pb.velocity);
        }
    }
}
