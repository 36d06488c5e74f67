//! Headless settle diagnostic (terminal)
//!
//! Drops the default particle grid into the box and reports per-interval
//! statistics while the fluid settles.
//! Run: cargo run -p sph3d --example settle_diagnostic

use sph3d::{SphParams, SphSimulation3D, Vec3};

const DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 600;
const REPORT_EVERY: u32 = 60;

fn main() {
    let params = SphParams::default();
    let mut sim = SphSimulation3D::with_seed(params, 42).expect("default params are valid");

    println!("=== SPH SETTLE DIAGNOSTIC ===\n");
    println!("particles:        {}", sim.particle_count());
    let (min, max) = sim.bounds();
    println!("box:              {} .. {}", min, max);
    println!(
        "smoothing radius: {}, target density: {}\n",
        sim.params.smoothing_radius, sim.params.target_density
    );

    for frame in 1..=FRAMES {
        sim.step(DT);

        if frame % REPORT_EVERY == 0 {
            let states = sim.particle_states();
            let n = states.len() as f32;

            let avg_z = states.iter().map(|p| p.position.z).sum::<f32>() / n;
            let max_vel = states
                .iter()
                .map(|p| p.velocity.length())
                .fold(0.0f32, f32::max);
            let avg_density = sim.densities().iter().sum::<f32>() / n;
            let momentum: Vec3 = states.iter().map(|p| p.velocity * p.mass).sum();

            println!(
                "frame {:4}  avg_z {:8.2}  max_vel {:8.2}  avg_density {:.4}  |momentum| {:10.2}",
                frame,
                avg_z,
                max_vel,
                avg_density,
                momentum.length()
            );
        }
    }

    let nan_count = sim
        .particle_states()
        .iter()
        .filter(|p| !p.position.is_finite() || !p.velocity.is_finite())
        .count();
    println!("\nfinal frame: {}", sim.frame);
    println!("non-finite particles: {}", nan_count);
}
