//! Position integration and box collision response.

use glam::Vec3;

use crate::constants::FLOOR_FRICTION;
use crate::particle::Particles3D;

/// Integrate positions and resolve collisions against the axis-aligned box
/// `[bounds_min, bounds_max]`.
///
/// Each axis is tested independently against the freshly integrated position
/// (no re-evaluation after another axis corrects): a face penetration clamps
/// the particle's surface to the wall and scales that axis's velocity by
/// `-restitution`. Contact with the floor (lower Z face) additionally damps
/// the horizontal velocity components by [`FLOOR_FRICTION`]; the ceiling and
/// the side walls do not.
///
/// Per-particle work is independent; the loop runs sequentially.
pub fn resolve_box_collisions(
    particles: &mut Particles3D,
    bounds_min: Vec3,
    bounds_max: Vec3,
    restitution: f32,
    dt: f32,
) {
    for particle in &mut particles.list {
        particle.position += particle.velocity * dt;
        let r = particle.radius;

        if particle.position.x - r < bounds_min.x {
            particle.position.x = bounds_min.x + r;
            particle.velocity.x *= -restitution;
        } else if particle.position.x + r > bounds_max.x {
            particle.position.x = bounds_max.x - r;
            particle.velocity.x *= -restitution;
        }

        if particle.position.y - r < bounds_min.y {
            particle.position.y = bounds_min.y + r;
            particle.velocity.y *= -restitution;
        } else if particle.position.y + r > bounds_max.y {
            particle.position.y = bounds_max.y - r;
            particle.velocity.y *= -restitution;
        }

        if particle.position.z - r < bounds_min.z {
            particle.position.z = bounds_min.z + r;
            particle.velocity.z *= -restitution;
            // Floor contact only: friction against the ground plane.
            particle.velocity.x *= FLOOR_FRICTION;
            particle.velocity.y *= FLOOR_FRICTION;
        } else if particle.position.z + r > bounds_max.z {
            particle.position.z = bounds_max.z - r;
            particle.velocity.z *= -restitution;
        }
    }
}
