//! Shared tuning constants for the SPH simulation.

/// Horizontal velocity retained after a floor contact (simulated friction).
/// Applied to X and Y only, and only on the lower Z face.
pub const FLOOR_FRICTION: f32 = 0.9;

/// Densities at or below this are treated as empty space by the pressure
/// solver (skipped in the force sum, zero pressure acceleration).
pub const DENSITY_EPSILON: f32 = 1e-6;

/// Jitter factors at or below this disable jitter entirely during spawning.
pub const JITTER_EPSILON: f32 = 1e-4;

/// Default downward gravity magnitude (world units / s^2).
pub const DEFAULT_GRAVITY: f32 = 200.0;

/// Default rest density the equation of state relaxes toward.
pub const DEFAULT_TARGET_DENSITY: f32 = 3.0;

/// Default pressure stiffness for the linear equation of state.
pub const DEFAULT_PRESSURE_FACTOR: f32 = 500.0;

/// Default kernel support radius (world units).
pub const DEFAULT_SMOOTHING_RADIUS: f32 = 25.0;

/// Default fraction of normal velocity retained on a wall bounce.
pub const DEFAULT_RESTITUTION: f32 = 0.8;
