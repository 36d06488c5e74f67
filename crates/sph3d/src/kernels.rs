//! SPH smoothing kernel functions for density and pressure evaluation.

use std::f32::consts::PI;

/// Quadratic falloff smoothing kernel with compact support.
///
/// Returns `(radius - distance)^2 / V` with `V = PI * radius^4 / 6`, and 0
/// for any distance at or beyond the support radius. Continuous at the
/// cutoff (both sides evaluate to 0).
#[inline]
pub fn smoothing_kernel(distance: f32, radius: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    let volume = PI * radius.powi(4) / 6.0;
    let offset = radius - distance;
    offset * offset / volume
}

/// Derivative of [`smoothing_kernel`] with respect to distance.
///
/// Zero at or beyond the support radius, non-positive inside it. Used as the
/// gradient magnitude in the pressure-force accumulation.
#[inline]
pub fn smoothing_kernel_derivative(distance: f32, radius: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    let scale = 12.0 / (PI * radius.powi(4));
    (distance - radius) * scale
}
