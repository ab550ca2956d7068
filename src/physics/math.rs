/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and field vectors
pub type Vector = bevy::math::DVec2;

/// Returns `true` when both components of `v` are finite
#[inline]
pub fn is_finite_vector(v: Vector) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
