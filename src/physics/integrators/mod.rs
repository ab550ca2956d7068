//! Numerical integration methods for the charged particle

use crate::physics::field::OscillatingField;
use crate::physics::math::{Scalar, Vector};

pub mod symplectic_euler;

pub use symplectic_euler::SymplecticEuler;

/// Acceleration as a function of position, frozen at one instant
pub trait AccelerationField {
    fn at(&self, position: Vector) -> Vector;
}

/// Acceleration of a unit-mass charge in an [`OscillatingField`]
///
/// `a = E(x, t) * charge * coupling`
#[derive(Debug, Clone, Copy)]
pub struct ChargedParticleAcceleration<'a> {
    pub field: &'a OscillatingField,
    pub time: Scalar,
    pub charge: Scalar,
    pub coupling: Scalar,
}

impl AccelerationField for ChargedParticleAcceleration<'_> {
    #[inline]
    fn at(&self, position: Vector) -> Vector {
        self.field.field_at(position, self.time) * self.charge * self.coupling
    }
}

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Advance a single particle's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity vector
    /// * `field` - Acceleration field evaluated at the start of the step
    /// * `dt` - Time step
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    );

    fn name(&self) -> &'static str;
}
