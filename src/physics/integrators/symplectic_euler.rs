//! Symplectic Euler integration method
//!
//! Velocity is advanced first from the acceleration at the current position,
//! then position is advanced with the new velocity. Swapping the two lines
//! turns this into explicit Euler and changes the trajectory.

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Symplectic Euler integrator (also known as semi-implicit Euler)
///
/// ```text
/// v(t+dt) = v(t) + a(x(t)) * dt
/// x(t+dt) = x(t) + v(t+dt) * dt
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let acceleration = field.at(*position);

        *velocity += acceleration * dt;

        *position += *velocity * dt;
    }

    fn name(&self) -> &'static str {
        "symplectic_euler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantAcceleration(Vector);

    impl AccelerationField for ConstantAcceleration {
        fn at(&self, _: Vector) -> Vector {
            self.0
        }
    }

    #[test]
    fn test_velocity_updated_before_position() {
        let integrator = SymplecticEuler;

        let mut position = Vector::new(1.0, 2.0);
        let mut velocity = Vector::new(0.5, 0.0);
        let field = ConstantAcceleration(Vector::new(0.25, -1.0));

        integrator.step(&mut position, &mut velocity, &field, 1.0);

        assert_eq!(velocity, Vector::new(0.75, -1.0));
        // Position moves by the new velocity, not the old one
        assert_eq!(position, Vector::new(1.75, 1.0));
    }

    #[test]
    fn test_zero_acceleration_is_uniform_motion() {
        let integrator = SymplecticEuler;

        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(3.0, -4.0);
        let field = ConstantAcceleration(Vector::ZERO);

        for _ in 0..10 {
            integrator.step(&mut position, &mut velocity, &field, 1.0);
        }

        assert_eq!(velocity, Vector::new(3.0, -4.0));
        assert_eq!(position, Vector::new(30.0, -40.0));
    }

    #[test]
    fn test_acceleration_sampled_at_start_of_step() {
        struct LinearInX;

        impl AccelerationField for LinearInX {
            fn at(&self, position: Vector) -> Vector {
                Vector::new(position.x, 0.0)
            }
        }

        let integrator = SymplecticEuler;
        let mut position = Vector::new(2.0, 0.0);
        let mut velocity = Vector::ZERO;

        integrator.step(&mut position, &mut velocity, &LinearInX, 0.5);

        assert_eq!(velocity, Vector::new(1.0, 0.0));
        assert_eq!(position, Vector::new(2.5, 0.0));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(SymplecticEuler.name(), "symplectic_euler");
    }
}
