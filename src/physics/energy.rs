//! Kinetic and potential energy tracking
//!
//! [`EnergyHistory`] keeps the most recent `capacity` samples in two parallel
//! queues, oldest first. Both queues always have the same length.

use crate::physics::math::{Scalar, Vector};
use std::collections::VecDeque;

/// Energy of the particle at the end of one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergySample {
    pub kinetic: Scalar,
    pub potential: Scalar,
}

impl EnergySample {
    /// Sample the energy of a unit-mass particle
    #[inline]
    pub fn new(velocity: Vector, potential: Scalar) -> Self {
        Self {
            kinetic: kinetic_energy(velocity),
            potential,
        }
    }

    #[inline]
    pub fn total(&self) -> Scalar {
        self.kinetic + self.potential
    }
}

/// Kinetic energy of a unit mass: `0.5 * |v|^2`
#[inline]
pub fn kinetic_energy(velocity: Vector) -> Scalar {
    0.5 * (velocity.x * velocity.x + velocity.y * velocity.y)
}

/// Fixed-capacity sliding window of energy samples
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyHistory {
    kinetic: VecDeque<Scalar>,
    potential: VecDeque<Scalar>,
    capacity: usize,
}

/// Samples reserved up front; larger windows grow as they fill
const PREALLOCATED_SAMPLES: usize = 1024;

impl EnergyHistory {
    /// Creates an empty history. Callers guarantee `capacity > 0`.
    pub fn new(capacity: usize) -> Self {
        let reserved = capacity.min(PREALLOCATED_SAMPLES);
        Self {
            kinetic: VecDeque::with_capacity(reserved),
            potential: VecDeque::with_capacity(reserved),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.kinetic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinetic.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Append a sample, evicting the oldest ones while over capacity
    pub fn push(&mut self, sample: EnergySample) {
        self.kinetic.push_back(sample.kinetic);
        self.potential.push_back(sample.potential);

        while self.kinetic.len() > self.capacity {
            self.kinetic.pop_front();
            self.potential.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.kinetic.clear();
        self.potential.clear();
    }

    pub fn kinetic(&self) -> &VecDeque<Scalar> {
        &self.kinetic
    }

    pub fn potential(&self) -> &VecDeque<Scalar> {
        &self.potential
    }

    pub fn latest(&self) -> Option<EnergySample> {
        Some(EnergySample {
            kinetic: *self.kinetic.back()?,
            potential: *self.potential.back()?,
        })
    }

    /// Samples oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = EnergySample> + '_ {
        self.kinetic
            .iter()
            .zip(self.potential.iter())
            .map(|(&kinetic, &potential)| EnergySample { kinetic, potential })
    }

    /// Smallest and largest value across both series, for plot scaling
    pub fn range(&self) -> Option<(Scalar, Scalar)> {
        self.kinetic
            .iter()
            .chain(self.potential.iter())
            .fold(None, |acc, &value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}
