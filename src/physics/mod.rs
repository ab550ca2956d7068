//! Simulation kernel: field, integration, boundaries and energy tracking

pub mod boundary;
pub mod energy;
pub mod field;
pub mod integrators;
pub mod math;
pub mod simulation;
