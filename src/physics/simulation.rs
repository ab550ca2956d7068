//! The simulation aggregate
//!
//! [`Simulation`] owns the particle, the clock and the energy history, and
//! advances them one step per [`Simulation::tick`]. Each tick runs, in order:
//!
//! 1. advance the clock
//! 2. integrate with the field at the current position and the new clock
//! 3. apply the boundary policy
//! 4. sample energy at the resulting position and append it to the history
//!
//! Renderers read state through [`Simulation::snapshot`].

use crate::config::{ConfigError, SimulationConfig};
use crate::physics::boundary::{BoundaryPolicy, Reflection};
use crate::physics::energy::{EnergyHistory, EnergySample};
use crate::physics::field::{FieldSample, OscillatingField};
use crate::physics::integrators::{ChargedParticleAcceleration, Integrator, SymplecticEuler};
use crate::physics::math::{Scalar, Vector, is_finite_vector};
use bevy::prelude::*;
use std::collections::VecDeque;
use std::fmt;

/// One tick is one unit of simulation time
pub const STEP_DT: Scalar = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// The simulation was stopped and accepts no further ticks
    Stopped { clock: u64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Stopped { clock } => {
                write!(f, "Simulation stopped at tick {clock}; no further ticks accepted")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Kinematic state of the particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleState {
    pub position: Vector,
    pub velocity: Vector,
}

impl ParticleState {
    pub fn at_rest(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
        }
    }
}

/// Read-only view of everything a renderer may draw
#[derive(Debug, Clone, Copy)]
pub struct SimulationSnapshot<'a> {
    pub position: Vector,
    pub velocity: Vector,
    pub clock: u64,
    pub kinetic: &'a VecDeque<Scalar>,
    pub potential: &'a VecDeque<Scalar>,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub clock: u64,
    pub energy: EnergySample,
    pub reflection: Reflection,
}

#[derive(Resource)]
pub struct Simulation {
    field: OscillatingField,
    integrator: Box<dyn Integrator>,
    boundary: BoundaryPolicy,
    charge: Scalar,
    coupling: Scalar,
    start: Vector,
    particle: ParticleState,
    history: EnergyHistory,
    clock: u64,
    stopped: bool,
}

impl Simulation {
    /// Build a simulation, rejecting constants that would produce non-finite state
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SimulationConfig) -> Self {
        let physics = &config.physics;
        let start = Vector::new(physics.start_x, physics.start_y);

        Self {
            field: OscillatingField::new(config.field.spatial_scale, config.field.temporal_scale),
            integrator: Box::new(SymplecticEuler),
            boundary: BoundaryPolicy::new(
                Vector::new(physics.world_width, physics.world_height),
                physics.boundary,
            ),
            charge: physics.charge,
            coupling: physics.coupling_constant,
            start,
            particle: ParticleState::at_rest(start),
            history: EnergyHistory::new(config.history.capacity),
            clock: 0,
            stopped: false,
        }
    }

    /// Replace the integrator used for subsequent ticks
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> Result<TickReport, SimulationError> {
        if self.stopped {
            return Err(SimulationError::Stopped { clock: self.clock });
        }

        self.clock += 1;
        let time = self.time();

        let acceleration = ChargedParticleAcceleration {
            field: &self.field,
            time,
            charge: self.charge,
            coupling: self.coupling,
        };
        self.integrator.step(
            &mut self.particle.position,
            &mut self.particle.velocity,
            &acceleration,
            STEP_DT,
        );

        let reflection = self
            .boundary
            .apply(&mut self.particle.position, &mut self.particle.velocity);

        let energy = EnergySample::new(
            self.particle.velocity,
            self.field.potential_at(self.particle.position, time),
        );
        self.history.push(energy);

        debug_assert!(
            is_finite_vector(self.particle.position) && is_finite_vector(self.particle.velocity),
            "particle state became non-finite at tick {}",
            self.clock
        );

        Ok(TickReport {
            clock: self.clock,
            energy,
            reflection,
        })
    }

    /// Return to the starting position at rest with an empty history
    pub fn reset(&mut self) {
        self.particle = ParticleState::at_rest(self.start);
        self.history.clear();
        self.clock = 0;
    }

    /// Stop the simulation permanently
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn snapshot(&self) -> SimulationSnapshot<'_> {
        SimulationSnapshot {
            position: self.particle.position,
            velocity: self.particle.velocity,
            clock: self.clock,
            kinetic: self.history.kinetic(),
            potential: self.history.potential(),
        }
    }

    pub fn particle(&self) -> &ParticleState {
        &self.particle
    }

    pub fn history(&self) -> &EnergyHistory {
        &self.history
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Clock value as field time
    #[inline]
    pub fn time(&self) -> Scalar {
        self.clock as Scalar
    }

    pub fn charge(&self) -> Scalar {
        self.charge
    }

    pub fn field(&self) -> &OscillatingField {
        &self.field
    }

    pub fn boundary(&self) -> &BoundaryPolicy {
        &self.boundary
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    /// Field and potential at the particle's current position and time
    pub fn field_at_particle(&self) -> FieldSample {
        self.field.evaluate(self.particle.position, self.time())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(&SimulationConfig::default())
    }
}
