//! Centralized event definitions
//!
//! Commands reach the simulation only through [`SimulationCommand`] events, so
//! they always land between two ticks.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Return the particle to its start position and clear the history
    Restart,
    /// Stop ticking for good
    Stop,
}
