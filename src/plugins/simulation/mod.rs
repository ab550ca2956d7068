//! Simulation plugin - Self-contained plugin pattern
//!
//! This plugin owns the [`Simulation`] resource, ticks it once per
//! `FixedUpdate` while [`AppState::Running`], and applies
//! [`SimulationCommand`] events between ticks.

use crate::prelude::*;

mod actions;
mod physics;

use actions::{handle_restart_simulation_event, handle_stop_simulation_event, report_stopped};
use bevy::ecs::schedule::{LogLevel, ScheduleBuildSettings};
use physics::advance_simulation;

/// Ordering of the per-tick work in `FixedUpdate`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance the simulation by one tick
    Advance,
    /// Observe the state produced by the tick
    Record,
}

pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let (config, simulation) = match Simulation::from_config(&config) {
            Ok(simulation) => (config, simulation),
            Err(e) => {
                error!("Invalid simulation configuration: {}. Using defaults.", e);
                (SimulationConfig::default(), Simulation::default())
            }
        };

        // The timestep was checked by from_config
        let fixed_time = match config.runner.timestep() {
            Ok(timestep) => Time::<Fixed>::from_duration(timestep),
            Err(_) => Time::<Fixed>::default(),
        };
        app.insert_resource(fixed_time);
        app.insert_resource(config);
        app.insert_resource(simulation);

        app.init_state::<AppState>();
        app.add_event::<SimulationCommand>();

        app.edit_schedule(FixedUpdate, |schedule| {
            schedule.set_build_settings(ScheduleBuildSettings {
                ambiguity_detection: LogLevel::Warn,
                ..default()
            });
        });

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Advance.run_if(in_state(AppState::Running)),
                SimulationSet::Record.run_if(in_state(AppState::Running)),
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            advance_simulation.in_set(SimulationSet::Advance),
        );
        app.add_systems(
            Update,
            (handle_restart_simulation_event, handle_stop_simulation_event).chain(),
        );
        app.add_systems(OnEnter(AppState::Stopped), report_stopped);
    }
}
