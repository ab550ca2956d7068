//! Simulation diagnostics module.
//!
//! Publishes the particle's energy and position through Bevy's diagnostic
//! system after every tick, so they show up in `LogDiagnosticsPlugin` output
//! and any other diagnostics consumer:
//!
//! - `energy/kinetic`, `energy/potential`, `energy/total`
//! - `particle/x`, `particle/y`
//!
//! ```rust,ignore
//! app.add_plugins(SimulationDiagnosticsPlugin::default());
//! ```

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::diagnostic::DEFAULT_MAX_HISTORY_LENGTH;
use bevy::diagnostic::Diagnostic;
use bevy::diagnostic::DiagnosticPath;
use bevy::diagnostic::Diagnostics;
use bevy::diagnostic::RegisterDiagnostic;

pub struct SimulationDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
}

impl Default for SimulationDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.0,
        }
    }
}

impl SimulationDiagnosticsPlugin {
    pub const KINETIC_ENERGY_PATH: DiagnosticPath = DiagnosticPath::const_new("energy/kinetic");
    pub const POTENTIAL_ENERGY_PATH: DiagnosticPath =
        DiagnosticPath::const_new("energy/potential");
    pub const TOTAL_ENERGY_PATH: DiagnosticPath = DiagnosticPath::const_new("energy/total");

    pub const PARTICLE_X_PATH: DiagnosticPath = DiagnosticPath::const_new("particle/x");
    pub const PARTICLE_Y_PATH: DiagnosticPath = DiagnosticPath::const_new("particle/y");

    pub const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] = &[
        Self::KINETIC_ENERGY_PATH,
        Self::POTENTIAL_ENERGY_PATH,
        Self::TOTAL_ENERGY_PATH,
        Self::PARTICLE_X_PATH,
        Self::PARTICLE_Y_PATH,
    ];

    pub fn with_max_history_length(mut self, max_history_length: usize) -> Self {
        self.max_history_length = max_history_length;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            app.register_diagnostic(
                Diagnostic::new(path.clone())
                    .with_max_history_length(self.max_history_length)
                    .with_smoothing_factor(self.smoothing_factor),
            );
        }
    }

    fn record_measurements(simulation: Res<Simulation>, mut diagnostics: Diagnostics) {
        let Some(energy) = simulation.history().latest() else {
            return;
        };
        let position = simulation.particle().position;

        diagnostics.add_measurement(&Self::KINETIC_ENERGY_PATH, || energy.kinetic);
        diagnostics.add_measurement(&Self::POTENTIAL_ENERGY_PATH, || energy.potential);
        diagnostics.add_measurement(&Self::TOTAL_ENERGY_PATH, || energy.total());
        diagnostics.add_measurement(&Self::PARTICLE_X_PATH, || position.x);
        diagnostics.add_measurement(&Self::PARTICLE_Y_PATH, || position.y);
    }
}

impl Plugin for SimulationDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        self.register_diagnostics(app);

        app.add_systems(
            FixedUpdate,
            Self::record_measurements.in_set(SimulationSet::Record),
        );
    }
}
