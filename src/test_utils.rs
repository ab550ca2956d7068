//! Test utilities for plugin testing

use bevy::prelude::*;

use crate::config::SimulationConfig;

/// Creates a minimal test app with core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::state::app::StatesPlugin,
        bevy::diagnostic::DiagnosticsPlugin,
    ));

    app
}

/// Default configuration with a fixed timestep long enough that `app.update()`
/// never runs `FixedUpdate` on its own; tests drive ticks explicitly
pub fn test_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.runner.tick_rate_hz = 1e-3;
    config.runner.exit_on_stop = false;
    config
}
