use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::DiagnosticsPlugin;
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::log::Level;
use bevy::log::LogPlugin;
use bevy::state::app::StatesPlugin;
use clap::Parser;
use fielddrift::cli::{Args, load_and_apply_config};
use fielddrift::plugins::simulation::SimulationPlugin;
use fielddrift::plugins::simulation_diagnostics::SimulationDiagnosticsPlugin;
use fielddrift::prelude::*;

fn main() -> AppExit {
    let args = Args::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.print_config {
        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                print!("{toml_string}");
                return AppExit::Success;
            }
            Err(e) => {
                eprintln!("Error: failed to serialize configuration: {e}");
                std::process::exit(1);
            }
        }
    }

    let wait = match config.runner.timestep() {
        Ok(wait) => wait,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(wait)),
        LogPlugin {
            level,
            ..default()
        },
        StatesPlugin,
        DiagnosticsPlugin,
        LogDiagnosticsPlugin::default(),
    ));

    info!(
        "Fielddrift v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );

    app.add_plugins((
        SimulationPlugin::with_config(config),
        SimulationDiagnosticsPlugin::default(),
    ));

    app.run()
}
