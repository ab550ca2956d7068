//! Action handlers for simulation commands

use crate::prelude::*;

pub fn handle_restart_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Restart) {
            continue;
        }

        info!("Restarting simulation at tick {}", simulation.clock());
        simulation.reset();
    }
}

pub fn handle_stop_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Stop) {
            continue;
        }

        simulation.stop();
        if *current_state.get() == AppState::Running {
            next_state.set(AppState::Stopped);
        }
    }
}

pub fn report_stopped(
    simulation: Res<Simulation>,
    config: Res<SimulationConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match simulation.history().latest() {
        Some(energy) => info!(
            "Simulation stopped at tick {}: position ({:.3}, {:.3}), kinetic {:.6}, potential {:.6}",
            simulation.clock(),
            simulation.particle().position.x,
            simulation.particle().position.y,
            energy.kinetic,
            energy.potential
        ),
        None => info!("Simulation stopped at tick {}", simulation.clock()),
    }

    if config.runner.exit_on_stop {
        exit.write(AppExit::Success);
    }
}
