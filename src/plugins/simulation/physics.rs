use crate::prelude::*;

pub fn advance_simulation(
    mut simulation: ResMut<Simulation>,
    config: Res<SimulationConfig>,
    mut commands_writer: EventWriter<SimulationCommand>,
) {
    if simulation.is_stopped() {
        return;
    }

    let report = match simulation.tick() {
        Ok(report) => report,
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };

    if report.reflection.any() {
        trace!(
            "Tick {}: reflected off boundary (x: {}, y: {})",
            report.clock, report.reflection.x, report.reflection.y
        );
    }

    if let Some(max_ticks) = config.runner.max_ticks {
        if report.clock >= max_ticks {
            // Further FixedUpdate runs in this frame must not tick past the limit
            simulation.stop();
            commands_writer.write(SimulationCommand::Stop);
        }
    }
}
