use bevy::prelude::*;

/// Run state of the simulation. `Stopped` is terminal.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Running,
    Stopped,
}
