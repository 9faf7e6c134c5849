//! Bevy integration: steps an [`MpmState`] resource on the fixed schedule.

use bevy::prelude::*;

use crate::core::MpmState;

/// Adds a `FixedUpdate` system that advances the [`MpmState`] resource one
/// step per fixed tick. The resource must be inserted by the app.
///
/// A failing step is logged and the state resource is removed, which stops
/// the simulation.
pub struct MpmPlugin;

impl Plugin for MpmPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            step_simulation.run_if(resource_exists::<MpmState>),
        );
    }
}

fn step_simulation(mut commands: Commands, mut state: ResMut<MpmState>) {
    if let Err(err) = state.step() {
        log::error!(
            "MPM step {} failed, stopping simulation: {err}",
            state.step_index()
        );
        commands.remove_resource::<MpmState>();
    }
}
