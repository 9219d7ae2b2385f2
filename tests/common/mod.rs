//! Common test utilities for integration tests.

use std::time::Duration;

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use grahas::SimulationPlugin;
use grahas::config::SceneConfig;
use grahas::vehicle::{DriveInput, ObstacleField, StepOutcome, VehicleState, VehicleTuning, step};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One reference frame.
pub const FRAME: f32 = 1.0 / 60.0;

/// Headless app with every simulation plugin, default config, an empty
/// obstacle field and a fixed 60 fps clock.
pub fn simulation_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            FRAME,
        )))
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<AccumulatedMouseScroll>()
        .insert_resource(SceneConfig::default())
        .insert_resource(ObstacleField::empty())
        .add_plugins(SimulationPlugin::default());
    app
}

/// Press `key` for exactly one update.
pub fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

/// Run `frames` reference-rate steps of the integrator with a fixed input.
pub fn drive(
    mut state: VehicleState,
    input: DriveInput,
    field: &ObstacleField,
    frames: usize,
) -> Vec<StepOutcome> {
    let tuning = VehicleTuning::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut outcomes = Vec::with_capacity(frames);
    for i in 0..frames {
        let outcome = step(&state, &input, &tuning, field, &mut rng, FRAME, i as f32 * FRAME);
        state = outcome.state;
        outcomes.push(outcome);
    }
    outcomes
}

/// Throttle only.
pub fn throttle() -> DriveInput {
    DriveInput {
        throttle: true,
        ..DriveInput::default()
    }
}
