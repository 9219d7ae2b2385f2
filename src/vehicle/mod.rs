//! Drive scene: a point-mass car in a residential colony.
//!
//! The integrator itself is pure (see [`integrator::step`]); this module
//! wires it to keyboard state, the session clock and the render transform.

pub mod integrator;
pub mod obstacles;

#[cfg(test)]
mod proptest_vehicle;

pub use integrator::{DriveInput, Impact, StepOutcome, VehicleState, VehicleTuning, step};
pub use obstacles::{ObstacleClass, ObstacleError, ObstacleField, ObstacleProxy};

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::CameraShake;
use crate::config::SceneConfig;
use crate::types::{ActiveScene, FrameSet, SessionClock};

/// Current vehicle state.
#[derive(Resource, Clone, Debug, Default)]
pub struct Vehicle {
    pub state: VehicleState,
    /// Impacts this session (shown in the HUD)
    pub impacts: u32,
}

/// Random source for bounce perturbation and impact effects.
#[derive(Resource)]
pub struct VehicleRng(pub StdRng);

impl Default for VehicleRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Plugin for the drive scene simulation.
pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ObstacleField>() {
            app.insert_resource(colony_or_empty());
        }
        app.init_resource::<Vehicle>()
            .init_resource::<VehicleRng>()
            .init_resource::<DriveInputState>()
            .add_systems(
                Update,
                (
                    read_drive_input.in_set(FrameSet::Input),
                    integrate_vehicle.in_set(FrameSet::Simulate),
                )
                    .run_if(resource_equals(ActiveScene::Drive)),
            );
    }
}

/// Keys sampled this frame.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DriveInputState(pub DriveInput);

/// Map held keys to drive input.
pub fn drive_input_from_keys(keys: &ButtonInput<KeyCode>) -> DriveInput {
    DriveInput {
        throttle: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        brake: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        strafe_left: keys.pressed(KeyCode::KeyQ),
        strafe_right: keys.pressed(KeyCode::KeyE),
    }
}

fn colony_or_empty() -> ObstacleField {
    match ObstacleField::colony() {
        Ok(field) => {
            info!("Drive scene: {} obstacles", field.len());
            field
        }
        Err(e) => {
            warn!("Obstacle layout rejected ({e}); driving on an empty field");
            ObstacleField::empty()
        }
    }
}

fn read_drive_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<DriveInputState>) {
    input.0 = drive_input_from_keys(&keys);
}

/// Advance the vehicle one frame and hand impact shake to the camera.
fn integrate_vehicle(
    input: Res<DriveInputState>,
    clock: Res<SessionClock>,
    config: Res<SceneConfig>,
    field: Res<ObstacleField>,
    mut vehicle: ResMut<Vehicle>,
    mut rng: ResMut<VehicleRng>,
    mut shake: ResMut<CameraShake>,
) {
    let outcome = step(
        &vehicle.state,
        &input.0,
        &config.vehicle,
        &field,
        &mut rng.0,
        clock.delta_secs(),
        clock.elapsed as f32,
    );

    if outcome.reset {
        warn!("Vehicle state became non-finite; respawning");
    }
    if let Some(impact) = &outcome.impact {
        vehicle.impacts += 1;
        shake.add(impact.shake);
        debug!(
            "Impact with {} ({:?}) at speed {:.3}",
            impact.obstacle.name, impact.obstacle.class, impact.impact_speed
        );
    }
    vehicle.state = outcome.state;
}
