//! Session clock advancement.
//!
//! Every time-parameterised position (orbits, lunar nodes, zodiac carousel)
//! reads the clock's absolute `elapsed` value; the vehicle integrator reads
//! its scaled `delta`.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::types::{ActiveScene, FrameSet, SessionClock};

/// Plugin providing the session clock, the active scene and the per-frame
/// set ordering.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        let scale = app
            .world()
            .get_resource::<SceneConfig>()
            .map_or(1.0, |config| config.initial_time_scale);
        app.insert_resource(SessionClock::with_scale(scale))
            .init_resource::<ActiveScene>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Clock,
                    FrameSet::Simulate,
                    FrameSet::Present,
                )
                    .chain(),
            )
            .add_systems(Update, advance_clock.in_set(FrameSet::Clock));
    }
}

/// Advance the session clock by the real frame delta.
fn advance_clock(mut clock: ResMut<SessionClock>, time: Res<Time>) {
    clock.advance(time.delta_secs_f64());
}
