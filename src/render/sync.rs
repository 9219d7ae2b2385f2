//! Position synchronization between the body model and rendering.
//!
//! Body transforms are recomputed from the session clock every frame, so
//! switching layouts or rescaling time never accumulates drift.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::bodies::{SolarSystem, body_position, spin_angle};
use crate::camera::{CameraMode, ViewMode, layout_for};
use crate::render::bodies::{CelestialBody, RING_SPIN_RATE, SaturnRings};
use crate::types::SessionClock;

/// Place each body for the current layout and spin it about +Y.
pub fn sync_body_transforms(
    mut query: Query<(&mut Transform, &CelestialBody)>,
    system: Res<SolarSystem>,
    clock: Res<SessionClock>,
    mode: Res<CameraMode>,
    view: Res<ViewMode>,
) {
    let layout = layout_for(*mode, *view);
    let t = clock.elapsed;

    for (mut transform, body) in query.iter_mut() {
        transform.translation = body_position(body.id, layout, t).as_vec3();
        let rate = system.get(body.id).map_or(0.0, |data| data.spin_rate);
        transform.rotation = Quat::from_rotation_y(spin_angle(rate, t));
    }
}

/// Turn Saturn's ring disc relative to the planet.
pub fn spin_saturn_rings(
    mut rings: Query<&mut Transform, With<SaturnRings>>,
    clock: Res<SessionClock>,
) {
    let angle = spin_angle(RING_SPIN_RATE, clock.elapsed);
    for mut transform in rings.iter_mut() {
        transform.rotation = Quat::from_rotation_y(angle) * Quat::from_rotation_x(-FRAC_PI_2);
    }
}
