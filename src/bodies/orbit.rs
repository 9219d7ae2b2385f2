//! Closed-form body positions.
//!
//! Positions are pure functions of absolute session time. Nothing is
//! integrated frame-over-frame, so two calls with the same `(id, t)` return
//! the same point regardless of how many frames ran in between.

use std::f64::consts::TAU;

use bevy::math::DVec3;

use super::data::{BodyId, OrbitParams, orbit_params};

/// Ratio between the vertical oscillation frequency and the orbital one.
///
/// The `y` term is decorative; it does not model an inclined orbital plane.
pub const VERTICAL_OSCILLATION_RATIO: f64 = 0.1;

/// Radius of the Moon's circle around Earth.
pub const SATELLITE_RADIUS: f64 = 2.0;

/// Angular speed of the Moon around Earth (rad/s).
pub const SATELLITE_RATE: f64 = 0.6;

/// Height of the Moon above Earth's plane.
pub const SATELLITE_LIFT: f64 = 0.3;

/// Base ring radius of the static Individual layout.
pub const RING_LAYOUT_RADIUS: f64 = 6.0;

/// Ring radius of the Bird's-eye layout.
pub const BIRDS_EYE_RADIUS: f64 = 7.0;

/// How bodies are placed in the solar-system scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Bodies move along their orbits (overview)
    #[default]
    Orbiting,
    /// Bodies rest on a fixed ring for close inspection
    Ring,
    /// Planets spread evenly around the Sun, seen from above
    BirdsEye,
}

/// Position on a circular orbit at time `t` (seconds).
pub fn position_on_orbit(orbit: &OrbitParams, t: f64) -> DVec3 {
    let angle = t * orbit.angular_speed;
    DVec3::new(
        orbit.radius * angle.cos(),
        orbit.tilt_amplitude * (angle * VERTICAL_OSCILLATION_RATIO).sin(),
        orbit.radius * angle.sin(),
    )
}

/// Heliocentric position of a body at time `t`.
///
/// The reference body and bodies without a heliocentric orbit sit at the
/// origin; use [`body_position`] for satellites.
pub fn orbital_position(id: BodyId, t: f64) -> DVec3 {
    match orbit_params(id) {
        Some(orbit) => position_on_orbit(&orbit, t),
        None => DVec3::ZERO,
    }
}

/// Moon position relative to its parent's position.
pub fn satellite_position(parent: DVec3, t: f64) -> DVec3 {
    let angle = t * SATELLITE_RATE;
    parent
        + DVec3::new(
            SATELLITE_RADIUS * angle.cos(),
            SATELLITE_LIFT,
            SATELLITE_RADIUS * angle.sin(),
        )
}

/// Fixed position on the Individual ring layout.
pub fn ring_layout_position(id: BodyId) -> DVec3 {
    let Some(index) = id.focus_index() else {
        return DVec3::ZERO;
    };
    if index == 0 {
        return DVec3::ZERO;
    }
    let step = TAU / BodyId::FOCUS_ORDER.len() as f64;
    let radius = match id {
        BodyId::Mercury => RING_LAYOUT_RADIUS - 1.5,
        BodyId::Jupiter => RING_LAYOUT_RADIUS + 1.0,
        BodyId::Saturn => RING_LAYOUT_RADIUS + 1.5,
        _ => RING_LAYOUT_RADIUS,
    };
    let angle = (index - 1) as f64 * step;
    DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Fixed position on the Bird's-eye layout.
pub fn birds_eye_position(id: BodyId) -> DVec3 {
    let Some(index) = id.focus_index() else {
        return DVec3::ZERO;
    };
    if index == 0 {
        return DVec3::ZERO;
    }
    let planets = (BodyId::FOCUS_ORDER.len() - 1) as f64;
    let angle = (index - 1) as f64 * TAU / planets;
    DVec3::new(
        BIRDS_EYE_RADIUS * angle.cos(),
        0.0,
        BIRDS_EYE_RADIUS * angle.sin(),
    )
}

/// Position of any body, satellites included, under the given layout.
pub fn body_position(id: BodyId, layout: Layout, t: f64) -> DVec3 {
    if let Some(parent) = id.parent() {
        return satellite_position(body_position(parent, layout, t), t);
    }
    match layout {
        Layout::Orbiting => orbital_position(id, t),
        Layout::Ring => ring_layout_position(id),
        Layout::BirdsEye => birds_eye_position(id),
    }
}

/// Axial rotation angle (radians) at time `t`.
pub fn spin_angle(spin_rate: f32, t: f64) -> f32 {
    (t * spin_rate as f64).rem_euclid(TAU) as f32
}

/// Sample an orbit ring as a closed polyline in the reference plane.
pub fn orbit_ring(radius: f64, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = i as f64 / segments as f64 * TAU;
            DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        })
        .collect()
}
