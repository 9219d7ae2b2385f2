//! Orbit and node-line rendering using Bevy Gizmos.
//!
//! Solar-system orbit rings and spin axes are drawn only in the Overview
//! view. The lunar scene draws the ecliptic, the inclined Moon orbit
//! (resampled every frame as the node line turns) and the node axis.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::bodies::orbit::orbit_ring;
use crate::bodies::SolarSystem;
use crate::camera::{ViewMode, show_orbit_decorations};
use crate::config::SceneConfig;
use crate::lunar::LunarState;
use crate::render::bodies::CelestialBody;
use crate::types::{ActiveScene, FrameSet};

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>().add_systems(
            Update,
            (
                draw_orbit_paths.run_if(resource_equals(ActiveScene::SolarSystem)),
                draw_lunar_geometry.run_if(resource_equals(ActiveScene::LunarNodes)),
                draw_zodiac_ring.run_if(resource_equals(ActiveScene::Zodiac)),
            )
                .after(FrameSet::Present),
        );
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Number of segments per orbit ring.
    pub segments: usize,
    /// Alpha value for orbit ring color.
    pub alpha: f32,
    /// Spin-axis indicator length as a multiple of the body radius.
    pub axis_length: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            segments: 128,
            alpha: 0.35,
            axis_length: 1.6,
        }
    }
}

/// Rahu is drawn red, Ketu blue.
pub const RAHU_COLOR: Color = Color::srgb(0.9, 0.25, 0.2);
pub const KETU_COLOR: Color = Color::srgb(0.25, 0.45, 0.95);

fn to_points(points: &[DVec3]) -> impl Iterator<Item = Vec3> + '_ {
    points.iter().map(|p| p.as_vec3())
}

/// Draw orbit rings and spin axes for orbiting planets.
fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    view: Res<ViewMode>,
    system: Res<SolarSystem>,
    bodies: Query<(&Transform, &CelestialBody)>,
) {
    if *view != ViewMode::Overview {
        return;
    }

    for data in system.iter() {
        if !show_orbit_decorations(data.id, *view) {
            continue;
        }
        let Some(orbit) = data.orbit else {
            continue;
        };
        let [r, g, b] = data.color;
        let ring = orbit_ring(orbit.radius, settings.segments);
        gizmos.linestrip(to_points(&ring), Color::srgba(r, g, b, settings.alpha));
    }

    for (transform, body) in bodies.iter() {
        if !show_orbit_decorations(body.id, *view) {
            continue;
        }
        let half = Vec3::Y * body.radius * settings.axis_length;
        let center = transform.translation;
        gizmos.line(center - half, center + half, Color::srgba(1.0, 1.0, 1.0, 0.5));
    }
}

/// Draw the ecliptic, the inclined Moon orbit and the node axis.
fn draw_lunar_geometry(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    state: Res<LunarState>,
) {
    let ecliptic = orbit_ring(state.geometry.ecliptic_radius, settings.segments);
    gizmos.linestrip(to_points(&ecliptic), Color::srgba(0.9, 0.8, 0.3, 0.5));

    // The sampled orbit is open; repeat the first point to close it
    let orbit = to_points(&state.orbit).chain(state.orbit.first().map(|p| p.as_vec3()));
    gizmos.linestrip(orbit, Color::srgba(0.8, 0.8, 0.9, 0.8));

    let rahu = state.nodes.ascending.as_vec3();
    let ketu = state.nodes.descending.as_vec3();
    gizmos.line(Vec3::ZERO, rahu, RAHU_COLOR);
    gizmos.line(Vec3::ZERO, ketu, KETU_COLOR);

    // Earth's axis for orientation
    gizmos.line(
        Vec3::NEG_Y * state.geometry.earth_radius * 2.0,
        Vec3::Y * state.geometry.earth_radius * 2.0,
        Color::srgba(1.0, 1.0, 1.0, 0.4),
    );
}

/// Draw the carousel's guide circle in the view plane.
fn draw_zodiac_ring(mut gizmos: Gizmos, settings: Res<OrbitPathSettings>, config: Res<SceneConfig>) {
    let ring = orbit_ring(config.zodiac.radius as f64, settings.segments);
    // Orbit rings lie in XZ; the carousel turns in XY
    let points = ring.iter().map(|p| Vec3::new(p.x as f32, p.z as f32, 0.0));
    gizmos.linestrip(points, Color::srgba(0.7, 0.6, 1.0, 0.3));
}
