//! Lunar node (Rahu-Ketu) precession model.
//!
//! The Moon's orbit is inclined to the ecliptic; the two points where it
//! crosses the ecliptic are the nodes. The line joining them precesses
//! slowly westward. Rates are sped up far beyond the real 18.6-year cycle so
//! the motion is visible.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::types::{ActiveScene, DEG_TO_RAD, FrameSet, RAD_TO_DEG, SessionClock};

/// Node precession rate (rad per session second).
pub const NODAL_PRECESSION_RATE: f64 = 0.02;

/// Moon orbital rate (rad per session second).
pub const MOON_ORBIT_RATE: f64 = 0.5;

/// Inclination of the Moon's orbit to the ecliptic (degrees).
pub const ORBITAL_INCLINATION_DEG: f64 = 5.14;

/// Number of samples in the orbit polyline.
pub const ORBIT_SAMPLES: usize = 360;

/// Scene dimensions for the lunar-node scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LunarGeometry {
    pub moon_orbit_radius: f64,
    pub ecliptic_radius: f64,
    pub moon_size: f32,
    pub earth_radius: f32,
}

impl LunarGeometry {
    pub const STANDARD: LunarGeometry = LunarGeometry {
        moon_orbit_radius: 8.0,
        ecliptic_radius: 12.0,
        moon_size: 0.3,
        earth_radius: 1.0,
    };

    /// Smaller layout for narrow windows.
    pub const COMPACT: LunarGeometry = LunarGeometry {
        moon_orbit_radius: 6.0,
        ecliptic_radius: 10.0,
        moon_size: 0.25,
        earth_radius: 1.0,
    };

    pub fn for_layout(compact: bool) -> Self {
        if compact { Self::COMPACT } else { Self::STANDARD }
    }
}

/// Ascending (Rahu) and descending (Ketu) node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodalPositions {
    /// Rahu
    pub ascending: DVec3,
    /// Ketu
    pub descending: DVec3,
    /// Longitude of the ascending node (radians, unwrapped)
    pub nodal_angle: f64,
}

/// Node positions at session time `t`.
///
/// Both nodes lie on the ecliptic (`y == 0`) and are exact negations of
/// each other.
pub fn nodal_positions(t: f64, orbit_radius: f64) -> NodalPositions {
    let nodal_angle = t * NODAL_PRECESSION_RATE;
    let ascending = DVec3::new(
        orbit_radius * nodal_angle.cos(),
        0.0,
        orbit_radius * nodal_angle.sin(),
    );
    NodalPositions {
        ascending,
        descending: -ascending,
        nodal_angle,
    }
}

/// Point on the inclined orbit at orbital angle `angle`, for a node line at
/// `nodal_angle`.
pub fn inclined_orbit_point(angle: f64, nodal_angle: f64, orbit_radius: f64) -> DVec3 {
    let inclination = ORBITAL_INCLINATION_DEG * DEG_TO_RAD;
    DVec3::new(
        orbit_radius * angle.cos(),
        orbit_radius * inclination.sin() * (angle - nodal_angle).sin(),
        orbit_radius * angle.sin(),
    )
}

/// Moon position at session time `t`.
pub fn moon_position(t: f64, nodal_angle: f64, orbit_radius: f64) -> DVec3 {
    inclined_orbit_point(t * MOON_ORBIT_RATE, nodal_angle, orbit_radius)
}

/// Sample the inclined orbit as `samples` points at one-degree steps
/// (for the default sample count).
///
/// The polyline is open; callers close it by repeating the first point.
pub fn orbit_polyline(nodal_angle: f64, orbit_radius: f64, samples: usize) -> Vec<DVec3> {
    let samples = samples.max(3);
    (0..samples)
        .map(|i| {
            let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
            inclined_orbit_point(angle, nodal_angle, orbit_radius)
        })
        .collect()
}

/// Node line, moon and sampled orbit for the current frame.
#[derive(Resource, Clone, Debug)]
pub struct LunarState {
    pub geometry: LunarGeometry,
    pub nodes: NodalPositions,
    pub moon: DVec3,
    pub orbit: Vec<DVec3>,
}

impl LunarState {
    /// Recompute everything for session time `t`.
    pub fn at(t: f64, geometry: LunarGeometry) -> Self {
        let r = geometry.moon_orbit_radius;
        let nodes = nodal_positions(t, r);
        Self {
            geometry,
            nodes,
            moon: moon_position(t, nodes.nodal_angle, r),
            orbit: orbit_polyline(nodes.nodal_angle, r, ORBIT_SAMPLES),
        }
    }

    /// Node longitude in degrees, wrapped to `[0, 360)`.
    pub fn nodal_longitude_deg(&self) -> f64 {
        (self.nodes.nodal_angle * RAD_TO_DEG).rem_euclid(360.0)
    }
}

/// Plugin recomputing the node model while the lunar scene is active.
pub struct LunarPlugin;

impl Plugin for LunarPlugin {
    fn build(&self, app: &mut App) {
        let compact = app
            .world()
            .get_resource::<SceneConfig>()
            .is_some_and(|config| config.compact_layout);
        app.insert_resource(LunarState::at(0.0, LunarGeometry::for_layout(compact)))
            .add_systems(
                Update,
                update_lunar_state
                    .in_set(FrameSet::Simulate)
                    .run_if(resource_equals(ActiveScene::LunarNodes)),
            );
    }
}

fn update_lunar_state(clock: Res<SessionClock>, mut state: ResMut<LunarState>) {
    let geometry = state.geometry;
    *state = LunarState::at(clock.elapsed, geometry);
}

/// Which lunar-scene object an entity shows.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LunarMarker {
    Earth,
    Moon,
    Rahu,
    Ketu,
}

impl LunarMarker {
    pub fn label(&self) -> &'static str {
        match self {
            LunarMarker::Earth => "Earth",
            LunarMarker::Moon => "Moon",
            LunarMarker::Rahu => "Rahu (ascending node)",
            LunarMarker::Ketu => "Ketu (descending node)",
        }
    }

    /// Current position of this marker.
    pub fn position(&self, state: &LunarState) -> Vec3 {
        match self {
            LunarMarker::Earth => Vec3::ZERO,
            LunarMarker::Moon => state.moon.as_vec3(),
            LunarMarker::Rahu => state.nodes.ascending.as_vec3(),
            LunarMarker::Ketu => state.nodes.descending.as_vec3(),
        }
    }

    /// Info-panel text for this marker at the current node longitude.
    pub fn description(&self, state: &LunarState) -> String {
        let rahu = state.nodal_longitude_deg();
        match self {
            LunarMarker::Earth => {
                "Centre of the scene. The ecliptic is the plane of Earth's orbit around the Sun."
                    .to_string()
            }
            LunarMarker::Moon => format!(
                "Orbit inclined {ORBITAL_INCLINATION_DEG:.2}° to the ecliptic. \
                 It crosses the ecliptic only at Rahu and Ketu."
            ),
            LunarMarker::Rahu => format!(
                "Ascending node: the Moon crosses the ecliptic from south to north. \
                 Longitude {rahu:.1}°."
            ),
            LunarMarker::Ketu => format!(
                "Descending node: the Moon crosses the ecliptic from north to south. \
                 Longitude {:.1}°, always opposite Rahu.",
                (rahu + 180.0).rem_euclid(360.0)
            ),
        }
    }
}

/// Fixed captions in the lunar scene: the inclined orbit and the ecliptic.
pub fn plane_captions(geometry: &LunarGeometry) -> [(Vec3, String); 2] {
    let compact = geometry.moon_orbit_radius < LunarGeometry::STANDARD.moon_orbit_radius;
    let (lift, inset) = if compact { (1.0, 2.0) } else { (1.5, 3.0) };
    [
        (
            Vec3::new(0.0, (geometry.moon_orbit_radius + lift) as f32, 0.0),
            format!("Moon's Orbit (Inclined {ORBITAL_INCLINATION_DEG:.2}°)"),
        ),
        (
            Vec3::new((geometry.ecliptic_radius - inset) as f32, 0.0, 0.0),
            "Ecliptic Plane (Earth-Sun Orbital Plane)".to_string(),
        ),
    ]
}

/// Camera placement for the lunar-node scene.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LunarView {
    TopDown,
    #[default]
    Perspective,
    SideProfile,
}

impl LunarView {
    /// Next view in the C-key cycle.
    pub fn next(self) -> Self {
        match self {
            LunarView::TopDown => LunarView::Perspective,
            LunarView::Perspective => LunarView::SideProfile,
            LunarView::SideProfile => LunarView::TopDown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LunarView::TopDown => "Top-down",
            LunarView::Perspective => "Perspective",
            LunarView::SideProfile => "Side profile",
        }
    }

    /// Where the camera settles. It always looks at the origin.
    pub fn camera_position(&self, compact: bool) -> Vec3 {
        match (self, compact) {
            (LunarView::TopDown, false) => Vec3::new(0.0, 25.0, 0.0),
            (LunarView::TopDown, true) => Vec3::new(0.0, 20.0, 0.0),
            (LunarView::Perspective, false) => Vec3::new(20.0, 15.0, 20.0),
            (LunarView::Perspective, true) => Vec3::new(15.0, 12.0, 15.0),
            (LunarView::SideProfile, false) => Vec3::new(25.0, 0.0, 0.0),
            (LunarView::SideProfile, true) => Vec3::new(20.0, 0.0, 0.0),
        }
    }
}
