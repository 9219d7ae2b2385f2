//! Lunar-node scene: Earth at the centre, the Moon on its inclined orbit,
//! and markers for Rahu and Ketu.

use bevy::prelude::*;

use crate::lunar::{LunarMarker, LunarState};
use crate::render::bodies::HoverTarget;
use crate::render::orbits::{KETU_COLOR, RAHU_COLOR};
use crate::types::{ActiveScene, FrameSet, SceneMember};

const NODE_MARKER_RADIUS: f32 = 0.35;

pub struct LunarRenderPlugin;

impl Plugin for LunarRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_lunar_scene).add_systems(
            Update,
            sync_lunar_markers
                .in_set(FrameSet::Present)
                .run_if(resource_equals(ActiveScene::LunarNodes)),
        );
    }
}

fn spawn_lunar_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<LunarState>,
) {
    let geometry = state.geometry;
    let markers = [
        (LunarMarker::Earth, geometry.earth_radius, Color::srgb(0.2, 0.5, 0.8)),
        (LunarMarker::Moon, geometry.moon_size, Color::srgb(0.8, 0.8, 0.8)),
        (LunarMarker::Rahu, NODE_MARKER_RADIUS, RAHU_COLOR),
        (LunarMarker::Ketu, NODE_MARKER_RADIUS, KETU_COLOR),
    ];

    for (marker, radius, color) in markers {
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(32, 16))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                ..default()
            })),
            Transform::from_translation(marker.position(&state)),
            Visibility::Hidden,
            marker,
            HoverTarget { radius },
            SceneMember(ActiveScene::LunarNodes),
        ));
    }
}

fn sync_lunar_markers(state: Res<LunarState>, mut markers: Query<(&LunarMarker, &mut Transform)>) {
    for (marker, mut transform) in markers.iter_mut() {
        transform.translation = marker.position(&state);
    }
}
