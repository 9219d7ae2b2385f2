//! Celestial body rendering and spawning.
//!
//! Handles the visual representation of the Sun, planets and the Moon.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::bodies::{BodyId, Layout, SolarSystem, all_bodies, body_position};
use crate::config::SceneConfig;
use crate::types::{ActiveScene, SceneMember};

/// Component marking an entity as a renderable celestial body.
#[derive(Component)]
pub struct CelestialBody {
    /// Identifier for this body.
    pub id: BodyId,
    /// Rendered sphere radius.
    pub radius: f32,
}

/// Anything the cursor can hover, with its pick radius.
#[derive(Component, Clone, Copy, Debug)]
pub struct HoverTarget {
    pub radius: f32,
}

/// Saturn's ring disc.
#[derive(Component)]
pub struct SaturnRings;

/// Rotation rate of Saturn's rings (rad per session second).
pub const RING_SPIN_RATE: f32 = 0.02;

/// Plugin providing celestial body spawning functionality.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SolarSystem>()
            .add_systems(Startup, spawn_solar_system);
    }
}

fn body_color(rgb: [f32; 3]) -> Color {
    Color::srgb(rgb[0], rgb[1], rgb[2])
}

/// Spawn every body at its starting orbital position.
fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut system: ResMut<SolarSystem>,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
) {
    let bodies = all_bodies();
    for body_data in &bodies {
        let id = body_data.id;
        let radius = body_data.visual_scale;
        let color = body_color(body_data.color);
        let texture = config
            .textures
            .then(|| asset_server.load::<Image>(body_data.texture));

        // Sun glows and carries the scene's point light
        let material = materials.add(StandardMaterial {
            base_color: if texture.is_some() { Color::WHITE } else { color },
            base_color_texture: texture,
            emissive: if id.is_reference() {
                color.to_linear() * 4.0
            } else {
                LinearRgba::BLACK
            },
            perceptual_roughness: 0.9,
            ..default()
        });

        let position = body_position(id, Layout::Orbiting, 0.0).as_vec3();
        let mut entity = commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(48, 24))),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            Visibility::default(),
            CelestialBody { id, radius },
            HoverTarget { radius },
            SceneMember(ActiveScene::SolarSystem),
        ));

        if id.is_reference() {
            entity.with_child((
                PointLight {
                    intensity: 4_000_000.0,
                    range: 100.0,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::default(),
            ));
        }

        if id == BodyId::Saturn {
            let ring_material = materials.add(StandardMaterial {
                base_color: Color::srgba(0.85, 0.75, 0.55, 0.8),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            });
            entity.with_child((
                Mesh3d(meshes.add(Annulus::new(radius * 1.3, radius * 2.1))),
                MeshMaterial3d(ring_material),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                SaturnRings,
            ));
        }

        let entity = entity.id();
        system.register(entity, id);
    }

    info!(
        "Spawned {} celestial bodies (textures: {})",
        bodies.len(),
        config.textures
    );
}
