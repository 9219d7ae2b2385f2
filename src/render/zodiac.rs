//! Zodiac carousel rendering: a ring entity rotated by the carousel angle
//! with one disc per sign, each counter-rotated to stay upright.

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::render::bodies::HoverTarget;
use crate::types::{ActiveScene, FrameSet, SceneMember};
use crate::zodiac::{ZodiacCarousel, ZodiacSign, glyph_rotation};

const SIGN_RADIUS: f32 = 0.6;

/// The rotating parent of the sign discs.
#[derive(Component)]
pub struct ZodiacRing;

pub struct ZodiacRenderPlugin;

impl Plugin for ZodiacRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_carousel).add_systems(
            Update,
            sync_carousel
                .in_set(FrameSet::Present)
                .run_if(resource_equals(ActiveScene::Zodiac)),
        );
    }
}

fn spawn_carousel(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let disc = meshes.add(Circle::new(SIGN_RADIUS));
    let radius = config.zodiac.radius;

    commands
        .spawn((
            Transform::default(),
            Visibility::Hidden,
            ZodiacRing,
            SceneMember(ActiveScene::Zodiac),
        ))
        .with_children(|ring| {
            for sign in ZodiacSign::ALL {
                let color = sign.element().color();
                ring.spawn((
                    Mesh3d(disc.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: color,
                        emissive: color.to_linear() * 0.6,
                        double_sided: true,
                        cull_mode: None,
                        ..default()
                    })),
                    Transform::from_translation(sign.ring_position(radius))
                        .with_rotation(Quat::from_rotation_z(sign.base_rotation())),
                    sign,
                    HoverTarget {
                        radius: SIGN_RADIUS,
                    },
                ));
            }
        });
}

fn sync_carousel(
    carousel: Res<ZodiacCarousel>,
    mut ring: Query<&mut Transform, (With<ZodiacRing>, Without<ZodiacSign>)>,
    mut signs: Query<(&ZodiacSign, &mut Transform), Without<ZodiacRing>>,
) {
    if let Ok(mut transform) = ring.single_mut() {
        transform.rotation = Quat::from_rotation_z(carousel.angle);
    }
    for (sign, mut transform) in signs.iter_mut() {
        transform.rotation = Quat::from_rotation_z(glyph_rotation(*sign, carousel.angle));
    }
}
