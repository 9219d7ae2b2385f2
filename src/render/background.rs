//! Background rendering shared by every scene.
//!
//! Provides the starfield shell and a key light.

use bevy::prelude::*;
use rand::Rng;

/// Number of background stars.
const STAR_COUNT: usize = 1500;

/// Stars are scattered between these distances from the origin.
const STAR_SHELL: std::ops::Range<f32> = 300.0..600.0;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.02)))
            .add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Uniformly distributed point on a spherical shell.
fn random_shell_point(rng: &mut impl Rng, shell: std::ops::Range<f32>) -> Vec3 {
    let y: f32 = rng.gen_range(-1.0..1.0);
    let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - y * y).sqrt();
    let distance = rng.gen_range(shell);
    Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * distance
}

/// Spawn a starfield on a shell around every scene.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.6));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let position = random_shell_point(&mut rng, STAR_SHELL);
        let scale = rng.gen_range(0.5..1.5);
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Spawn the key light. The Sun adds its own point light in the solar scene.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(30.0, 50.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
