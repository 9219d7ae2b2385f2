//! Drive scene rendering: ground, obstacle proxies and the car.
//!
//! Obstacles are drawn as cylinders matching their collision circles, so
//! what the player sees is exactly what the integrator tests against.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::types::{ActiveScene, FrameSet, SceneMember};
use crate::vehicle::{ObstacleClass, ObstacleField, Vehicle};

const GROUND_SIZE: f32 = 240.0;

/// Root of the car hierarchy; follows the vehicle state.
#[derive(Component)]
pub struct CarBody;

/// A wheel; front wheels also steer.
#[derive(Component, Clone, Copy, Debug)]
pub struct Wheel {
    pub front: bool,
}

pub struct DriveRenderPlugin;

impl Plugin for DriveRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_ground_and_obstacles, spawn_car))
            .add_systems(
                Update,
                sync_car
                    .in_set(FrameSet::Present)
                    .run_if(resource_equals(ActiveScene::Drive)),
            );
    }
}

/// Rendered height of an obstacle.
fn obstacle_height(class: ObstacleClass) -> f32 {
    match class {
        ObstacleClass::Small => 1.5,
        ObstacleClass::Building => 5.0,
        ObstacleClass::Estate => 7.0,
        ObstacleClass::Monument => 9.0,
    }
}

fn obstacle_color(class: ObstacleClass) -> Color {
    match class {
        ObstacleClass::Small => Color::srgb(0.35, 0.55, 0.3),
        ObstacleClass::Building => Color::srgb(0.75, 0.7, 0.6),
        ObstacleClass::Estate => Color::srgb(0.85, 0.8, 0.7),
        ObstacleClass::Monument => Color::srgb(0.9, 0.75, 0.3),
    }
}

fn spawn_ground_and_obstacles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<ObstacleField>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.3, 0.25),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        SceneMember(ActiveScene::Drive),
    ));

    for obstacle in field.iter() {
        let height = obstacle_height(obstacle.class);
        commands.spawn((
            Mesh3d(meshes.add(Cylinder::new(obstacle.radius, height))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: obstacle_color(obstacle.class),
                ..default()
            })),
            Transform::from_xyz(obstacle.center.x, height * 0.5, obstacle.center.y),
            Visibility::Hidden,
            SceneMember(ActiveScene::Drive),
            Name::new(obstacle.name.clone()),
        ));
    }

    info!("Drive scene ground and {} obstacles spawned", field.len());
}

fn spawn_car(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let wheel_radius = config.vehicle.wheel_radius;
    let paint = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.1, 0.1),
        metallic: 0.6,
        perceptual_roughness: 0.4,
        ..default()
    });
    let glass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.1, 0.15),
        perceptual_roughness: 0.1,
        ..default()
    });
    let rubber = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.05, 0.05),
        ..default()
    });
    let wheel_mesh = meshes.add(Cylinder::new(wheel_radius, 0.25));

    commands
        .spawn((
            Transform::default(),
            Visibility::Hidden,
            CarBody,
            SceneMember(ActiveScene::Drive),
        ))
        .with_children(|car| {
            // Car faces -Z at zero yaw
            car.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.6, 0.5, 3.2))),
                MeshMaterial3d(paint.clone()),
                Transform::from_xyz(0.0, wheel_radius + 0.25, 0.0),
            ));
            car.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.3, 0.45, 1.5))),
                MeshMaterial3d(glass),
                Transform::from_xyz(0.0, wheel_radius + 0.72, 0.2),
            ));
            for (x, z, front) in [
                (-0.85, -1.05, true),
                (0.85, -1.05, true),
                (-0.85, 1.05, false),
                (0.85, 1.05, false),
            ] {
                car.spawn((
                    Mesh3d(wheel_mesh.clone()),
                    MeshMaterial3d(rubber.clone()),
                    Transform::from_xyz(x, wheel_radius, z)
                        .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                    Wheel { front },
                ));
            }
        });
}

/// Wheel orientation: steer about Y, roll about the axle, then lay the
/// cylinder on its side.
fn wheel_rotation(wheel: Wheel, steer_angle: f32, wheel_spin: f32) -> Quat {
    let steer = if wheel.front { steer_angle } else { 0.0 };
    Quat::from_rotation_y(steer) * Quat::from_rotation_x(-wheel_spin) * Quat::from_rotation_z(FRAC_PI_2)
}

fn sync_car(
    vehicle: Res<Vehicle>,
    mut car: Query<&mut Transform, (With<CarBody>, Without<Wheel>)>,
    mut wheels: Query<(&Wheel, &mut Transform), Without<CarBody>>,
) {
    let state = &vehicle.state;
    if let Ok(mut transform) = car.single_mut() {
        *transform = state.transform();
    }
    for (wheel, mut transform) in wheels.iter_mut() {
        transform.rotation = wheel_rotation(*wheel, state.steer_angle, state.wheel_spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rear_wheels_do_not_steer() {
        let rear = wheel_rotation(Wheel { front: false }, 0.5, 0.0);
        let straight = wheel_rotation(Wheel { front: false }, 0.0, 0.0);
        assert!(rear.angle_between(straight) < 1e-5);

        let front = wheel_rotation(Wheel { front: true }, 0.5, 0.0);
        assert!((front.angle_between(straight) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_taller_obstacles_for_bigger_classes() {
        assert!(obstacle_height(ObstacleClass::Small) < obstacle_height(ObstacleClass::Building));
        assert!(obstacle_height(ObstacleClass::Estate) < obstacle_height(ObstacleClass::Monument));
    }
}
