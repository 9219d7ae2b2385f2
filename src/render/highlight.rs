//! Hover highlighting for bodies, lunar markers and zodiac signs.
//!
//! Picking casts the cursor ray against each visible [`HoverTarget`]'s
//! bounding sphere and keeps the nearest hit.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::MainCamera;
use crate::render::bodies::HoverTarget;
use crate::types::FrameSet;

/// Pick spheres are slightly larger than the drawn ones.
const PICK_MARGIN: f32 = 1.2;

/// Plugin providing hover highlighting.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredEntity>().add_systems(
            Update,
            (detect_hover, draw_highlight).chain().after(FrameSet::Present),
        );
    }
}

/// Resource tracking the currently hovered entity.
#[derive(Resource, Default)]
pub struct HoveredEntity {
    pub entity: Option<Entity>,
}

/// Distance along a unit-direction ray to the first intersection with a
/// sphere, if the sphere is in front of the origin.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near < 0.0 {
        Some(far)
    } else {
        Some(near)
    }
}

/// Find the visible target under the cursor.
fn detect_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    targets: Query<(Entity, &GlobalTransform, &HoverTarget, &InheritedVisibility)>,
    mut hovered: ResMut<HoveredEntity>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let Some(cursor_pos) = window.cursor_position() else {
        hovered.entity = None;
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        hovered.entity = None;
        return;
    };

    let mut closest: Option<(Entity, f32)> = None;
    for (entity, transform, target, visibility) in targets.iter() {
        if !visibility.get() {
            continue;
        }
        let center = transform.translation();
        let Some(distance) =
            ray_sphere_hit(ray.origin, *ray.direction, center, target.radius * PICK_MARGIN)
        else {
            continue;
        };
        if closest.is_none_or(|(_, d)| distance < d) {
            closest = Some((entity, distance));
        }
    }

    hovered.entity = closest.map(|(e, _)| e);
}

/// Draw a camera-facing ring around the hovered target.
fn draw_highlight(
    mut gizmos: Gizmos,
    hovered: Res<HoveredEntity>,
    targets: Query<(&GlobalTransform, &HoverTarget)>,
    camera_query: Query<&GlobalTransform, With<MainCamera>>,
) {
    let Some(entity) = hovered.entity else {
        return;
    };
    let Ok((transform, target)) = targets.get(entity) else {
        return;
    };
    let Ok(camera) = camera_query.single() else {
        return;
    };

    let center = transform.translation();
    let right = *camera.right();
    let up = *camera.up();
    let ring_radius = target.radius * 1.5;
    let color = Color::srgba(0.0, 1.0, 1.0, 0.8);

    let segments = 32;
    for i in 0..segments {
        let t0 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let t1 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;
        let p0 = center + (right * t0.cos() + up * t0.sin()) * ring_radius;
        let p1 = center + (right * t1.cos() + up * t1.sin()) * ring_radius;
        gizmos.line(p0, p1, color);
    }
}
