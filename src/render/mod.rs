//! Rendering systems for the four scenes.
//!
//! Each scene spawns its own entities tagged with [`SceneMember`]; only the
//! active scene's entities are visible. Simulation results are copied into
//! transforms in [`FrameSet::Present`].

mod background;
pub mod bodies;
mod drive;
pub mod highlight;
mod labels;
mod lunar;
mod orbits;
mod sync;
mod zodiac;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;
use self::drive::DriveRenderPlugin;
use self::highlight::HighlightPlugin;
use self::labels::LabelPlugin;
use self::lunar::LunarRenderPlugin;
use self::orbits::OrbitPathPlugin;
use self::sync::{spin_saturn_rings, sync_body_transforms};
use self::zodiac::ZodiacRenderPlugin;
use crate::camera::setup_camera;
use crate::types::{ActiveScene, FrameSet, SceneMember};

pub use self::bodies::{CelestialBody, HoverTarget};
pub use self::highlight::HoveredEntity;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CelestialBodyPlugin,
            BackgroundPlugin,
            OrbitPathPlugin,
            HighlightPlugin,
            LabelPlugin,
            LunarRenderPlugin,
            ZodiacRenderPlugin,
            DriveRenderPlugin,
        ))
        .add_systems(Startup, setup_camera)
        .add_systems(
            Update,
            (
                apply_scene_visibility,
                (sync_body_transforms, spin_saturn_rings)
                    .run_if(resource_equals(ActiveScene::SolarSystem)),
            )
                .in_set(FrameSet::Present),
        );
    }
}

/// Visibility of an entity belonging to `member` while `active` is shown.
pub fn scene_visibility(member: ActiveScene, active: ActiveScene) -> Visibility {
    if member == active {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Show the active scene's entities and hide everyone else's.
fn apply_scene_visibility(
    scene: Res<ActiveScene>,
    mut members: Query<(&SceneMember, &mut Visibility)>,
) {
    for (member, mut visibility) in members.iter_mut() {
        visibility.set_if_neq(scene_visibility(member.0, *scene));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_scene_visible() {
        for active in ActiveScene::ALL {
            let shown: Vec<_> = ActiveScene::ALL
                .into_iter()
                .filter(|&member| scene_visibility(member, active) != Visibility::Hidden)
                .collect();
            assert_eq!(shown, vec![active]);
        }
    }
}
