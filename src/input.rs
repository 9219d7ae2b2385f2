//! Keyboard and mouse-wheel handling.
//!
//! Toggles are edge-triggered (`just_pressed`); held-key driving input is
//! sampled separately by the vehicle plugin.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;

use crate::camera::{CameraMode, FocusedBody, ViewMode};
use crate::lunar::LunarView;
use crate::types::{ActiveScene, FrameSet, SessionClock};

/// Plugin providing keyboard shortcuts and focus cycling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                scene_shortcuts,
                clock_shortcuts,
                camera_shortcuts,
                cycle_focus_with_wheel.run_if(resource_equals(ActiveScene::SolarSystem)),
            )
                .chain()
                .in_set(FrameSet::Input),
        );
    }
}

/// `V`: flip between Overview and Individual. The camera mode follows:
/// Overview becomes Normal, anything else becomes Overview.
pub fn toggle_view(mode: CameraMode, view: ViewMode) -> (CameraMode, ViewMode) {
    let mode = if mode == CameraMode::Overview {
        CameraMode::Normal
    } else {
        CameraMode::Overview
    };
    (mode, view.toggled())
}

/// `C`: advance the camera mode and switch to the view that goes with it.
pub fn cycle_camera(mode: CameraMode) -> (CameraMode, ViewMode) {
    let next = mode.next();
    (next, next.paired_view())
}

/// Scene reached by a scene key, if any.
pub fn scene_for_key(scene: ActiveScene, keys: &ButtonInput<KeyCode>) -> Option<ActiveScene> {
    const DIRECT: [(KeyCode, ActiveScene); 4] = [
        (KeyCode::Digit1, ActiveScene::SolarSystem),
        (KeyCode::Digit2, ActiveScene::LunarNodes),
        (KeyCode::Digit3, ActiveScene::Zodiac),
        (KeyCode::Digit4, ActiveScene::Drive),
    ];
    if let Some((_, target)) = DIRECT.iter().find(|(key, _)| keys.just_pressed(*key)) {
        return Some(*target);
    }

    match scene {
        ActiveScene::SolarSystem if keys.just_pressed(KeyCode::KeyR) => {
            Some(ActiveScene::LunarNodes)
        }
        ActiveScene::LunarNodes if keys.any_just_pressed([KeyCode::KeyR, KeyCode::Escape]) => {
            Some(ActiveScene::SolarSystem)
        }
        _ => None,
    }
}

/// Focus step from a wheel delta: scrolling down moves forward.
pub fn focus_step(scroll_y: f32) -> i32 {
    if scroll_y < 0.0 { 1 } else { -1 }
}

fn scene_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut scene: ResMut<ActiveScene>) {
    let Some(next) = scene_for_key(*scene, &keys) else {
        return;
    };
    if next != *scene {
        info!("Scene: {}", next.name());
        *scene = next;
    }
}

/// Space pauses; `[` and `]` halve and double the playback rate; Home
/// rewinds to the start of the session.
fn clock_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SessionClock>) {
    if keys.just_pressed(KeyCode::Space) {
        let paused = clock.toggle_pause();
        info!("Clock {}", if paused { "paused" } else { "running" });
    }

    if keys.just_pressed(KeyCode::BracketLeft) {
        clock.slow_down();
        info!("Time scale: {}x", clock.scale);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        clock.speed_up();
        info!("Time scale: {}x", clock.scale);
    }

    if keys.just_pressed(KeyCode::Home) {
        clock.reset();
        info!("Clock rewound");
    }
}

fn camera_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    scene: Res<ActiveScene>,
    mut mode: ResMut<CameraMode>,
    mut view: ResMut<ViewMode>,
    mut lunar_view: ResMut<LunarView>,
) {
    match *scene {
        ActiveScene::SolarSystem => {
            if keys.just_pressed(KeyCode::KeyV) {
                (*mode, *view) = toggle_view(*mode, *view);
                info!("View: {} ({})", view.name(), mode.name());
            }
            if keys.just_pressed(KeyCode::KeyC) {
                (*mode, *view) = cycle_camera(*mode);
                info!("Camera: {} ({})", mode.name(), view.name());
            }
        }
        ActiveScene::LunarNodes => {
            if keys.just_pressed(KeyCode::KeyC) {
                *lunar_view = lunar_view.next();
                info!("Lunar camera: {}", lunar_view.name());
            }
        }
        ActiveScene::Zodiac | ActiveScene::Drive => {}
    }
}

fn cycle_focus_with_wheel(
    scroll: Res<AccumulatedMouseScroll>,
    view: Res<ViewMode>,
    mut focus: ResMut<FocusedBody>,
) {
    if *view != ViewMode::Individual || scroll.delta.y == 0.0 {
        return;
    }
    focus.0 = focus.0.cycle_focus(focus_step(scroll.delta.y));
    debug!("Focus: {}", focus.0.name());
}
