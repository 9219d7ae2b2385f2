//! Camera targeting and framing.
//!
//! Each scene computes a desired placement (position, look-at point, FOV)
//! from its own state; the live [`CameraRig`] eases toward it every frame.
//! Switching modes only changes the desired placement, never the rig, so
//! transitions are always smooth.

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::bodies::{BodyId, Layout, SolarSystem, body_position};
use crate::config::SceneConfig;
use crate::lunar::LunarView;
use crate::types::{ActiveScene, FrameSet, SessionClock, frame_damping};
use crate::vehicle::{Vehicle, VehicleState, VehicleTuning};

/// Fixed placement of the zodiac scene camera.
pub const ZODIAC_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// FOV of the lunar-node and zodiac scenes.
pub const SCENE_FOV_DEG: f32 = 60.0;

/// Chase camera FOV never widens past this.
pub const CHASE_MAX_FOV_DEG: f32 = 85.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Field of view and follow distance of a camera mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    pub fov_deg: f32,
    pub distance: f32,
}

/// Solar-system camera modes, cycled with `C`.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Close-up behind the focused body
    Normal,
    /// Straight down over the Sun
    BirdsEye,
    /// Wide elevated view of the whole system
    #[default]
    Overview,
    /// Off-axis elevated view
    Cinematic,
}

impl CameraMode {
    pub const ALL: [CameraMode; 4] = [
        CameraMode::Normal,
        CameraMode::BirdsEye,
        CameraMode::Overview,
        CameraMode::Cinematic,
    ];

    pub fn preset(&self) -> CameraPreset {
        let (fov_deg, distance) = match self {
            CameraMode::Normal => (60.0, 5.0),
            CameraMode::BirdsEye => (85.0, 16.0),
            CameraMode::Overview => (85.0, 25.0),
            CameraMode::Cinematic => (70.0, 22.0),
        };
        CameraPreset { fov_deg, distance }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CameraMode::Normal => "Normal View",
            CameraMode::BirdsEye => "Bird's Eye",
            CameraMode::Overview => "Solar System",
            CameraMode::Cinematic => "Cinematic",
        }
    }

    /// Next mode in the `C` cycle.
    pub fn next(self) -> Self {
        match self {
            CameraMode::Normal => CameraMode::BirdsEye,
            CameraMode::BirdsEye => CameraMode::Overview,
            CameraMode::Overview => CameraMode::Cinematic,
            CameraMode::Cinematic => CameraMode::Normal,
        }
    }

    /// View mode that goes with this camera mode when cycling.
    pub fn paired_view(&self) -> ViewMode {
        match self {
            CameraMode::Overview | CameraMode::Cinematic => ViewMode::Overview,
            CameraMode::Normal | CameraMode::BirdsEye => ViewMode::Individual,
        }
    }

    /// Desired camera position for a target point.
    ///
    /// Only `Normal` follows the target; the other modes are fixed vantage
    /// points parameterised by distance.
    pub fn placement(&self, target: Vec3, distance: f32) -> Vec3 {
        match self {
            CameraMode::Normal => target + Vec3::new(0.0, 0.0, distance),
            CameraMode::BirdsEye => Vec3::new(0.0, distance, 0.0),
            CameraMode::Overview => Vec3::new(0.0, 10.0, distance),
            CameraMode::Cinematic => Vec3::new(6.0, 12.0, distance),
        }
    }
}

/// Which body set is shown in the solar-system scene.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// All bodies orbiting, with orbit rings
    #[default]
    Overview,
    /// Bodies parked on a ring for close inspection
    Individual,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Overview => ViewMode::Individual,
            ViewMode::Individual => ViewMode::Overview,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Overview => "Overview",
            ViewMode::Individual => "Individual",
        }
    }
}

/// Body framed in the Individual view.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusedBody(pub BodyId);

impl Default for FocusedBody {
    fn default() -> Self {
        Self(BodyId::Sun)
    }
}

/// Where bodies are placed for a camera/view combination.
pub fn layout_for(mode: CameraMode, view: ViewMode) -> Layout {
    match (view, mode) {
        (ViewMode::Overview, _) => Layout::Orbiting,
        (ViewMode::Individual, CameraMode::BirdsEye) => Layout::BirdsEye,
        (ViewMode::Individual, _) => Layout::Ring,
    }
}

/// Orbit ring and spin-axis indicator are only drawn for orbiting bodies in
/// the Overview view.
pub fn show_orbit_decorations(id: BodyId, view: ViewMode) -> bool {
    view == ViewMode::Overview && !id.is_reference() && id.parent().is_none()
}

/// A desired camera placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
}

/// Desired placement in the solar-system scene.
pub fn solar_camera_target(
    mode: CameraMode,
    view: ViewMode,
    focus: BodyId,
    system: &SolarSystem,
    t: f64,
) -> CameraTarget {
    let preset = mode.preset();
    let centered = |distance: f32| CameraTarget {
        position: mode.placement(Vec3::ZERO, distance),
        look_at: Vec3::ZERO,
        fov_deg: preset.fov_deg,
    };

    match (view, mode) {
        (ViewMode::Overview, _) | (ViewMode::Individual, CameraMode::BirdsEye) => {
            centered(preset.distance)
        }
        (ViewMode::Individual, _) => {
            let target = body_position(focus, layout_for(mode, view), t).as_vec3();
            let distance = system
                .get(focus)
                .map_or(preset.distance, |data| data.framing.distance(preset.distance));
            CameraTarget {
                position: mode.placement(target, distance),
                look_at: target,
                fov_deg: preset.fov_deg,
            }
        }
    }
}

/// Desired placement in the lunar-node scene.
pub fn lunar_camera_target(view: LunarView, compact: bool) -> CameraTarget {
    CameraTarget {
        position: view.camera_position(compact),
        look_at: Vec3::ZERO,
        fov_deg: SCENE_FOV_DEG,
    }
}

/// Desired chase placement behind the vehicle.
///
/// The camera pulls back, rises and widens with speed, swings out on the
/// side of a turn, and looks at a point ahead of the car.
pub fn chase_camera_target(state: &VehicleState, tuning: &VehicleTuning) -> CameraTarget {
    let visual = state.visual_speed_factor(tuning);
    let turn = state.steer_rate * state.speed_factor;

    let distance = 10.0 + visual * 3.0;
    let height = 5.0 + visual * 1.5;
    let lateral = turn * 5.0;
    let look_ahead = 2.0 + visual * 3.0;

    let (sin, cos) = state.yaw.sin_cos();
    let car = state.position + Vec3::Y * state.hop;
    let position = car
        + Vec3::new(
            sin * distance + cos * lateral,
            height,
            cos * distance - sin * lateral,
        );
    let look_at = car + state.forward() * look_ahead + Vec3::Y * 0.8;
    let fov_deg = (65.0 + visual * 8.0 + turn.abs() * 1500.0).min(CHASE_MAX_FOV_DEG);

    CameraTarget {
        position,
        look_at,
        fov_deg,
    }
}

/// Live camera placement, eased toward a [`CameraTarget`].
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        let overview = CameraMode::Overview;
        let preset = overview.preset();
        Self {
            position: overview.placement(Vec3::ZERO, preset.distance),
            look_at: Vec3::ZERO,
            fov_deg: preset.fov_deg,
        }
    }
}

impl CameraRig {
    /// Ease toward `target`. `position_damping` and `fov_damping` are
    /// fractions of the remaining gap covered per reference frame. The
    /// look-at point snaps.
    pub fn approach(
        &mut self,
        target: &CameraTarget,
        position_damping: f32,
        fov_damping: f32,
        delta_secs: f32,
    ) {
        self.position = self
            .position
            .lerp(target.position, frame_damping(position_damping, delta_secs));
        self.fov_deg = self
            .fov_deg
            .lerp(target.fov_deg, frame_damping(fov_damping, delta_secs));
        self.look_at = target.look_at;
    }

    /// Transform looking from the rig position at its look-at point.
    pub fn transform(&self) -> Transform {
        let forward = self.look_at - self.position;
        // Looking straight down needs a horizontal up vector
        let up = if forward.normalize_or_zero().cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        Transform::from_translation(self.position).looking_at(self.look_at, up)
    }
}

/// One-shot camera offset requested by impacts, consumed by the next
/// camera update.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraShake {
    pending: Vec3,
}

impl CameraShake {
    pub fn add(&mut self, offset: Vec3) {
        self.pending += offset;
    }

    pub fn take(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending)
    }
}

/// Plugin providing camera targeting. The camera entity itself is spawned
/// by the render plugin with [`setup_camera`].
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .init_resource::<CameraShake>()
            .init_resource::<CameraMode>()
            .init_resource::<ViewMode>()
            .init_resource::<FocusedBody>()
            .init_resource::<LunarView>()
            .add_systems(
                Update,
                (update_camera_rig, apply_camera_rig)
                    .chain()
                    .in_set(FrameSet::Present),
            );
    }
}

/// Spawn the main camera with a perspective projection.
pub fn setup_camera(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: rig.fov_deg.to_radians(),
            near: 0.1,
            far: 2000.0,
            ..default()
        }),
        rig.transform(),
        MainCamera,
    ));
}

/// Compute the active scene's desired placement and ease the rig toward it.
///
/// Uses real frame time so the camera still settles while the clock is
/// paused.
fn update_camera_rig(
    time: Res<Time>,
    scene: Res<ActiveScene>,
    config: Res<SceneConfig>,
    clock: Res<SessionClock>,
    mode: Res<CameraMode>,
    view: Res<ViewMode>,
    focus: Res<FocusedBody>,
    lunar_view: Res<LunarView>,
    system: Res<SolarSystem>,
    vehicle: Res<Vehicle>,
    mut shake: ResMut<CameraShake>,
    mut rig: ResMut<CameraRig>,
) {
    let dt = time.delta_secs();
    let damping = config.camera.damping;

    match *scene {
        ActiveScene::SolarSystem => {
            let target = solar_camera_target(*mode, *view, focus.0, &system, clock.elapsed);
            rig.approach(&target, damping, damping, dt);
        }
        ActiveScene::LunarNodes => {
            let target = lunar_camera_target(*lunar_view, config.compact_layout);
            rig.approach(&target, damping, damping, dt);
        }
        ActiveScene::Zodiac => {
            let target = CameraTarget {
                position: ZODIAC_CAMERA_POSITION,
                look_at: Vec3::ZERO,
                fov_deg: SCENE_FOV_DEG,
            };
            rig.approach(&target, damping, damping, dt);
        }
        ActiveScene::Drive => {
            let target = chase_camera_target(&vehicle.state, &config.vehicle);
            rig.approach(
                &target,
                config.camera.chase_damping,
                config.camera.chase_fov_damping,
                dt,
            );
            rig.position += shake.take();
        }
    }
}

/// Copy the rig into the camera transform and projection.
fn apply_camera_rig(
    rig: Res<CameraRig>,
    mut camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera.single_mut() else {
        return;
    };
    *transform = rig.transform();
    if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = rig.fov_deg.to_radians();
    }
}
