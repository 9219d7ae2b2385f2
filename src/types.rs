//! Shared session types and constants for the visualization.

use bevy::prelude::*;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Frame rate the per-frame tuning constants (damping, friction, forces)
/// were authored against. At exactly this rate every frame-rate independent
/// formula reduces to the plain per-frame rule.
pub const REFERENCE_FPS: f32 = 60.0;

/// Upper bound on a single frame's delta. Long stalls (window drag,
/// breakpoints) would otherwise launch the vehicle through obstacles.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Number of reference frames covered by a frame of `delta_secs`.
pub fn reference_frames(delta_secs: f32) -> f32 {
    (delta_secs.clamp(0.0, MAX_FRAME_DELTA)) * REFERENCE_FPS
}

/// Frame-rate independent form of a per-frame lerp factor.
///
/// `factor` is the fraction of the remaining distance covered per reference
/// frame; the returned value is the fraction to cover over `delta_secs`.
pub fn frame_damping(factor: f32, delta_secs: f32) -> f32 {
    1.0 - (1.0 - factor).powf(reference_frames(delta_secs))
}

/// System sets ordering one displayed frame.
///
/// Input toggles land first, the clock advances, simulation state is
/// recomputed, and finally results are written into transforms and the camera.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Edge-triggered key handling (mode toggles, scene switches)
    Input,
    /// Session clock advancement
    Clock,
    /// Pure simulation updates (vehicle integration, node precession)
    Simulate,
    /// Transform/camera synchronisation for rendering
    Present,
}

/// Session clock driving every time-parameterised function.
///
/// Orbital and lunar positions are recomputed from `elapsed` each frame, so
/// pausing or rescaling never accumulates drift.
#[derive(Resource, Clone, Debug)]
pub struct SessionClock {
    /// Scaled seconds since the session started
    pub elapsed: f64,
    /// Scaled seconds covered by the most recent frame (0 while paused)
    pub delta: f64,
    /// Playback rate multiplier
    pub scale: f64,
    /// Whether the clock is frozen
    pub paused: bool,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SessionClock {
    /// Minimum playback rate reachable with the slow-down key.
    pub const MIN_SCALE: f64 = 0.125;
    /// Maximum playback rate reachable with the speed-up key.
    pub const MAX_SCALE: f64 = 16.0;

    /// A running clock at `scale`, clamped to the reachable range.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale: scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE),
            ..Self::default()
        }
    }

    /// Advance by a real-time frame delta, honoring pause and scale.
    pub fn advance(&mut self, real_delta_secs: f64) {
        if self.paused {
            self.delta = 0.0;
            return;
        }
        self.delta = real_delta_secs.max(0.0) * self.scale;
        self.elapsed += self.delta;
    }

    /// Toggle pause, returning the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Double the playback rate up to [`Self::MAX_SCALE`].
    pub fn speed_up(&mut self) {
        self.scale = (self.scale * 2.0).min(Self::MAX_SCALE);
    }

    /// Halve the playback rate down to [`Self::MIN_SCALE`].
    pub fn slow_down(&mut self) {
        self.scale = (self.scale * 0.5).max(Self::MIN_SCALE);
    }

    /// Rewind to the start of the session.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
    }

    /// Scaled frame delta as `f32`, for the incremental integrators.
    pub fn delta_secs(&self) -> f32 {
        self.delta as f32
    }
}

/// The scene currently shown. Exactly one scene is visible at a time.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveScene {
    #[default]
    SolarSystem,
    LunarNodes,
    Zodiac,
    Drive,
}

impl ActiveScene {
    pub const ALL: [ActiveScene; 4] = [
        ActiveScene::SolarSystem,
        ActiveScene::LunarNodes,
        ActiveScene::Zodiac,
        ActiveScene::Drive,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ActiveScene::SolarSystem => "Solar System",
            ActiveScene::LunarNodes => "Rahu-Ketu",
            ActiveScene::Zodiac => "Zodiac",
            ActiveScene::Drive => "Colony Drive",
        }
    }
}

/// Tags an entity as belonging to one scene; its visibility follows
/// [`ActiveScene`].
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneMember(pub ActiveScene);
