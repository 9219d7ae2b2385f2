//! Point-mass vehicle integrator with circular obstacle bounce.
//!
//! Tuning values are per reference frame (60 Hz). A step of `delta`
//! seconds covers `delta * 60` reference frames: forces and displacement
//! scale linearly, friction and easing compound. At exactly 60 Hz a step
//! is the plain per-frame rule.

use std::f32::consts::{PI, TAU};

use bevy::math::{FloatExt, Vec3Swizzles};
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacles::{GENERIC_SHAKE, ObstacleField, ObstacleProxy, ShakeProfile};
use crate::types::{frame_damping, reference_frames};

// =============================================================================
// Configuration
// =============================================================================

/// Handling constants, in scene units per reference frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VehicleTuning {
    /// Forward speed cap
    pub max_speed: f32,
    /// Reverse speed cap
    pub max_reverse_speed: f32,
    /// Throttle force
    pub acceleration: f32,
    /// Force when reversing from rest or while rolling backwards
    pub reverse_acceleration: f32,
    /// Force when braking while rolling forwards
    pub brake: f32,
    /// Velocity retained per reference frame
    pub friction: f32,
    /// Yaw rate at full speed factor (rad per frame)
    pub steering_sensitivity: f32,
    /// Front wheel lock (rad)
    pub max_steer_angle: f32,
    /// Wheel angle change per frame while a steer key is held
    pub steer_step: f32,
    /// Easing factor returning the wheels to center
    pub steer_return: f32,
    /// Sideways impulse from the strafe keys
    pub strafe_force: f32,
    /// Speed above which the brake key brakes instead of reversing
    pub brake_threshold: f32,
    /// Speed below which steering has no effect
    pub steer_threshold: f32,
    /// Half-width of the random bounce perturbation on x and z
    pub bounce_perturbation: f32,
    /// Impacts slower than this are treated as resting contact
    pub rest_threshold: f32,
    /// Impacts faster than this make the vehicle hop
    pub hop_threshold: f32,
    /// Wheel radius; sets how far the wheels spin per unit travelled
    pub wheel_radius: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: 0.4,
            max_reverse_speed: 0.25,
            acceleration: 0.018,
            reverse_acceleration: 0.012,
            brake: 0.04,
            friction: 0.94,
            steering_sensitivity: 0.025,
            max_steer_angle: PI / 5.0,
            steer_step: 0.08,
            steer_return: 0.12,
            strafe_force: 0.12,
            brake_threshold: 0.05,
            steer_threshold: 0.015,
            bounce_perturbation: 0.05,
            rest_threshold: 1e-4,
            hop_threshold: 0.05,
            wheel_radius: 0.35,
        }
    }
}

impl VehicleTuning {
    /// Speed reached under constant throttle at the reference rate.
    pub fn terminal_speed(&self) -> f32 {
        let f = self.friction;
        (self.acceleration * f / (1.0 - f)).min(self.max_speed)
    }
}

// =============================================================================
// State
// =============================================================================

/// Keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub throttle: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl DriveInput {
    pub fn steering(&self) -> bool {
        self.left || self.right
    }
}

/// Full vehicle state, threaded through [`step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    /// Ground position; `y` stays 0, see `hop`
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading about +Y. Forward is `(-sin yaw, 0, -cos yaw)`
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    /// Visual front wheel angle
    pub steer_angle: f32,
    /// Yaw change requested by the steering keys on the last step
    pub steer_rate: f32,
    /// Speed factor at the start of the last step, in `[0, 1]`
    pub speed_factor: f32,
    /// Accumulated wheel rotation
    pub wheel_spin: f32,
    /// Visual vertical offset (impact hops and suspension bob)
    pub hop: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::spawn()
    }
}

impl VehicleState {
    /// Parked at the origin facing -Z.
    pub fn spawn() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            steer_angle: 0.0,
            steer_rate: 0.0,
            speed_factor: 0.0,
            wheel_spin: 0.0,
            hop: 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Speed relative to the forward cap. Not clamped: bounces can exceed it.
    pub fn visual_speed_factor(&self, tuning: &VehicleTuning) -> f32 {
        self.speed() / tuning.max_speed
    }

    pub fn is_moving(&self, tuning: &VehicleTuning) -> bool {
        self.visual_speed_factor(tuning) > 0.03
    }

    /// Speedometer value.
    pub fn speed_readout(&self) -> u32 {
        (self.speed() * 100.0).round() as u32
    }

    /// Whether the vehicle is heading the way it points.
    pub fn is_forward(&self) -> bool {
        heading_alignment(self.forward(), self.velocity) > 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.yaw.is_finite()
            && self.pitch.is_finite()
            && self.roll.is_finite()
            && self.steer_angle.is_finite()
            && self.wheel_spin.is_finite()
            && self.hop.is_finite()
    }

    /// World transform for the vehicle body.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position + Vec3::Y * self.hop).with_rotation(
            Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll),
        )
    }
}

/// Forward unit vector for a heading.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Unit vector pointing to the vehicle's left.
pub fn left_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.cos(), 0.0, yaw.sin())
}

/// Cosine between `forward` and the velocity direction; 0 at rest.
pub fn heading_alignment(forward: Vec3, velocity: Vec3) -> f32 {
    velocity
        .try_normalize()
        .map_or(0.0, |direction| forward.dot(direction))
}

// =============================================================================
// Step
// =============================================================================

/// Details of a bounce off an obstacle.
#[derive(Clone, Debug, PartialEq)]
pub struct Impact {
    pub obstacle: ObstacleProxy,
    /// Outward contact normal on the ground plane
    pub normal: Vec2,
    /// Speed just before the bounce
    pub impact_speed: f32,
    /// Reflected velocity before perturbation and class scaling
    pub reflected: Vec3,
    /// Camera offset to apply once
    pub shake: Vec3,
}

/// Result of one integration step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub state: VehicleState,
    pub impact: Option<Impact>,
    /// The step produced a non-finite state and the vehicle was respawned
    pub reset: bool,
}

/// Advance the vehicle by `delta_secs`.
///
/// `elapsed_secs` drives the suspension bob. Randomness (bounce perturbation,
/// impact spin, shake) is drawn from `rng`.
pub fn step(
    state: &VehicleState,
    input: &DriveInput,
    tuning: &VehicleTuning,
    field: &ObstacleField,
    rng: &mut impl Rng,
    delta_secs: f32,
    elapsed_secs: f32,
) -> StepOutcome {
    let frames = reference_frames(delta_secs);
    if frames <= 0.0 {
        return StepOutcome {
            state: *state,
            impact: None,
            reset: false,
        };
    }

    let mut s = *state;
    let speed = s.speed();
    let heading = heading_alignment(s.forward(), s.velocity);

    // Throttle, then brake/reverse (brake wins if both are held)
    let mut accel = 0.0;
    if input.throttle {
        accel = tuning.acceleration;
    }
    if input.brake {
        accel = if speed > tuning.brake_threshold && heading > 0.1 {
            -tuning.brake
        } else {
            -tuning.reverse_acceleration
        };
    }

    let speed_factor = (speed / tuning.max_speed).min(1.0);
    s.speed_factor = speed_factor;
    s.steer_rate = 0.0;
    if speed > tuning.steer_threshold {
        let direction = if heading > -0.3 { 1.0 } else { -1.0 };
        let rate = tuning.steering_sensitivity * speed_factor * direction;
        if input.left {
            s.steer_rate = rate;
            s.steer_angle += tuning.steer_step * frames;
        }
        if input.right {
            s.steer_rate = -rate;
            s.steer_angle -= tuning.steer_step * frames;
        }
    }
    if !input.steering() {
        s.steer_angle = s
            .steer_angle
            .lerp(0.0, frame_damping(tuning.steer_return, delta_secs));
    }
    s.steer_angle = s
        .steer_angle
        .clamp(-tuning.max_steer_angle, tuning.max_steer_angle);

    let strafe = tuning.strafe_force * (1.0 + speed_factor * 0.3) * frames;
    if input.strafe_left {
        s.velocity += left_from_yaw(s.yaw) * strafe;
    }
    if input.strafe_right {
        s.velocity -= left_from_yaw(s.yaw) * strafe;
    }

    s.yaw += s.steer_rate * frames;
    let forward = s.forward();
    s.velocity += forward * accel * frames;
    s.velocity *= tuning.friction.powf(frames);
    s.velocity = clamp_speed(s.velocity, forward, tuning);

    let speed = s.speed();
    if speed > 0.01 {
        let direction = if heading_alignment(forward, s.velocity) > 0.0 {
            1.0
        } else {
            -1.0
        };
        let circumference = TAU * tuning.wheel_radius;
        s.wheel_spin = (s.wheel_spin + speed / circumference * 12.0 * direction * frames)
            .rem_euclid(TAU);
    }

    let displacement = s.velocity * frames;
    let candidate = s.position + displacement;
    let mut impact = None;
    match field.first_hit(candidate.xz()) {
        // Resting contact: no bounce, no shake
        Some(_) if speed < tuning.rest_threshold => s.velocity = Vec3::ZERO,
        Some(obstacle) => {
            impact = Some(bounce(&mut s, obstacle, candidate, tuning, rng));
        }
        None => s.position = candidate,
    }

    let visual_factor = s.visual_speed_factor(tuning);
    let ease_roll = frame_damping(0.08, delta_secs);
    s.roll = s.roll.lerp(s.steer_rate * visual_factor * 15.0, ease_roll);
    s.pitch = s.pitch.lerp(0.0, ease_roll);
    let bob = (elapsed_secs * 12.0).sin() * visual_factor * 0.03;
    if s.hop > bob {
        s.hop = s.hop.lerp(bob, frame_damping(0.15, delta_secs));
    }

    if !s.is_finite() {
        return StepOutcome {
            state: VehicleState::spawn(),
            impact: None,
            reset: true,
        };
    }

    StepOutcome {
        state: s,
        impact,
        reset: false,
    }
}

/// Cap speed by direction of travel relative to the heading.
fn clamp_speed(velocity: Vec3, forward: Vec3, tuning: &VehicleTuning) -> Vec3 {
    let speed = velocity.length();
    if speed <= 0.0 {
        return velocity;
    }
    let limit = if heading_alignment(forward, velocity) > 0.0 {
        tuning.max_speed
    } else {
        tuning.max_reverse_speed
    };
    if speed > limit {
        velocity * (limit / speed)
    } else {
        velocity
    }
}

/// Reject the move and bounce off `obstacle`. Position is left untouched.
fn bounce(
    s: &mut VehicleState,
    obstacle: &ObstacleProxy,
    candidate: Vec3,
    tuning: &VehicleTuning,
    rng: &mut impl Rng,
) -> Impact {
    let impact_speed = s.speed();
    let profile = obstacle.class.profile();
    let normal = contact_normal(s.position.xz(), candidate.xz(), obstacle);
    let reflected = reflect_off(s.velocity, normal);

    let p = tuning.bounce_perturbation;
    let perturbation = Vec3::new(rng.gen_range(-p..=p), 0.0, rng.gen_range(-p..=p));
    s.velocity = (reflected + perturbation) * profile.bounce;

    if impact_speed > tuning.hop_threshold {
        s.hop += profile.pop * impact_speed * 2.0;
    }
    s.yaw += rng.gen_range(-0.5..0.5) * profile.spin * impact_speed;
    if profile.tumble {
        s.pitch += rng.gen_range(-0.5..0.5) * 0.15 * impact_speed;
        s.roll += rng.gen_range(-0.5..0.5) * 0.25 * impact_speed;
    }

    let mut shake = Vec3::ZERO;
    if let Some(class_shake) = profile.shake {
        shake += shake_offset(&class_shake, impact_speed, rng);
    }
    shake += shake_offset(&GENERIC_SHAKE, impact_speed, rng);

    Impact {
        obstacle: obstacle.clone(),
        normal,
        impact_speed,
        reflected,
        shake,
    }
}

/// Random camera offset for an impact, zero below the profile's threshold.
fn shake_offset(profile: &ShakeProfile, impact_speed: f32, rng: &mut impl Rng) -> Vec3 {
    if impact_speed <= profile.threshold {
        return Vec3::ZERO;
    }
    let intensity = impact_speed * profile.gain;
    Vec3::new(
        rng.gen_range(-0.5..0.5),
        rng.gen_range(-0.5..0.5),
        rng.gen_range(-0.5..0.5),
    ) * profile.axes
        * intensity
}

/// Outward normal for a move from `from` to `to` that ended inside
/// `obstacle`.
///
/// Uses the direction from the center to `to`. When the move grazed or
/// passed the center that direction faces along the motion, so the normal
/// at the point where the move first crossed the rim is used instead.
pub fn contact_normal(from: Vec2, to: Vec2, obstacle: &ObstacleProxy) -> Vec2 {
    let motion = to - from;
    let radial = (to - obstacle.center).try_normalize();
    if let Some(n) = radial
        && motion.dot(n) <= 0.0
    {
        return n;
    }
    if let Some(n) = rim_entry_normal(from, motion, obstacle) {
        return n;
    }
    radial
        .or_else(|| (from - obstacle.center).try_normalize())
        .or_else(|| (-motion).try_normalize())
        .unwrap_or(Vec2::X)
}

/// Normal at the first point where `from + s * motion` (s in 0..=1) meets
/// the rim.
fn rim_entry_normal(from: Vec2, motion: Vec2, obstacle: &ObstacleProxy) -> Option<Vec2> {
    let a = motion.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let offset = from - obstacle.center;
    let b = 2.0 * motion.dot(offset);
    let c = offset.length_squared() - obstacle.radius * obstacle.radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let s = ((-b - disc.sqrt()) / (2.0 * a)).clamp(0.0, 1.0);
    (from + motion * s - obstacle.center).try_normalize()
}

/// Reflect the component of `velocity` heading into the surface.
///
/// A velocity already leaving the surface is returned unchanged, so the
/// result never points into the obstacle.
pub fn reflect_off(velocity: Vec3, normal: Vec2) -> Vec3 {
    let n = Vec3::new(normal.x, 0.0, normal.y);
    let approach = velocity.dot(n);
    if approach < 0.0 {
        velocity - 2.0 * approach * n
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::obstacles::ObstacleClass;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    fn drive(state: &VehicleState, input: DriveInput, field: &ObstacleField) -> StepOutcome {
        let mut rng = StdRng::seed_from_u64(7);
        step(state, &input, &VehicleTuning::default(), field, &mut rng, DT, 0.0)
    }

    fn throttle() -> DriveInput {
        DriveInput {
            throttle: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_throttle_from_rest() {
        let out = drive(&VehicleState::spawn(), throttle(), &ObstacleField::empty());
        // (0 + 0.018) * 0.94 along -Z
        assert_relative_eq!(out.state.velocity.z, -0.018 * 0.94, epsilon = 1e-6);
        assert_relative_eq!(out.state.position.z, -0.018 * 0.94, epsilon = 1e-6);
        assert!(out.impact.is_none());
    }

    #[test]
    fn test_brake_from_rest_reverses() {
        let input = DriveInput {
            brake: true,
            ..Default::default()
        };
        let out = drive(&VehicleState::spawn(), input, &ObstacleField::empty());
        assert!(out.state.velocity.z > 0.0, "should roll backwards (+Z)");
        assert!(!out.state.is_forward());
    }

    #[test]
    fn test_brake_while_rolling_forward() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -0.3);
        let input = DriveInput {
            brake: true,
            ..Default::default()
        };
        let out = drive(&state, input, &ObstacleField::empty());
        assert_relative_eq!(out.state.velocity.z, (-0.3 + 0.04) * 0.94, epsilon = 1e-6);
    }

    #[test]
    fn test_no_steering_at_rest() {
        let input = DriveInput {
            left: true,
            ..Default::default()
        };
        let out = drive(&VehicleState::spawn(), input, &ObstacleField::empty());
        assert_eq!(out.state.yaw, 0.0);
        assert_eq!(out.state.steer_rate, 0.0);
    }

    #[test]
    fn test_steering_while_moving() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -0.4);
        let input = DriveInput {
            throttle: true,
            left: true,
            ..Default::default()
        };
        let out = drive(&state, input, &ObstacleField::empty());
        assert_relative_eq!(out.state.yaw, 0.025, epsilon = 1e-6);
        assert_relative_eq!(out.state.steer_angle, 0.08, epsilon = 1e-6);
    }

    #[test]
    fn test_steer_angle_clamped_and_returns() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -0.4);
        let tuning = VehicleTuning::default();
        let input = DriveInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            state = drive(&state, input, &ObstacleField::empty()).state;
        }
        assert_relative_eq!(state.steer_angle, -tuning.max_steer_angle, epsilon = 1e-6);

        let released = drive(&state, DriveInput::default(), &ObstacleField::empty()).state;
        assert_relative_eq!(
            released.steer_angle,
            -tuning.max_steer_angle * 0.88,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_strafe_pushes_sideways() {
        let input = DriveInput {
            strafe_right: true,
            ..Default::default()
        };
        let out = drive(&VehicleState::spawn(), input, &ObstacleField::empty());
        // Right of a -Z heading is +X
        assert!(out.state.velocity.x > 0.0);
        assert_relative_eq!(out.state.velocity.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_speed_capped() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -2.0);
        let out = drive(&state, throttle(), &ObstacleField::empty());
        assert_relative_eq!(out.state.speed(), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_reverse_speed_capped() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, 2.0);
        let out = drive(&state, DriveInput::default(), &ObstacleField::empty());
        assert_relative_eq!(out.state.speed(), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_collision_rejects_move() {
        let field = ObstacleField::new(vec![ObstacleProxy::new(
            "wall",
            Vec2::new(0.0, -2.3),
            2.0,
        )])
        .unwrap();
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -0.4);
        let out = drive(&state, throttle(), &field);
        let impact = out.impact.expect("should hit the wall");
        assert_eq!(out.state.position, state.position);
        assert_relative_eq!(impact.normal.y, 1.0, epsilon = 1e-5);
        assert!(impact.reflected.z > 0.0);
        assert_eq!(impact.obstacle.class, ObstacleClass::Small);
    }

    #[test]
    fn test_resting_contact_zeroes_velocity() {
        let field =
            ObstacleField::new(vec![ObstacleProxy::new("wall", Vec2::new(0.0, -1.0), 1.0)])
                .unwrap();
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -5e-5);
        let out = drive(&state, DriveInput::default(), &field);
        assert!(out.impact.is_none());
        assert_eq!(out.state.velocity, Vec3::ZERO);
        assert_eq!(out.state.position, Vec3::ZERO);
    }

    #[test]
    fn test_grazing_normal_never_faces_motion() {
        // Tangential graze where the radial normal would face along the motion
        let obstacle = ObstacleProxy::new("post", Vec2::ZERO, 1.0);
        let from = Vec2::new(0.0, 1.0);
        let to = Vec2::new(0.4, 0.9);
        assert!(obstacle.contains(to));
        let n = contact_normal(from, to, &obstacle);
        assert!((to - from).dot(n) <= 0.0);
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_reflect_off_keeps_leaving_velocity() {
        let leaving = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(reflect_off(leaving, Vec2::X), leaving);
        let approaching = Vec3::new(-1.0, 0.0, 0.5);
        assert_eq!(reflect_off(approaching, Vec2::X), Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.1, 0.0, -0.2);
        let mut rng = StdRng::seed_from_u64(1);
        let out = step(
            &state,
            &throttle(),
            &VehicleTuning::default(),
            &ObstacleField::empty(),
            &mut rng,
            0.0,
            0.0,
        );
        assert_eq!(out.state, state);
    }

    #[test]
    fn test_non_finite_state_resets() {
        let mut state = VehicleState::spawn();
        state.position = Vec3::new(f32::NAN, 0.0, 0.0);
        let out = drive(&state, DriveInput::default(), &ObstacleField::empty());
        assert!(out.reset);
        assert_eq!(out.state, VehicleState::spawn());
    }

    #[test]
    fn test_terminal_speed() {
        let tuning = VehicleTuning::default();
        assert_relative_eq!(tuning.terminal_speed(), 0.018 * 0.94 / 0.06, epsilon = 1e-5);
    }

    #[test]
    fn test_speed_readout() {
        let mut state = VehicleState::spawn();
        state.velocity = Vec3::new(0.0, 0.0, -0.286);
        assert_eq!(state.speed_readout(), 29);
    }
}
