//! Property-based tests for the vehicle integrator.

use bevy::prelude::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::integrator::{
    DriveInput, VehicleState, VehicleTuning, forward_from_yaw, reflect_off, step,
};
use super::obstacles::{ObstacleClass, ObstacleField, ObstacleProxy};

const DT: f32 = 1.0 / 60.0;

fn any_input() -> impl Strategy<Value = DriveInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(throttle, brake, left, right, strafe_left, strafe_right)| DriveInput {
                throttle,
                brake,
                left,
                right,
                strafe_left,
                strafe_right,
            },
        )
}

fn any_state() -> impl Strategy<Value = VehicleState> {
    (
        -0.6f32..0.6,
        -0.6f32..0.6,
        -std::f32::consts::PI..std::f32::consts::PI,
    )
        .prop_map(|(vx, vz, yaw)| VehicleState {
            velocity: Vec3::new(vx, 0.0, vz),
            yaw,
            ..VehicleState::spawn()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Speed never exceeds the cap for the direction of travel when nothing
    /// is hit.
    #[test]
    fn prop_speed_capped_by_direction(
        state in any_state(),
        input in any_input(),
        delta in 0.001f32..0.1,
        seed in any::<u64>(),
    ) {
        let tuning = VehicleTuning::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let out = step(&state, &input, &tuning, &ObstacleField::empty(), &mut rng, delta, 0.0);
        let cap = if out.state.is_forward() { tuning.max_speed } else { tuning.max_reverse_speed };
        prop_assert!(
            out.state.speed() <= cap + 1e-5,
            "speed {} over cap {} (forward: {})",
            out.state.speed(), cap, out.state.is_forward()
        );
    }

    /// The cap is applied before the collision response, so a bounce may
    /// leave the vehicle above it, but any step that hits nothing ends
    /// within the cap, including one that starts from an over-cap rebound.
    #[test]
    fn prop_cap_holds_on_steps_without_impact(
        x in -60.0f32..60.0,
        z in -60.0f32..60.0,
        vx in -0.8f32..0.8,
        vz in -0.8f32..0.8,
        yaw in -std::f32::consts::PI..std::f32::consts::PI,
        input in any_input(),
        seed in any::<u64>(),
    ) {
        let tuning = VehicleTuning::default();
        let field = ObstacleField::colony().unwrap();
        let state = VehicleState {
            position: Vec3::new(x, 0.0, z),
            velocity: Vec3::new(vx, 0.0, vz),
            yaw,
            ..VehicleState::spawn()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let out = step(&state, &input, &tuning, &field, &mut rng, DT, 0.0);
        prop_assume!(out.impact.is_none() && !out.reset);

        let cap = if out.state.is_forward() { tuning.max_speed } else { tuning.max_reverse_speed };
        prop_assert!(out.state.speed() <= cap + 1e-5);
    }

    /// Steering angle stays within the wheel lock.
    #[test]
    fn prop_steer_angle_bounded(
        state in any_state(),
        inputs in prop::collection::vec(any_input(), 1..60),
    ) {
        let tuning = VehicleTuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = state;
        for input in inputs {
            s = step(&s, &input, &tuning, &ObstacleField::empty(), &mut rng, DT, 0.0).state;
            prop_assert!(s.steer_angle.abs() <= tuning.max_steer_angle + 1e-6);
        }
    }

    /// A collision rejects the move and reflects the velocity away from the
    /// obstacle.
    #[test]
    fn prop_collision_rejects_and_reflects(
        heading in -std::f32::consts::PI..std::f32::consts::PI,
        gap in 0.001f32..0.3,
        offset in -1.5f32..1.5,
        radius in 1.0f32..20.0,
        seed in any::<u64>(),
    ) {
        let tuning = VehicleTuning::default();
        // Vehicle faces `heading` and sits just outside an obstacle ahead of it
        let state = VehicleState {
            yaw: heading,
            velocity: forward_from_yaw(heading) * tuning.max_speed,
            ..VehicleState::spawn()
        };
        let forward = state.forward();
        let side = Vec3::new(-forward.z, 0.0, forward.x);
        let center3 = forward * (radius + gap) + side * offset.clamp(-radius * 0.5, radius * 0.5);
        let center = Vec2::new(center3.x, center3.z);
        prop_assume!(center.length() > radius);

        let field = ObstacleField::new(vec![ObstacleProxy::new("target", center, radius)]).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let out = step(&state, &DriveInput::default(), &tuning, &field, &mut rng, DT, 0.0);

        if let Some(impact) = out.impact {
            prop_assert_eq!(out.state.position, state.position);
            let n = Vec3::new(impact.normal.x, 0.0, impact.normal.y);
            prop_assert!(impact.reflected.dot(n) >= -1e-6);
        } else {
            // A miss only happens when the move stayed outside
            prop_assert!(field.first_hit(Vec2::new(out.state.position.x, out.state.position.z)).is_none());
        }
    }

    /// Rebound off a building is bounded by its bounce intensity.
    #[test]
    fn prop_building_rebound_bounded(
        heading in -std::f32::consts::PI..std::f32::consts::PI,
        seed in any::<u64>(),
    ) {
        let tuning = VehicleTuning::default();
        let state = VehicleState {
            yaw: heading,
            velocity: forward_from_yaw(heading) * tuning.max_speed,
            ..VehicleState::spawn()
        };
        let center3 = state.forward() * 6.2;
        let field = ObstacleField::new(vec![ObstacleProxy::new(
            "home",
            Vec2::new(center3.x, center3.z),
            6.0,
        )])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let out = step(&state, &DriveInput::default(), &tuning, &field, &mut rng, DT, 0.0);
        let impact = out.impact.expect("head-on move must hit");
        prop_assert_eq!(impact.obstacle.class, ObstacleClass::Building);

        let perturbation_bound = tuning.bounce_perturbation * std::f32::consts::SQRT_2;
        let limit = 0.95 * (impact.impact_speed + perturbation_bound);
        prop_assert!(out.state.speed() <= limit + 1e-5);
        prop_assert!(out.state.speed() < impact.impact_speed + perturbation_bound);
    }

    /// Reflection preserves speed and never points into the surface.
    #[test]
    fn prop_reflection_preserves_speed(
        vx in -1.0f32..1.0,
        vz in -1.0f32..1.0,
        angle in 0.0f32..std::f32::consts::TAU,
    ) {
        let v = Vec3::new(vx, 0.0, vz);
        let n = Vec2::from_angle(angle);
        let r = reflect_off(v, n);
        prop_assert!((r.length() - v.length()).abs() < 1e-5);
        prop_assert!(r.dot(Vec3::new(n.x, 0.0, n.y)) >= -1e-6);
    }
}
