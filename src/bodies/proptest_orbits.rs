//! Property-based tests for the closed-form orbit functions.

use proptest::prelude::*;

use super::data::{BodyId, orbit_params};
use super::orbit::{Layout, body_position, orbital_position, spin_angle};

fn orbiting_body() -> impl Strategy<Value = BodyId> {
    prop::sample::select(vec![
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Horizontal distance from the Sun always equals the orbit radius.
    #[test]
    fn prop_horizontal_distance_is_radius(id in orbiting_body(), t in -1.0e5f64..1.0e5) {
        let orbit = orbit_params(id).unwrap();
        let pos = orbital_position(id, t);
        let horizontal = (pos.x * pos.x + pos.z * pos.z).sqrt();
        prop_assert!(
            (horizontal - orbit.radius).abs() < 1e-9,
            "{} at t={}: horizontal {} vs radius {}",
            id.name(), t, horizontal, orbit.radius
        );
    }

    /// The vertical wobble keeps the 3D distance within `tilt` of the radius.
    #[test]
    fn prop_distance_within_tilt(id in orbiting_body(), t in -1.0e5f64..1.0e5) {
        let orbit = orbit_params(id).unwrap();
        let distance = orbital_position(id, t).length();
        prop_assert!(distance >= orbit.radius - 1e-9);
        prop_assert!(distance <= orbit.radius + orbit.tilt_amplitude + 1e-9);
        if orbit.tilt_amplitude == 0.0 {
            prop_assert!((distance - orbit.radius).abs() < 1e-9);
        }
    }

    /// The Sun never moves, under any layout.
    #[test]
    fn prop_sun_fixed(t in -1.0e6f64..1.0e6) {
        for layout in [Layout::Orbiting, Layout::Ring, Layout::BirdsEye] {
            let pos = body_position(BodyId::Sun, layout, t);
            prop_assert_eq!(pos.x, 0.0);
            prop_assert_eq!(pos.y, 0.0);
            prop_assert_eq!(pos.z, 0.0);
        }
    }

    /// Positions repeat after one full orbital period (horizontally).
    #[test]
    fn prop_orbit_periodic(id in orbiting_body(), t in -1.0e3f64..1.0e3) {
        let orbit = orbit_params(id).unwrap();
        let period = std::f64::consts::TAU / orbit.angular_speed;
        let a = orbital_position(id, t);
        let b = orbital_position(id, t + period);
        prop_assert!((a.x - b.x).abs() < 1e-6);
        prop_assert!((a.z - b.z).abs() < 1e-6);
    }

    /// Static layouts do not depend on time.
    #[test]
    fn prop_static_layouts_time_invariant(id in orbiting_body(), t1 in -1.0e4f64..1.0e4, t2 in -1.0e4f64..1.0e4) {
        prop_assert_eq!(body_position(id, Layout::Ring, t1), body_position(id, Layout::Ring, t2));
        prop_assert_eq!(body_position(id, Layout::BirdsEye, t1), body_position(id, Layout::BirdsEye, t2));
    }

    /// Spin angle is always a normalised angle.
    #[test]
    fn prop_spin_angle_normalised(rate in -1.0f32..1.0, t in 0.0f64..1.0e6) {
        let angle = spin_angle(rate, t);
        prop_assert!((0.0..=std::f32::consts::TAU).contains(&angle));
    }
}
