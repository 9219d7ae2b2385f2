//! Circular obstacle proxies for the drive scene.
//!
//! Every obstacle is a circle on the ground plane (x/z). Overlap is a plain
//! distance test; there is no broad phase.

use bevy::prelude::*;

/// Errors raised when building an obstacle field.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ObstacleError {
    /// An obstacle radius was zero, negative, or not finite.
    #[error("obstacle '{name}' has degenerate radius {radius}")]
    DegenerateRadius { name: String, radius: f32 },

    /// An obstacle center was not finite.
    #[error("obstacle '{name}' has non-finite center")]
    NonFiniteCenter { name: String },
}

/// Impact response class of an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleClass {
    /// Trees, rocks, cones, lights
    Small,
    /// Buildings, homes, gate
    Building,
    /// Large estates with grounds
    Estate,
    /// The name monument
    Monument,
}

/// Camera shake produced by an impact: applied when impact speed exceeds
/// `threshold`, with magnitude `impact * gain` spread over `axes`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeProfile {
    pub threshold: f32,
    pub gain: f32,
    pub axes: Vec3,
}

/// Response of the vehicle when it bounces off an obstacle class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BounceProfile {
    /// Multiplier on the reflected velocity
    pub bounce: f32,
    /// Vertical hop per unit of impact speed
    pub pop: f32,
    /// Yaw kick per unit of impact speed
    pub spin: f32,
    /// Class-specific camera shake
    pub shake: Option<ShakeProfile>,
    /// Whether pitch and roll are knocked as well
    pub tumble: bool,
}

/// Shake applied for any impact faster than this, regardless of class.
pub const GENERIC_SHAKE: ShakeProfile = ShakeProfile {
    threshold: 0.2,
    gain: 4.0,
    axes: Vec3::new(0.12, 0.12, 0.0),
};

impl ObstacleClass {
    /// Classify by radius. Monuments are never inferred; they are tagged.
    pub fn from_radius(radius: f32) -> Self {
        if radius > 10.0 {
            ObstacleClass::Estate
        } else if radius > 5.0 {
            ObstacleClass::Building
        } else {
            ObstacleClass::Small
        }
    }

    pub fn profile(&self) -> BounceProfile {
        match self {
            ObstacleClass::Small => BounceProfile {
                bounce: 0.7,
                pop: 0.3,
                spin: 0.15,
                shake: None,
                tumble: false,
            },
            ObstacleClass::Building => BounceProfile {
                bounce: 0.95,
                pop: 0.6,
                spin: 0.25,
                shake: Some(ShakeProfile {
                    threshold: 0.15,
                    gain: 6.0,
                    axes: Vec3::new(0.15, 0.15, 0.1),
                }),
                tumble: true,
            },
            ObstacleClass::Estate => BounceProfile {
                bounce: 1.1,
                pop: 0.8,
                spin: 0.35,
                shake: Some(ShakeProfile {
                    threshold: 0.1,
                    gain: 8.0,
                    axes: Vec3::new(0.2, 0.2, 0.15),
                }),
                tumble: true,
            },
            ObstacleClass::Monument => BounceProfile {
                bounce: 1.3,
                pop: 1.2,
                spin: 0.5,
                shake: Some(ShakeProfile {
                    threshold: 0.05,
                    gain: 12.0,
                    axes: Vec3::new(0.3, 0.3, 0.2),
                }),
                tumble: true,
            },
        }
    }
}

/// A circular obstacle on the ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleProxy {
    pub name: String,
    /// Center on the ground plane (x, z)
    pub center: Vec2,
    pub radius: f32,
    pub class: ObstacleClass,
}

impl ObstacleProxy {
    /// Proxy whose class follows from its radius.
    pub fn new(name: impl Into<String>, center: Vec2, radius: f32) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            class: ObstacleClass::from_radius(radius),
        }
    }

    pub fn with_class(mut self, class: ObstacleClass) -> Self {
        self.class = class;
        self
    }

    /// Strict overlap test: a point exactly on the rim does not overlap.
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// Validated set of obstacles, tested in insertion order.
#[derive(Resource, Clone, Debug)]
pub struct ObstacleField {
    obstacles: Vec<ObstacleProxy>,
}

impl ObstacleField {
    /// Build a field, rejecting degenerate proxies.
    pub fn new(obstacles: Vec<ObstacleProxy>) -> Result<Self, ObstacleError> {
        for o in &obstacles {
            if !o.radius.is_finite() || o.radius <= 0.0 {
                return Err(ObstacleError::DegenerateRadius {
                    name: o.name.clone(),
                    radius: o.radius,
                });
            }
            if !o.center.is_finite() {
                return Err(ObstacleError::NonFiniteCenter {
                    name: o.name.clone(),
                });
            }
        }
        Ok(Self { obstacles })
    }

    /// A field with nothing in it.
    pub fn empty() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    /// The residential colony layout of the drive scene.
    pub fn colony() -> Result<Self, ObstacleError> {
        let p = |name: &str, x: f32, z: f32, r: f32| ObstacleProxy::new(name, Vec2::new(x, z), r);
        Self::new(vec![
            p("Tree", 10.0, 5.0, 2.0),
            p("Tree", -15.0, -8.0, 2.5),
            p("Rock", 5.0, -12.0, 1.5),
            p("Rock", -8.0, 15.0, 2.0),
            p("Building", 20.0, -5.0, 3.5),
            p("Building", -12.0, -20.0, 2.5),
            p("Cone", 3.0, 8.0, 1.0),
            p("Cone", -5.0, -3.0, 1.0),
            p("Barrier", 0.0, -25.0, 4.0),
            p("Barrier", 25.0, 0.0, 3.0),
            p("Grand Estate", 30.0, 15.0, 15.0),
            p("Royal Palace", -35.0, -10.0, 18.0),
            p("Modern Villa", 15.0, -35.0, 12.0),
            p("Mediterranean Estate", -25.0, 30.0, 16.0),
            p("Penthouse Estate", 45.0, -25.0, 20.0),
            p("Luxury Home", 50.0, 10.0, 8.0),
            p("Luxury Home", -50.0, 5.0, 7.0),
            p("Luxury Home", 25.0, 40.0, 8.0),
            p("Colony Gate", 0.0, -60.0, 6.0),
            p("Street Light", 4.0, 20.0, 1.5),
            p("Street Light", -4.0, -20.0, 1.5),
            p("Street Light", 20.0, 4.0, 1.5),
            p("Name Monument", 0.0, 10.0, 4.0).with_class(ObstacleClass::Monument),
        ])
    }

    /// First obstacle overlapping `point`, in insertion order.
    pub fn first_hit(&self, point: Vec2) -> Option<&ObstacleProxy> {
        self.obstacles.iter().find(|o| o.contains(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstacleProxy> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colony_layout() {
        let field = ObstacleField::colony().unwrap();
        assert_eq!(field.len(), 23);
        let monuments: Vec<_> = field
            .iter()
            .filter(|o| o.class == ObstacleClass::Monument)
            .collect();
        assert_eq!(monuments.len(), 1);
        assert_eq!(monuments[0].center, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_classification_by_radius() {
        assert_eq!(ObstacleClass::from_radius(15.0), ObstacleClass::Estate);
        assert_eq!(ObstacleClass::from_radius(10.0), ObstacleClass::Building);
        assert_eq!(ObstacleClass::from_radius(6.0), ObstacleClass::Building);
        assert_eq!(ObstacleClass::from_radius(5.0), ObstacleClass::Small);
    }

    #[test]
    fn test_rejects_degenerate_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = ObstacleField::new(vec![ObstacleProxy::new("bad", Vec2::ZERO, radius)]);
            assert!(
                matches!(err, Err(ObstacleError::DegenerateRadius { .. })),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let err = ObstacleField::new(vec![ObstacleProxy::new(
            "bad",
            Vec2::new(f32::NAN, 0.0),
            1.0,
        )]);
        assert!(matches!(err, Err(ObstacleError::NonFiniteCenter { .. })));
    }

    #[test]
    fn test_rim_does_not_overlap() {
        let o = ObstacleProxy::new("cone", Vec2::ZERO, 1.0);
        assert!(!o.contains(Vec2::new(1.0, 0.0)));
        assert!(o.contains(Vec2::new(0.99, 0.0)));
    }

    #[test]
    fn test_first_hit_uses_insertion_order() {
        let field = ObstacleField::new(vec![
            ObstacleProxy::new("a", Vec2::ZERO, 2.0),
            ObstacleProxy::new("b", Vec2::ZERO, 3.0),
        ])
        .unwrap();
        assert_eq!(field.first_hit(Vec2::ZERO).map(|o| o.name.as_str()), Some("a"));
        assert!(field.first_hit(Vec2::new(10.0, 0.0)).is_none());
    }
}
