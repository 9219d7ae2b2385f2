//! Scene configuration loaded from `assets/grahas.ron`.
//!
//! Every field has a default, so the file may list only what it overrides.
//! A missing file is normal; a malformed one is reported and ignored.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleTuning;

/// Default location of the configuration file.
pub const CONFIG_PATH: &str = "assets/grahas.ron";

/// Errors that can occur when loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value parsed but is outside its valid range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level scene configuration.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Camera smoothing.
    pub camera: CameraConfig,
    /// Drive-scene handling.
    pub vehicle: VehicleTuning,
    /// Zodiac carousel.
    pub zodiac: ZodiacConfig,
    /// Use the smaller lunar-node layout (for narrow windows).
    pub compact_layout: bool,
    /// Playback rate at startup.
    pub initial_time_scale: f64,
    /// Load body textures from the asset folder instead of flat colors.
    pub textures: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            vehicle: VehicleTuning::default(),
            zodiac: ZodiacConfig::default(),
            compact_layout: false,
            initial_time_scale: 1.0,
            textures: false,
        }
    }
}

/// Camera smoothing factors, as fractions per reference frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Position and FOV easing in the solar-system, lunar and zodiac scenes.
    pub damping: f32,
    /// Position easing of the chase camera.
    pub chase_damping: f32,
    /// FOV easing of the chase camera.
    pub chase_fov_damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            chase_damping: 0.06,
            chase_fov_damping: 0.05,
        }
    }
}

/// Zodiac carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZodiacConfig {
    /// Ring rotation speed (rad/s).
    pub spin_rate: f32,
    /// Ring radius in scene units.
    pub radius: f32,
}

impl Default for ZodiacConfig {
    fn default() -> Self {
        Self {
            spin_rate: 0.1,
            radius: 6.0,
        }
    }
}

impl SceneConfig {
    /// Parse from a RON string and validate.
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a pretty RON string.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::SerializeError)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_ron(&content)
    }

    /// Load from `path`, falling back to defaults.
    ///
    /// A missing file silently yields defaults; any other failure is logged.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded scene config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Reject values that would break the integrators.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |v: f32| v > 0.0 && v <= 1.0;
        if !unit(self.camera.damping)
            || !unit(self.camera.chase_damping)
            || !unit(self.camera.chase_fov_damping)
        {
            return Err(ConfigError::Invalid {
                field: "camera",
                reason: "damping factors must be in (0, 1]",
            });
        }
        let v = &self.vehicle;
        if !(v.friction > 0.0 && v.friction < 1.0) {
            return Err(ConfigError::Invalid {
                field: "vehicle.friction",
                reason: "must be in (0, 1)",
            });
        }
        if !(v.max_speed > 0.0
            && v.max_speed.is_finite()
            && v.max_reverse_speed > 0.0
            && v.max_reverse_speed.is_finite())
        {
            return Err(ConfigError::Invalid {
                field: "vehicle.max_speed",
                reason: "speed caps must be positive",
            });
        }
        if !(v.max_steer_angle > 0.0 && v.max_steer_angle < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid {
                field: "vehicle.max_steer_angle",
                reason: "must be in (0, pi/2)",
            });
        }
        let non_negative = [
            ("vehicle.acceleration", v.acceleration),
            ("vehicle.reverse_acceleration", v.reverse_acceleration),
            ("vehicle.brake", v.brake),
            ("vehicle.steering_sensitivity", v.steering_sensitivity),
            ("vehicle.steer_step", v.steer_step),
            ("vehicle.strafe_force", v.strafe_force),
            ("vehicle.brake_threshold", v.brake_threshold),
            ("vehicle.steer_threshold", v.steer_threshold),
            ("vehicle.bounce_perturbation", v.bounce_perturbation),
            ("vehicle.rest_threshold", v.rest_threshold),
            ("vehicle.hop_threshold", v.hop_threshold),
        ];
        for (field, value) in non_negative {
            // NaN fails the comparison too
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if !(0.0..=1.0).contains(&v.steer_return) {
            return Err(ConfigError::Invalid {
                field: "vehicle.steer_return",
                reason: "must be in [0, 1]",
            });
        }
        if !(v.wheel_radius > 0.0 && v.wheel_radius.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "vehicle.wheel_radius",
                reason: "must be positive",
            });
        }
        if !(self.zodiac.radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "zodiac.radius",
                reason: "must be positive",
            });
        }
        if !self.zodiac.spin_rate.is_finite() {
            return Err(ConfigError::Invalid {
                field: "zodiac.spin_rate",
                reason: "must be finite",
            });
        }
        if !(self.initial_time_scale > 0.0 && self.initial_time_scale.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "initial_time_scale",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Plugin inserting [`SceneConfig`] from disk.
pub struct ConfigPlugin {
    pub path: &'static str,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self { path: CONFIG_PATH }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SceneConfig>() {
            app.insert_resource(SceneConfig::load_or_default(Path::new(self.path)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.damping, 0.05);
        assert_eq!(config.vehicle.max_speed, 0.4);
        assert_eq!(config.zodiac.spin_rate, 0.1);
        assert!(!config.compact_layout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = SceneConfig::default();
        config.compact_layout = true;
        config.vehicle.friction = 0.9;
        let text = config.to_ron().unwrap();
        let parsed = SceneConfig::from_ron(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed = SceneConfig::from_ron("(compact_layout: true, camera: (damping: 0.1))").unwrap();
        assert!(parsed.compact_layout);
        assert_eq!(parsed.camera.damping, 0.1);
        assert_eq!(parsed.camera.chase_damping, 0.06);
        assert_eq!(parsed.vehicle, VehicleTuning::default());
    }

    #[test]
    fn test_parse_error() {
        let err = SceneConfig::from_ron("(compact_layout: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_friction_rejected() {
        let err = SceneConfig::from_ron("(vehicle: (friction: 1.5))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "vehicle.friction",
                ..
            }
        ));
    }

    fn invalid_field(config: &SceneConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_invalid_bounce_perturbation_rejected() {
        let err = SceneConfig::from_ron("(vehicle: (bounce_perturbation: -0.05))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "vehicle.bounce_perturbation",
                ..
            }
        ));

        let mut config = SceneConfig::default();
        config.vehicle.bounce_perturbation = f32::NAN;
        assert_eq!(invalid_field(&config), Some("vehicle.bounce_perturbation"));

        config.vehicle.bounce_perturbation = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_wheel_radius_rejected() {
        for radius in [0.0, -0.35, f32::NAN, f32::INFINITY] {
            let mut config = SceneConfig::default();
            config.vehicle.wheel_radius = radius;
            assert_eq!(invalid_field(&config), Some("vehicle.wheel_radius"), "{radius}");
        }
    }

    #[test]
    fn test_invalid_forces_rejected() {
        let mut config = SceneConfig::default();
        config.vehicle.acceleration = -0.018;
        assert_eq!(invalid_field(&config), Some("vehicle.acceleration"));

        let mut config = SceneConfig::default();
        config.vehicle.brake = f32::NAN;
        assert_eq!(invalid_field(&config), Some("vehicle.brake"));

        let mut config = SceneConfig::default();
        config.vehicle.strafe_force = -1.0;
        assert_eq!(invalid_field(&config), Some("vehicle.strafe_force"));
    }

    #[test]
    fn test_invalid_steer_return_rejected() {
        for steer_return in [-0.1, 1.5, f32::NAN] {
            let mut config = SceneConfig::default();
            config.vehicle.steer_return = steer_return;
            assert_eq!(invalid_field(&config), Some("vehicle.steer_return"), "{steer_return}");
        }
    }

    #[test]
    fn test_invalid_rest_threshold_rejected() {
        let err = SceneConfig::from_ron("(vehicle: (rest_threshold: -1e-4))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "vehicle.rest_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_speed_cap_rejected() {
        let mut config = SceneConfig::default();
        config.vehicle.max_reverse_speed = f32::INFINITY;
        assert_eq!(invalid_field(&config), Some("vehicle.max_speed"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = SceneConfig::load_or_default(Path::new("does/not/exist.ron"));
        assert_eq!(config, SceneConfig::default());
    }
}
