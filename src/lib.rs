//! Grahas - Interactive Solar System
//!
//! A library crate providing the scene models (closed-form orbits, lunar
//! nodes, zodiac carousel, colony drive) and their Bevy plugins.

pub mod bodies;
pub mod camera;
pub mod config;
pub mod input;
pub mod lunar;
pub mod render;
pub mod time;
pub mod types;
pub mod ui;
pub mod vehicle;
pub mod zodiac;

use bevy::prelude::*;

/// Every scene's simulation, camera targeting and input handling, without
/// windowing or rendering. Configuration is loaded first so the other
/// plugins can read it while building; a [`config::SceneConfig`] inserted
/// beforehand takes precedence over the file.
pub struct SimulationPlugin {
    pub config_path: &'static str,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config_path: config::CONFIG_PATH,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(config::ConfigPlugin {
            path: self.config_path,
        })
        .init_resource::<bodies::SolarSystem>()
        .add_plugins((
            time::TimePlugin,
            camera::CameraPlugin,
            input::InputPlugin,
            lunar::LunarPlugin,
            zodiac::ZodiacPlugin,
            vehicle::VehiclePlugin,
        ));
    }
}
