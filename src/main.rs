//! Grahas - Interactive Solar System
//!
//! A desktop visualization of an animated solar system, the precessing
//! lunar nodes, a zodiac carousel and a small driving scene.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use grahas::SimulationPlugin;
use grahas::render::RenderPlugin;
use grahas::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grahas".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Simulation first: rendering reads its resources at startup
        .add_plugins(SimulationPlugin::default())
        .add_plugins((RenderPlugin, UiPlugin))
        .run();
}
