//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Icon text at a given size and color.
pub fn icon_colored(icon: &str, size: f32, color: egui::Color32) -> egui::RichText {
    egui::RichText::new(icon).size(size).color(color)
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
pub const CAMERA: &str = egui_phosphor::regular::CAMERA;
pub const KEYBOARD: &str = egui_phosphor::regular::KEYBOARD;
pub const INFO: &str = egui_phosphor::regular::INFO;
pub const WARNING: &str = egui_phosphor::regular::WARNING;

// Scenes and bodies
pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const MOON: &str = egui_phosphor::regular::MOON;
pub const ZODIAC: &str = egui_phosphor::regular::SHOOTING_STAR;
pub const CAR: &str = egui_phosphor::regular::CAR;
pub const GAUGE: &str = egui_phosphor::regular::GAUGE;

/// Icon shown next to a scene name.
pub fn scene_icon(scene: crate::types::ActiveScene) -> &'static str {
    use crate::types::ActiveScene;
    match scene {
        ActiveScene::SolarSystem => SUN,
        ActiveScene::LunarNodes => MOON,
        ActiveScene::Zodiac => ZODIAC,
        ActiveScene::Drive => CAR,
    }
}
