//! UI module providing egui-based overlays.

mod hud;
pub mod icons;
mod info_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use hud::{HelpState, key_hints, scene_status};
pub use info_panel::{HoveredObject, InfoSubject, LUNAR_CONCEPT, info_subject};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .init_resource::<HelpState>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    hud::status_bar,
                    hud::speedometer,
                    hud::key_help,
                    info_panel::info_panel,
                    info_panel::lunar_concept_panel,
                )
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
