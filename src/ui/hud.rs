//! Heads-up overlays: scene/status bar, speedometer and key hints.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::camera::{CameraMode, FocusedBody, ViewMode};
use crate::config::SceneConfig;
use crate::lunar::{LunarState, LunarView};
use crate::types::{ActiveScene, SessionClock};
use crate::vehicle::Vehicle;
use crate::zodiac::ZodiacCarousel;

use super::icons;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(20, 20, 30, 220);

/// Whether the key-hint window is expanded.
#[derive(Resource)]
pub struct HelpState {
    pub open: bool,
}

impl Default for HelpState {
    fn default() -> Self {
        Self { open: true }
    }
}

/// Key bindings worth showing in a scene.
pub fn key_hints(scene: ActiveScene) -> &'static [(&'static str, &'static str)] {
    match scene {
        ActiveScene::SolarSystem => &[
            ("V", "Overview / individual view"),
            ("C", "Cycle camera mode"),
            ("Wheel", "Next planet (individual view)"),
            ("R", "Rahu-Ketu simulation"),
            ("Space", "Pause"),
            ("[ ]", "Slower / faster"),
            ("Home", "Rewind"),
            ("L", "Labels"),
            ("1-4", "Switch scene"),
        ],
        ActiveScene::LunarNodes => &[
            ("C", "Cycle lunar camera"),
            ("R / Esc", "Back to solar system"),
            ("L", "Labels"),
            ("Space", "Pause"),
            ("[ ]", "Slower / faster"),
            ("1-4", "Switch scene"),
        ],
        ActiveScene::Zodiac => &[
            ("Hover", "Sign details"),
            ("Space", "Pause"),
            ("1-4", "Switch scene"),
        ],
        ActiveScene::Drive => &[
            ("W / Up", "Accelerate"),
            ("S / Down", "Brake / reverse"),
            ("A D", "Steer"),
            ("Q E", "Strafe"),
            ("1-4", "Switch scene"),
        ],
    }
}

/// Scene-specific status line.
pub fn scene_status(
    scene: ActiveScene,
    mode: CameraMode,
    view: ViewMode,
    focus: &FocusedBody,
    lunar_view: LunarView,
    lunar: &LunarState,
    carousel: &ZodiacCarousel,
) -> String {
    match scene {
        ActiveScene::SolarSystem => match view {
            ViewMode::Overview => format!("{} | {}", view.name(), mode.name()),
            ViewMode::Individual => {
                format!("{} | {} | {}", view.name(), mode.name(), focus.0.name())
            }
        },
        ActiveScene::LunarNodes => format!(
            "{} | Rahu at {:.1}°",
            lunar_view.name(),
            lunar.nodal_longitude_deg()
        ),
        ActiveScene::Zodiac => format!("Rising: {}", carousel.top_sign().name()),
        ActiveScene::Drive => String::from("Colony roads"),
    }
}

/// Top status bar with scene, clock and mode.
#[allow(clippy::too_many_arguments)]
pub fn status_bar(
    mut contexts: EguiContexts,
    scene: Res<ActiveScene>,
    mut clock: ResMut<SessionClock>,
    mode: Res<CameraMode>,
    view: Res<ViewMode>,
    focus: Res<FocusedBody>,
    lunar_view: Res<LunarView>,
    lunar: Res<LunarState>,
    carousel: Res<ZodiacCarousel>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::top("status_bar")
        .frame(
            egui::Frame::NONE
                .fill(PANEL_FILL)
                .inner_margin(egui::Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} {}", icons::scene_icon(*scene), scene.name()))
                        .strong()
                        .size(16.0),
                );
                ui.separator();

                let icon = if clock.paused { icons::PLAY } else { icons::PAUSE };
                if ui
                    .button(icon)
                    .on_hover_text(if clock.paused { "Play (Space)" } else { "Pause (Space)" })
                    .clicked()
                {
                    clock.toggle_pause();
                }
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:.1}s  {}x",
                        icons::CLOCK,
                        clock.elapsed,
                        clock.scale
                    ))
                    .monospace(),
                );
                ui.separator();

                ui.label(format!(
                    "{} {}",
                    icons::CAMERA,
                    scene_status(
                        *scene,
                        *mode,
                        *view,
                        &focus,
                        *lunar_view,
                        &lunar,
                        &carousel
                    )
                ));
            });
        });
}

/// Speed readout and impact count for the drive scene.
pub fn speedometer(
    mut contexts: EguiContexts,
    scene: Res<ActiveScene>,
    vehicle: Res<Vehicle>,
    config: Res<SceneConfig>,
) {
    if *scene != ActiveScene::Drive {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let state = &vehicle.state;
    let moving = state.is_moving(&config.vehicle);
    egui::Area::new(egui::Id::new("speedometer"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(PANEL_FILL)
                .inner_margin(egui::Margin::symmetric(16, 12))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", icons::GAUGE, state.speed_readout()))
                            .size(28.0)
                            .strong()
                            .color(if moving {
                                egui::Color32::from_rgb(120, 220, 120)
                            } else {
                                egui::Color32::LIGHT_GRAY
                            }),
                    );
                    ui.label(if state.is_forward() || !moving { "Drive" } else { "Reverse" });
                    if vehicle.impacts > 0 {
                        ui.label(icons::icon_colored(
                            &format!("{} {} impacts", icons::WARNING, vehicle.impacts),
                            13.0,
                            egui::Color32::from_rgb(240, 180, 80),
                        ));
                    }
                });
        });
}

/// Collapsible key-hint window in the bottom-right corner.
pub fn key_help(mut contexts: EguiContexts, scene: Res<ActiveScene>, mut help: ResMut<HelpState>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("key_help"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(PANEL_FILL)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    if ui
                        .button(format!("{} Keys", icons::KEYBOARD))
                        .on_hover_text("Show or hide key bindings")
                        .clicked()
                    {
                        help.open = !help.open;
                    }
                    if !help.open {
                        return;
                    }
                    egui::Grid::new("key_hints").num_columns(2).show(ui, |ui| {
                        for (key, action) in key_hints(*scene) {
                            ui.label(egui::RichText::new(*key).monospace().strong());
                            ui.label(*action);
                            ui.end_row();
                        }
                    });
                });
        });
}
