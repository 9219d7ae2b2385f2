//! Screen-space labels using egui for text rendering.
//!
//! Body names in the solar system, node names and plane captions in the
//! lunar scene, and sign glyphs on the zodiac carousel.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::MainCamera;
use crate::render::bodies::CelestialBody;
use crate::lunar::{LunarMarker, LunarState, plane_captions};
use crate::types::{ActiveScene, FrameSet};
use crate::zodiac::ZodiacSign;

/// Plugin providing label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .add_systems(Update, toggle_labels.in_set(FrameSet::Input))
            .add_systems(EguiPrimaryContextPass, draw_labels);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Whether labels are visible.
    pub visible: bool,
    /// Offset from the anchor in screen pixels.
    pub offset: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            offset: 15.0,
        }
    }
}

/// `L` shows or hides all labels.
fn toggle_labels(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<LabelSettings>) {
    if keys.just_pressed(KeyCode::KeyL) {
        settings.visible = !settings.visible;
        debug!("Labels {}", if settings.visible { "shown" } else { "hidden" });
    }
}

/// Draw labels for every visible labelled entity.
fn draw_labels(
    mut contexts: EguiContexts,
    settings: Res<LabelSettings>,
    scene: Res<ActiveScene>,
    lunar: Res<LunarState>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    bodies: Query<(&CelestialBody, &GlobalTransform, &InheritedVisibility)>,
    markers: Query<(&LunarMarker, &GlobalTransform, &InheritedVisibility)>,
    signs: Query<(&ZodiacSign, &GlobalTransform, &InheritedVisibility)>,
) {
    if !settings.visible {
        return;
    }
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut labels: Vec<(Vec3, String, f32)> = Vec::new();
    labels.extend(
        bodies
            .iter()
            .filter(|(_, _, v)| v.get())
            .map(|(body, t, _)| (t.translation(), body.id.name().to_string(), 14.0)),
    );
    labels.extend(
        markers
            .iter()
            .filter(|(_, _, v)| v.get())
            .map(|(marker, t, _)| (t.translation(), marker.label().to_string(), 14.0)),
    );
    if *scene == ActiveScene::LunarNodes {
        labels.extend(
            plane_captions(&lunar.geometry)
                .into_iter()
                .map(|(anchor, text)| (anchor, text, 12.0)),
        );
    }
    labels.extend(
        signs
            .iter()
            .filter(|(_, _, v)| v.get())
            .map(|(sign, t, _)| (t.translation(), format!("{} {}", sign.glyph(), sign.name()), 16.0)),
    );

    egui::Area::new(egui::Id::new("scene_labels"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();

            for (world_pos, text, size) in &labels {
                let Ok(screen_pos) = camera.world_to_viewport(camera_transform, *world_pos) else {
                    continue;
                };
                let label_pos = egui::pos2(
                    screen_pos.x + settings.offset,
                    screen_pos.y + settings.offset,
                );
                let font = egui::FontId::proportional(*size);

                // Shadow
                painter.text(
                    label_pos + egui::vec2(1.0, 1.0),
                    egui::Align2::LEFT_TOP,
                    text,
                    font.clone(),
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
                );

                painter.text(
                    label_pos,
                    egui::Align2::LEFT_TOP,
                    text,
                    font,
                    egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
                );
            }
        });
}
