//! Info panel describing the hovered object, or the focused body in the
//! Individual view, plus the concept note shown in the lunar scene.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bodies::{BodyId, SolarSystem};
use crate::camera::{FocusedBody, ViewMode};
use crate::lunar::{LunarMarker, LunarState};
use crate::render::HoveredEntity;
use crate::types::ActiveScene;
use crate::zodiac::ZodiacSign;

use super::icons;

/// What the panel is describing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoSubject {
    Body(BodyId),
    Sign(ZodiacSign),
    Lunar(LunarMarker),
}

/// What the hovered entity is, if anything describable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoveredObject {
    pub body: Option<BodyId>,
    pub sign: Option<ZodiacSign>,
    pub marker: Option<LunarMarker>,
}

/// Pick the subject: hover wins, then the focused body in the Individual
/// view of the solar system.
pub fn info_subject(
    hovered: HoveredObject,
    scene: ActiveScene,
    view: ViewMode,
    focus: BodyId,
) -> Option<InfoSubject> {
    if let Some(sign) = hovered.sign {
        return Some(InfoSubject::Sign(sign));
    }
    if let Some(marker) = hovered.marker {
        return Some(InfoSubject::Lunar(marker));
    }
    if let Some(id) = hovered.body {
        return Some(InfoSubject::Body(id));
    }
    (scene == ActiveScene::SolarSystem && view == ViewMode::Individual)
        .then_some(InfoSubject::Body(focus))
}

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    hovered: Res<HoveredEntity>,
    scene: Res<ActiveScene>,
    view: Res<ViewMode>,
    focus: Res<FocusedBody>,
    system: Res<SolarSystem>,
    lunar: Res<LunarState>,
    signs: Query<&ZodiacSign>,
    markers: Query<&LunarMarker>,
) {
    let current = HoveredObject {
        body: hovered.entity.and_then(|e| system.get_id(e)),
        sign: hovered.entity.and_then(|e| signs.get(e).ok()).copied(),
        marker: hovered.entity.and_then(|e| markers.get(e).ok()).copied(),
    };

    let Some(subject) = info_subject(current, *scene, *view, focus.0) else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Info")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 56.0))
        .default_width(260.0)
        .frame(
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 230))
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| match subject {
            InfoSubject::Body(id) => {
                let Some(data) = system.get(id) else {
                    return;
                };
                let icon = match id {
                    BodyId::Sun => icons::SUN,
                    BodyId::Moon => icons::MOON,
                    _ => icons::PLANET,
                };
                ui.heading(format!("{icon} {}", id.name()));
                ui.add_space(4.0);
                ui.label(data.info.description);
                ui.add_space(8.0);
                ui.label(format!("Distance: {}", data.info.distance));
                ui.label(format!("Diameter: {}", data.info.diameter));
                if let Some(parent) = id.parent() {
                    ui.label(format!("Orbits: {}", parent.name()));
                }
            }
            InfoSubject::Sign(sign) => {
                ui.heading(format!("{} {}", sign.glyph(), sign.name()));
                ui.add_space(4.0);
                ui.label(format!("Dates: {}", sign.dates()));
                ui.label(format!("Element: {}", sign.element().name()));
                ui.add_space(8.0);
                ui.label(sign.description());
            }
            InfoSubject::Lunar(marker) => {
                let icon = match marker {
                    LunarMarker::Earth => icons::PLANET,
                    _ => icons::MOON,
                };
                ui.heading(format!("{icon} {}", marker.label()));
                ui.add_space(4.0);
                ui.label(marker.description(&lunar));
            }
        });
}

/// Standing note in the lunar scene explaining what the nodes are.
pub fn lunar_concept_panel(mut contexts: EguiContexts, scene: Res<ActiveScene>) {
    if *scene != ActiveScene::LunarNodes {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Vedic Astrology Concept")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 56.0))
        .default_width(240.0)
        .frame(
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 230))
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{} Vedic Astrology Concept", icons::INFO))
                    .strong()
                    .color(egui::Color32::from_rgb(255, 170, 0)),
            );
            ui.add_space(4.0);
            for line in LUNAR_CONCEPT {
                ui.label(*line);
            }
        });
}

/// Lines of the lunar concept note.
pub const LUNAR_CONCEPT: &[&str] = &[
    "Rahu & Ketu: the lunar nodes where the Moon's orbit intersects the ecliptic plane.",
    "Rahu: ascending node, the Moon crosses from south to north.",
    "Ketu: descending node, the Moon crosses from north to south.",
    "The nodes stay 180° apart and precess westward over 18.6 years.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hovered_sign_wins() {
        let hovered = HoveredObject {
            body: Some(BodyId::Mars),
            sign: Some(ZodiacSign::Leo),
            marker: None,
        };
        let subject = info_subject(
            hovered,
            ActiveScene::Zodiac,
            ViewMode::Overview,
            BodyId::Sun,
        );
        assert_eq!(subject, Some(InfoSubject::Sign(ZodiacSign::Leo)));
    }

    #[test]
    fn test_focus_shown_in_individual_view() {
        let subject = info_subject(
            HoveredObject::default(),
            ActiveScene::SolarSystem,
            ViewMode::Individual,
            BodyId::Saturn,
        );
        assert_eq!(subject, Some(InfoSubject::Body(BodyId::Saturn)));
    }

    #[test]
    fn test_nothing_in_overview_without_hover() {
        assert_eq!(
            info_subject(
                HoveredObject::default(),
                ActiveScene::SolarSystem,
                ViewMode::Overview,
                BodyId::Sun
            ),
            None
        );
        assert_eq!(
            info_subject(
                HoveredObject::default(),
                ActiveScene::Drive,
                ViewMode::Individual,
                BodyId::Sun
            ),
            None
        );
    }

    #[test]
    fn test_hovered_lunar_marker_described() {
        for marker in [LunarMarker::Rahu, LunarMarker::Ketu, LunarMarker::Moon] {
            let hovered = HoveredObject {
                marker: Some(marker),
                ..default()
            };
            assert_eq!(
                info_subject(hovered, ActiveScene::LunarNodes, ViewMode::Overview, BodyId::Sun),
                Some(InfoSubject::Lunar(marker))
            );
        }
    }

    #[test]
    fn test_concept_note_names_both_nodes() {
        let text = LUNAR_CONCEPT.join(" ");
        assert!(text.contains("Rahu"));
        assert!(text.contains("Ketu"));
        assert!(text.contains("ecliptic"));
    }
}
