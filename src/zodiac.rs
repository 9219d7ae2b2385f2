//! Zodiac carousel: twelve signs on a ring that slowly turns in the view
//! plane while each glyph stays upright.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::types::{ActiveScene, FrameSet, SessionClock};

/// Angular spacing between signs (30 degrees).
pub const SIGN_SPACING: f32 = TAU / 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }

    /// Display tint.
    pub fn color(&self) -> Color {
        match self {
            Element::Fire => Color::srgb(0.95, 0.45, 0.2),
            Element::Earth => Color::srgb(0.55, 0.75, 0.35),
            Element::Air => Color::srgb(0.8, 0.85, 0.95),
            Element::Water => Color::srgb(0.3, 0.55, 0.95),
        }
    }
}

/// The twelve signs, in ring order starting at +X.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "♈",
            ZodiacSign::Taurus => "♉",
            ZodiacSign::Gemini => "♊",
            ZodiacSign::Cancer => "♋",
            ZodiacSign::Leo => "♌",
            ZodiacSign::Virgo => "♍",
            ZodiacSign::Libra => "♎",
            ZodiacSign::Scorpio => "♏",
            ZodiacSign::Sagittarius => "♐",
            ZodiacSign::Capricorn => "♑",
            ZodiacSign::Aquarius => "♒",
            ZodiacSign::Pisces => "♓",
        }
    }

    pub fn dates(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "March 21 - April 19",
            ZodiacSign::Taurus => "April 20 - May 20",
            ZodiacSign::Gemini => "May 21 - June 20",
            ZodiacSign::Cancer => "June 21 - July 22",
            ZodiacSign::Leo => "July 23 - August 22",
            ZodiacSign::Virgo => "August 23 - September 22",
            ZodiacSign::Libra => "September 23 - October 22",
            ZodiacSign::Scorpio => "October 23 - November 21",
            ZodiacSign::Sagittarius => "November 22 - December 21",
            ZodiacSign::Capricorn => "December 22 - January 19",
            ZodiacSign::Aquarius => "January 20 - February 18",
            ZodiacSign::Pisces => "February 19 - March 20",
        }
    }

    pub fn element(&self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => {
                "Bold, ambitious, and energetic. Natural leaders who love challenges."
            }
            ZodiacSign::Taurus => {
                "Reliable, patient, and practical. Values stability and comfort."
            }
            ZodiacSign::Gemini => {
                "Curious, adaptable, and communicative. Quick-witted and versatile."
            }
            ZodiacSign::Cancer => {
                "Nurturing, intuitive, and protective. Deeply emotional and caring."
            }
            ZodiacSign::Leo => {
                "Confident, generous, and dramatic. Natural performers who love attention."
            }
            ZodiacSign::Virgo => {
                "Analytical, helpful, and perfectionist. Detail-oriented and practical."
            }
            ZodiacSign::Libra => {
                "Diplomatic, charming, and balanced. Seeks harmony and fairness."
            }
            ZodiacSign::Scorpio => {
                "Intense, passionate, and mysterious. Deeply intuitive and transformative."
            }
            ZodiacSign::Sagittarius => {
                "Adventurous, optimistic, and philosophical. Loves freedom and exploration."
            }
            ZodiacSign::Capricorn => {
                "Ambitious, disciplined, and responsible. Goal-oriented and practical."
            }
            ZodiacSign::Aquarius => {
                "Independent, innovative, and humanitarian. Visionary and unconventional."
            }
            ZodiacSign::Pisces => {
                "Compassionate, artistic, and intuitive. Dreamy and emotionally deep."
            }
        }
    }

    /// Angle of this sign on the unrotated ring, counter-clockwise from +X.
    pub fn base_angle(&self) -> f32 {
        self.index() as f32 * SIGN_SPACING
    }

    /// Position on the unrotated ring (XY plane).
    pub fn ring_position(&self, radius: f32) -> Vec3 {
        let (sin, cos) = self.base_angle().sin_cos();
        Vec3::new(radius * cos, radius * sin, 0.0)
    }

    /// Local Z rotation of the glyph on the unrotated ring.
    pub fn base_rotation(&self) -> f32 {
        -self.base_angle()
    }
}

/// Sign nearest the top of the screen for a ring rotated by `ring_angle`.
pub fn sign_at_top(ring_angle: f32) -> ZodiacSign {
    let steps = ((FRAC_PI_2 - ring_angle) / SIGN_SPACING).round() as i64;
    ZodiacSign::ALL[steps.rem_euclid(12) as usize]
}

/// Glyph rotation that cancels the ring rotation.
pub fn glyph_rotation(sign: ZodiacSign, ring_angle: f32) -> f32 {
    sign.base_rotation() - ring_angle
}

/// Current carousel rotation.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ZodiacCarousel {
    /// Ring rotation about +Z, in `[0, 2π)`.
    pub angle: f32,
}

impl ZodiacCarousel {
    pub fn advance(&mut self, spin_rate: f32, delta_secs: f32) {
        self.angle = (self.angle + spin_rate * delta_secs).rem_euclid(TAU);
    }

    pub fn top_sign(&self) -> ZodiacSign {
        sign_at_top(self.angle)
    }
}

/// Plugin turning the carousel while the zodiac scene is active.
pub struct ZodiacPlugin;

impl Plugin for ZodiacPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZodiacCarousel>().add_systems(
            Update,
            spin_carousel
                .in_set(FrameSet::Simulate)
                .run_if(resource_equals(ActiveScene::Zodiac)),
        );
    }
}

fn spin_carousel(
    clock: Res<SessionClock>,
    config: Res<SceneConfig>,
    mut carousel: ResMut<ZodiacCarousel>,
) {
    carousel.advance(config.zodiac.spin_rate, clock.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ring_positions() {
        let taurus = ZodiacSign::Taurus.ring_position(6.0);
        assert_relative_eq!(taurus.x, 5.196, epsilon = 1e-3);
        assert_relative_eq!(taurus.y, 3.0, epsilon = 1e-3);
        let cancer = ZodiacSign::Cancer.ring_position(6.0);
        assert_relative_eq!(cancer.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(cancer.y, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_elements_cycle() {
        assert_eq!(ZodiacSign::Aries.element(), Element::Fire);
        assert_eq!(ZodiacSign::Virgo.element(), Element::Earth);
        assert_eq!(ZodiacSign::Aquarius.element(), Element::Air);
        assert_eq!(ZodiacSign::Scorpio.element(), Element::Water);
    }

    #[test]
    fn test_sign_at_top_unrotated() {
        assert_eq!(sign_at_top(0.0), ZodiacSign::Cancer);
    }

    #[test]
    fn test_sign_at_top_moves_backward_as_ring_turns() {
        // Counter-clockwise rotation brings earlier signs up to the top
        assert_eq!(sign_at_top(SIGN_SPACING), ZodiacSign::Gemini);
        assert_eq!(sign_at_top(3.0 * SIGN_SPACING), ZodiacSign::Aries);
        assert_eq!(sign_at_top(4.0 * SIGN_SPACING), ZodiacSign::Pisces);
        assert_eq!(sign_at_top(TAU), ZodiacSign::Cancer);
    }

    #[test]
    fn test_glyph_world_rotation_constant() {
        for sign in ZodiacSign::ALL {
            for angle in [0.0, 0.7, 2.5, 5.9] {
                let world = angle + glyph_rotation(sign, angle);
                assert_relative_eq!(world, sign.base_rotation(), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_carousel_wraps() {
        let mut carousel = ZodiacCarousel::default();
        for _ in 0..1000 {
            carousel.advance(0.1, 0.1);
        }
        assert!(carousel.angle >= 0.0 && carousel.angle < TAU);
        assert_relative_eq!(carousel.angle, 10.0 - TAU, epsilon = 1e-3);
    }
}
