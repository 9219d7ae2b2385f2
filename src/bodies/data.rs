//! Static catalogue of the bodies shown in the solar-system scene.
//!
//! Distances and speeds are in scene units, compacted so the whole system
//! fits a single perspective view; they are not astronomical values.

/// Identifier for bodies in the visualization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    // Satellites
    Moon,
}

impl BodyId {
    /// Every body in the catalogue
    pub const ALL: [BodyId; 8] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Moon,
    ];

    /// Order used when cycling the focused body with the mouse wheel and when
    /// laying bodies out on the static rings.
    pub const FOCUS_ORDER: &'static [BodyId] = &[
        BodyId::Sun,
        BodyId::Mars,
        BodyId::Venus,
        BodyId::Mercury,
        BodyId::Earth,
        BodyId::Jupiter,
        BodyId::Saturn,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Earth => "Earth",
            BodyId::Mars => "Mars",
            BodyId::Jupiter => "Jupiter",
            BodyId::Saturn => "Saturn",
            BodyId::Moon => "Moon",
        }
    }

    /// Get the parent body (for satellites)
    pub fn parent(&self) -> Option<BodyId> {
        match self {
            BodyId::Moon => Some(BodyId::Earth),
            _ => None,
        }
    }

    /// The reference body sits at the origin and has no orbit.
    pub fn is_reference(&self) -> bool {
        matches!(self, BodyId::Sun)
    }

    /// Position within [`Self::FOCUS_ORDER`], if the body takes part in it.
    pub fn focus_index(&self) -> Option<usize> {
        Self::FOCUS_ORDER.iter().position(|id| id == self)
    }

    /// Step through the focus order, wrapping at both ends.
    ///
    /// Bodies outside the order (satellites) step relative to their parent.
    pub fn cycle_focus(&self, step: i32) -> BodyId {
        let anchor = self.parent().unwrap_or(*self);
        let index = anchor.focus_index().unwrap_or(0) as i32;
        let len = Self::FOCUS_ORDER.len() as i32;
        Self::FOCUS_ORDER[(index + step).rem_euclid(len) as usize]
    }
}

/// Parameters of a closed-form circular orbit around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParams {
    /// Orbit radius in scene units
    pub radius: f64,
    /// Angular speed in radians per second
    pub angular_speed: f64,
    /// Amplitude of the slow decorative vertical oscillation
    pub tilt_amplitude: f64,
}

/// Close-up framing used by the Individual camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Multiplier on the camera preset's follow distance
    pub factor: f32,
    /// Lower bound on the resulting distance
    pub min_distance: f32,
}

impl Framing {
    pub const DEFAULT: Framing = Framing {
        factor: 1.0,
        min_distance: 0.0,
    };

    /// Follow distance for this body given the preset distance.
    pub fn distance(&self, preset: f32) -> f32 {
        (preset * self.factor).max(self.min_distance)
    }
}

/// Descriptive text shown when a body is hovered or focused.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyInfo {
    pub description: &'static str,
    pub distance: &'static str,
    pub diameter: &'static str,
}

/// Static data for a body.
#[derive(Clone, Debug)]
pub struct BodyData {
    pub id: BodyId,
    /// Texture asset path (relative to the asset root)
    pub texture: &'static str,
    pub info: BodyInfo,
    /// None for the reference body and for satellites
    pub orbit: Option<OrbitParams>,
    /// Axial rotation in radians per second (negative = retrograde)
    pub spin_rate: f32,
    /// Rendering scale multiplier for the unit sphere mesh
    pub visual_scale: f32,
    pub framing: Framing,
    /// Approximate visual color, also the tint over the texture
    pub color: [f32; 3],
}

/// Heliocentric orbit parameters, without building the whole record.
pub const fn orbit_params(id: BodyId) -> Option<OrbitParams> {
    let (radius, angular_speed, tilt_amplitude) = match id {
        BodyId::Mercury => (3.5, 0.3, 0.02),
        BodyId::Venus => (4.5, 0.2, 0.05),
        BodyId::Earth => (5.5, 0.25, 0.0),
        BodyId::Mars => (6.0, 0.3, 0.1),
        BodyId::Jupiter => (7.5, 0.10, 0.3),
        BodyId::Saturn => (9.0, 0.17, 0.4),
        BodyId::Sun | BodyId::Moon => return None,
    };
    Some(OrbitParams {
        radius,
        angular_speed,
        tilt_amplitude,
    })
}

/// Get catalogue data for a body.
pub fn get_body_data(id: BodyId) -> BodyData {
    let orbit = orbit_params(id);
    match id {
        BodyId::Sun => BodyData {
            id,
            texture: "textures/8k_sun.jpg",
            info: BodyInfo {
                description: "The star at the center of our solar system. It's a nearly perfect sphere of hot plasma and provides the energy that sustains life on Earth.",
                distance: "Center of Solar System",
                diameter: "864,938 miles",
            },
            orbit,
            spin_rate: 0.02,
            visual_scale: 1.2,
            framing: Framing::DEFAULT,
            color: [1.0, 0.8, 0.3],
        },
        BodyId::Mercury => BodyData {
            id,
            texture: "textures/8k_mercury.jpg",
            info: BodyInfo {
                description: "The smallest planet and closest to the Sun. Mercury has extreme temperature variations from -290°F to 800°F.",
                distance: "36 million miles from Sun",
                diameter: "3,032 miles",
            },
            orbit,
            spin_rate: 0.06,
            visual_scale: 0.8,
            framing: Framing::DEFAULT,
            color: [0.6, 0.6, 0.6],
        },
        BodyId::Venus => BodyData {
            id,
            texture: "textures/8k_venus_surface.jpg",
            info: BodyInfo {
                description: "The hottest planet in our solar system with surface temperatures of 900°F. Venus rotates backwards compared to most planets.",
                distance: "67 million miles from Sun",
                diameter: "7,521 miles",
            },
            orbit,
            spin_rate: -0.05,
            visual_scale: 0.8,
            framing: Framing::DEFAULT,
            color: [0.9, 0.85, 0.7],
        },
        BodyId::Earth => BodyData {
            id,
            texture: "textures/earth.jpg",
            info: BodyInfo {
                description: "The third planet from the Sun and the only known planet to harbor life. Earth has a diverse climate and is 71% covered by water.",
                distance: "93 million miles from Sun",
                diameter: "7,918 miles",
            },
            orbit,
            spin_rate: 0.04,
            visual_scale: 0.8,
            framing: Framing::DEFAULT,
            color: [0.2, 0.5, 0.8],
        },
        BodyId::Mars => BodyData {
            id,
            texture: "textures/8k_mars.jpg",
            info: BodyInfo {
                description: "Known as the Red Planet due to iron oxide on its surface. Mars has the largest volcano and canyon in the solar system.",
                distance: "142 million miles from Sun",
                diameter: "4,212 miles",
            },
            orbit,
            spin_rate: 0.03,
            visual_scale: 0.8,
            framing: Framing {
                factor: 0.6,
                min_distance: 2.0,
            },
            color: [0.8, 0.4, 0.2],
        },
        BodyId::Jupiter => BodyData {
            id,
            texture: "textures/8k_jupiter.jpg",
            info: BodyInfo {
                description: "The largest planet in our solar system. Jupiter is a gas giant with a Great Red Spot storm larger than Earth.",
                distance: "484 million miles from Sun",
                diameter: "86,881 miles",
            },
            orbit,
            spin_rate: 0.07,
            visual_scale: 0.8,
            framing: Framing {
                factor: 0.8,
                min_distance: 3.0,
            },
            color: [0.8, 0.7, 0.6],
        },
        BodyId::Saturn => BodyData {
            id,
            texture: "textures/8k_saturn.jpg",
            info: BodyInfo {
                description: "Famous for its prominent ring system. Saturn is a gas giant and the least dense planet in our solar system.",
                distance: "886 million miles from Sun",
                diameter: "72,367 miles",
            },
            orbit,
            spin_rate: 0.06,
            visual_scale: 0.8,
            framing: Framing::DEFAULT,
            color: [0.9, 0.85, 0.6],
        },
        BodyId::Moon => BodyData {
            id,
            texture: "textures/8k_moon.jpg",
            info: BodyInfo {
                description: "Earth's only natural satellite. The Moon influences Earth's tides and has been a subject of human exploration. Rules Cancer in astrology.",
                distance: "238,855 miles from Earth",
                diameter: "2,159 miles",
            },
            orbit,
            spin_rate: 0.05,
            visual_scale: 0.3,
            framing: Framing::DEFAULT,
            color: [0.7, 0.7, 0.7],
        },
    }
}

/// Get data for every body in the catalogue.
pub fn all_bodies() -> Vec<BodyData> {
    BodyId::ALL.iter().map(|&id| get_body_data(id)).collect()
}
