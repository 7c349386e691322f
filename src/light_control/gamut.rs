use core::str::FromStr;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// CIE 1931 chromaticity coordinate
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaPoint {
    pub x: f64,
    pub y: f64,
}

impl ChromaPoint {
    pub const fn new(x: f64, y: f64) -> ChromaPoint {
        ChromaPoint { x, y }
    }
}

/// Triangle of chromaticities a device can reproduce
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GamutEntry {
    pub red: ChromaPoint,
    pub green: ChromaPoint,
    pub blue: ChromaPoint,
}

pub const GAMUT_A: GamutEntry = GamutEntry {
    red: ChromaPoint::new(0.704, 0.296),
    green: ChromaPoint::new(0.2151, 0.7106),
    blue: ChromaPoint::new(0.138, 0.08),
};

// First generation Hue bulbs
pub const GAMUT_B: GamutEntry = GamutEntry {
    red: ChromaPoint::new(0.675, 0.322),
    green: ChromaPoint::new(0.4091, 0.518),
    blue: ChromaPoint::new(0.167, 0.04),
};

pub const GAMUT_C: GamutEntry = GamutEntry {
    red: ChromaPoint::new(0.692, 0.308),
    green: ChromaPoint::new(0.17, 0.7),
    blue: ChromaPoint::new(0.153, 0.048),
};

pub const DEFAULT_MODEL: &str = "LCT001";

static MODEL_GAMUTS: [(&str, GamutEntry); 23] = [
    ("LCT001", GAMUT_B),
    ("LCT002", GAMUT_B),
    ("LCT003", GAMUT_B),
    ("LCT007", GAMUT_B),
    ("LLM001", GAMUT_B),
    ("LLC001", GAMUT_A),
    ("LLC005", GAMUT_A),
    ("LLC006", GAMUT_A),
    ("LLC007", GAMUT_A),
    ("LLC010", GAMUT_A),
    ("LLC011", GAMUT_A),
    ("LLC012", GAMUT_A),
    ("LLC013", GAMUT_A),
    ("LLC014", GAMUT_A),
    ("LST001", GAMUT_A),
    ("LCT010", GAMUT_C),
    ("LCT011", GAMUT_C),
    ("LCT012", GAMUT_C),
    ("LCT014", GAMUT_C),
    ("LCT015", GAMUT_C),
    ("LCT016", GAMUT_C),
    ("LLC020", GAMUT_C),
    ("LST002", GAMUT_C),
];

fn find(model: &str) -> Option<&'static GamutEntry> {
    MODEL_GAMUTS
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, gamut)| gamut)
}

/// Gamut for a device model. Unknown models get the gamut of the default model.
pub fn lookup(model: &str) -> &'static GamutEntry {
    find(model).unwrap_or(&GAMUT_B)
}

pub fn is_known_model(model: &str) -> bool {
    find(model).is_some()
}

/// What to do with a requested chromaticity outside the gamut of the light
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GamutPolicy {
    /// Log it and convert the point as requested
    #[default]
    Advisory,
    /// Convert the closest reproducible point instead
    Clamp,
    /// Refuse the whole update, unless hue or saturation in the same
    /// update selects the hue/saturation mode
    Reject,
}

impl FromStr for GamutPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "advisory" => Ok(GamutPolicy::Advisory),
            "clamp" => Ok(GamutPolicy::Clamp),
            "reject" => Ok(GamutPolicy::Reject),
            _ => Err(format!("Unknown gamut policy '{s}'")),
        }
    }
}

impl fmt::Display for GamutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GamutPolicy::Advisory => "advisory",
            GamutPolicy::Clamp => "clamp",
            GamutPolicy::Reject => "reject",
        })
    }
}
