use super::color_convert::{self, Rgb};
use super::gamut::{self, GamutPolicy};
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Which set of color parameters decides the color of the light
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    #[serde(rename = "xy")]
    Xy,
    #[serde(rename = "hs")]
    HueSaturation,
    #[serde(rename = "ct")]
    ColorTemperature,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Xy => "xy",
            ColorMode::HueSaturation => "hs",
            ColorMode::ColorTemperature => "ct",
        })
    }
}

/// State of one light.
///
/// Numeric attributes are stored as requested, without range checks.
/// `color` is derived from the parameters of the active color mode and
/// the brightness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub on: bool,
    /// Brightness 0 - 255
    pub bri: i64,
    /// Hue 0 - 65535
    pub hue: i64,
    /// Saturation 0 - 255
    pub sat: i64,
    pub xy: [f64; 2],
    /// Color temperature in mired. Stored but never converted.
    pub ct: i64,
    pub colormode: ColorMode,
    #[serde(rename = "modelid")]
    pub model: String,
    color: Rgb,
}

impl LightState {
    pub fn new(model: &str) -> LightState {
        let mut state = LightState {
            on: true,
            bri: 254,
            hue: 8418,
            sat: 140,
            xy: [0.4573, 0.41],
            ct: 366,
            colormode: ColorMode::Xy,
            model: model.to_string(),
            color: Rgb::default(),
        };
        state.recompute_display_color(GamutPolicy::Advisory);
        state
    }

    /// Last computed color
    pub fn display_color(&self) -> Rgb {
        self.color
    }

    pub fn recompute_display_color(&mut self, policy: GamutPolicy) {
        let bri = self.bri as f64 / 255.0;
        match self.colormode {
            ColorMode::Xy => {
                let [x, y] = self.xy;
                let gamut = gamut::lookup(&self.model);
                let (x, y) = if color_convert::is_within_gamut(gamut, x, y) {
                    (x, y)
                } else {
                    warn!(
                        "Color ({}, {}) is outside the gamut of model {}",
                        x, y, self.model
                    );
                    match policy {
                        GamutPolicy::Clamp => {
                            let p = color_convert::closest_in_gamut(gamut, x, y);
                            (p.x, p.y)
                        }
                        GamutPolicy::Advisory | GamutPolicy::Reject => (x, y),
                    }
                };
                self.color = color_convert::xy_brightness_to_rgb(x, y, bri);
            }
            ColorMode::HueSaturation => {
                self.color = color_convert::hsb_to_rgb(
                    self.hue as f64 / 65535.0,
                    self.sat as f64 / 255.0,
                    bri,
                );
            }
            ColorMode::ColorTemperature => {
                // No conversion for color temperature, keep the old color
                debug!("Color temperature mode, color left at {}", self.color);
                return;
            }
        }
        debug!("New color {} from mode {}", self.color, self.colormode);
    }
}
