use super::change_set::{attribute_path, ChangeSet, ChangeValue};
use super::color_convert;
use super::gamut::{self, GamutPolicy};
use super::light_state::{ColorMode, LightState};
use super::light_update::LightUpdate;
use super::registry::Light;
use crate::error::UpdateError;
use core::ops::RangeInclusive;
use log::{debug, warn};

const BRI_RANGE: RangeInclusive<i64> = 0..=255;
const HUE_RANGE: RangeInclusive<i64> = 0..=65535;
const SAT_RANGE: RangeInclusive<i64> = 0..=255;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub gamut_policy: GamutPolicy,
    /// Treat a zero brightness, hue or saturation as if the field was absent
    pub zero_is_unset: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            gamut_policy: GamutPolicy::Advisory,
            zero_is_unset: true,
        }
    }
}

fn check_range(name: &str, value: i64, range: &RangeInclusive<i64>) {
    if !range.contains(&value) {
        warn!(
            "{} {} is outside {}-{}, stored anyway",
            name,
            value,
            range.start(),
            range.end()
        );
    }
}

/// Applies updates to light states and reports what changed
pub struct LightStateController {
    config: ControllerConfig,
}

impl LightStateController {
    pub fn new(config: ControllerConfig) -> LightStateController {
        LightStateController { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn numeric(&self, value: Option<i64>) -> Option<i64> {
        value.filter(|v| !(self.config.zero_is_unset && *v == 0))
    }

    /// Apply a partial update.
    ///
    /// Fields are handled in the order on, bri, xy, hue, sat and the
    /// returned change set lists them in that order. The last color field
    /// written selects the color mode. The display color is recomputed
    /// afterwards.
    pub fn apply_update(
        &self,
        light_id: &str,
        state: &mut LightState,
        update: &LightUpdate,
    ) -> Result<ChangeSet, UpdateError> {
        // Hue or saturation in the same update takes over the color mode,
        // so the xy point is never rendered
        let hs_wins = self.numeric(update.hue).is_some() || self.numeric(update.sat).is_some();
        if let (GamutPolicy::Reject, Some([x, y]), false) =
            (self.config.gamut_policy, update.xy, hs_wins)
        {
            if !color_convert::is_within_gamut(gamut::lookup(&state.model), x, y) {
                return Err(UpdateError::OutOfGamut { x, y });
            }
        }

        let mut changes = ChangeSet::new();
        if let Some(on) = update.on {
            state.on = on;
            changes.push(attribute_path(light_id, "on"), ChangeValue::Bool(on));
        }

        if let Some(bri) = self.numeric(update.bri) {
            check_range("Brightness", bri, &BRI_RANGE);
            state.bri = bri;
            changes.push(attribute_path(light_id, "bri"), ChangeValue::Int(bri));
        }

        if let Some(xy) = update.xy {
            state.xy = xy;
            state.colormode = ColorMode::Xy;
            changes.push(attribute_path(light_id, "xy"), ChangeValue::Xy(xy));
        }

        if let Some(hue) = self.numeric(update.hue) {
            check_range("Hue", hue, &HUE_RANGE);
            state.hue = hue;
            state.colormode = ColorMode::HueSaturation;
            changes.push(attribute_path(light_id, "hue"), ChangeValue::Int(hue));
        }

        if let Some(sat) = self.numeric(update.sat) {
            check_range("Saturation", sat, &SAT_RANGE);
            state.sat = sat;
            state.colormode = ColorMode::HueSaturation;
            changes.push(attribute_path(light_id, "sat"), ChangeValue::Int(sat));
        }

        state.recompute_display_color(self.config.gamut_policy);
        debug!("Light {}: {}", light_id, changes);
        Ok(changes)
    }

    /// Set the name of a light. An empty name changes nothing.
    pub fn rename(&self, light_id: &str, light: &mut Light, name: &str) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if !name.is_empty() {
            light.name = name.to_string();
            changes.push(
                attribute_path(light_id, "name"),
                ChangeValue::Text(name.to_string()),
            );
        }
        changes
    }
}

impl Default for LightStateController {
    fn default() -> Self {
        LightStateController::new(ControllerConfig::default())
    }
}
