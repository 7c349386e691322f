use crate as hue;
use hue::light_control::change_set::ChangeValue;
use hue::light_control::color_convert;
use hue::light_control::controller::LightStateController;
use hue::light_control::light_state::{ColorMode, LightState};
use hue::light_control::light_update::LightUpdate;
use serde_json::json;

fn apply(ctrl: &LightStateController, state: &mut LightState, payload: serde_json::Value) -> Vec<String> {
    let update = LightUpdate::from_json(&payload).unwrap();
    ctrl.apply_update("1", state, &update)
        .unwrap()
        .paths()
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn update_order()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    state.colormode = ColorMode::HueSaturation;

    let update = LightUpdate::from_json(&json!({"xy": [0.3, 0.3], "bri": 100, "on": true})).unwrap();
    let changes = ctrl.apply_update("1", &mut state, &update).unwrap();
    assert_eq!(changes.paths(), vec!["/lights/1/on", "/lights/1/bri", "/lights/1/xy"]);
    assert_eq!(changes.get("/lights/1/xy"), Some(&ChangeValue::Xy([0.3, 0.3])));
    assert_eq!(state.colormode, ColorMode::Xy);
    assert_eq!(state.display_color(),
               color_convert::xy_brightness_to_rgb(0.3, 0.3, 100.0 / 255.0));
}

#[test]
fn all_fields_order()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    let paths = apply(&ctrl, &mut state,
                      json!({"sat": 20, "hue": 10, "xy": [0.4, 0.4], "bri": 5, "on": false}));
    assert_eq!(paths, vec!["/lights/1/on", "/lights/1/bri", "/lights/1/xy",
                           "/lights/1/hue", "/lights/1/sat"]);
    // Hue and saturation come after xy, so they win
    assert_eq!(state.colormode, ColorMode::HueSaturation);
    assert_eq!(state.display_color(),
               color_convert::hsb_to_rgb(10.0 / 65535.0, 20.0 / 255.0, 5.0 / 255.0));
}

#[test]
fn zero_hue_is_ignored()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    let before = state.clone();
    let paths = apply(&ctrl, &mut state, json!({"hue": 0}));
    assert!(paths.is_empty());
    assert_eq!(state.hue, before.hue);
    assert_eq!(state.colormode, ColorMode::Xy);
    assert_eq!(state.display_color(), before.display_color());
}

#[test]
fn zero_brightness_is_ignored()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    let before = state.clone();
    let paths = apply(&ctrl, &mut state, json!({"bri": 0}));
    assert!(paths.is_empty());
    assert_eq!(state.bri, 254);
    assert_eq!(state, before);
}

#[test]
fn off_stays_off()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    assert_eq!(apply(&ctrl, &mut state, json!({"on": false})), vec!["/lights/1/on"]);
    assert!(!state.on);
    assert_eq!(apply(&ctrl, &mut state, json!({"bri": 50})), vec!["/lights/1/bri"]);
    assert!(!state.on);
    assert_eq!(state.bri, 50);
}

#[test]
fn color_mode_switch()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    apply(&ctrl, &mut state, json!({"xy": [0.5, 0.4], "bri": 200}));
    assert_eq!(state.colormode, ColorMode::Xy);
    let xy_color = state.display_color();
    assert_eq!(xy_color, color_convert::xy_brightness_to_rgb(0.5, 0.4, 200.0 / 255.0));

    apply(&ctrl, &mut state, json!({"hue": 46920}));
    assert_eq!(state.colormode, ColorMode::HueSaturation);
    assert_eq!(state.display_color(),
               color_convert::hsb_to_rgb(46920.0 / 65535.0, 140.0 / 255.0, 200.0 / 255.0));
    assert_ne!(state.display_color(), xy_color);
    // The xy parameters are kept for later
    assert_eq!(state.xy, [0.5, 0.4]);

    apply(&ctrl, &mut state, json!({"xy": [0.5, 0.4]}));
    assert_eq!(state.display_color(), xy_color);
}

#[test]
fn brightness_follows_active_mode()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    apply(&ctrl, &mut state, json!({"hue": 12000, "sat": 254}));
    apply(&ctrl, &mut state, json!({"bri": 30}));
    assert_eq!(state.colormode, ColorMode::HueSaturation);
    assert_eq!(state.display_color(),
               color_convert::hsb_to_rgb(12000.0 / 65535.0, 254.0 / 255.0, 30.0 / 255.0));
}

#[test]
fn color_temperature_is_not_converted()
{
    let ctrl = LightStateController::default();
    let mut state = LightState::new("LCT001");
    state.colormode = ColorMode::ColorTemperature;
    let before = state.display_color();
    apply(&ctrl, &mut state, json!({"bri": 1, "on": true}));
    assert_eq!(state.bri, 1);
    assert_eq!(state.display_color(), before);
}
