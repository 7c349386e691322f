use crate::error::PayloadError;
use log::warn;
use serde_json::{Map, Value};

/// Partial update of a light state. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightUpdate {
    pub on: Option<bool>,
    pub bri: Option<i64>,
    pub xy: Option<[f64; 2]>,
    pub hue: Option<i64>,
    pub sat: Option<i64>,
}

fn field<'a, T, F>(obj: &'a Map<String, Value>, name: &str, extract: F) -> Option<T>
where
    F: FnOnce(&'a Value) -> Option<T>,
{
    let value = obj.get(name)?;
    let parsed = extract(value);
    if parsed.is_none() {
        warn!("Ignoring field {} with unexpected value {}", name, value);
    }
    parsed
}

fn xy_pair(value: &Value) -> Option<[f64; 2]> {
    match value.as_array()?.as_slice() {
        [x, y] => Some([x.as_f64()?, y.as_f64()?]),
        _ => None,
    }
}

impl LightUpdate {
    /// Extract the recognized fields from a JSON object.
    ///
    /// Unknown fields are ignored. So are recognized fields with a value of
    /// the wrong type, e.g. `"on": 1` or `"xy": [0.3]`.
    pub fn from_json(payload: &Value) -> Result<LightUpdate, PayloadError> {
        let obj = payload.as_object().ok_or(PayloadError::NotAnObject)?;
        Ok(LightUpdate {
            on: field(obj, "on", Value::as_bool),
            bri: field(obj, "bri", Value::as_i64),
            xy: field(obj, "xy", xy_pair),
            hue: field(obj, "hue", Value::as_i64),
            sat: field(obj, "sat", Value::as_i64),
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &LightUpdate::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_fields() {
        let update = LightUpdate::from_json(&json!({
            "on": false,
            "bri": 100,
            "xy": [0.3, 0.4],
            "hue": 1000,
            "sat": 200
        }))
        .unwrap();
        assert_eq!(
            update,
            LightUpdate {
                on: Some(false),
                bri: Some(100),
                xy: Some([0.3, 0.4]),
                hue: Some(1000),
                sat: Some(200),
            }
        );
    }

    #[test]
    fn unknown_and_malformed_fields() {
        let update = LightUpdate::from_json(&json!({
            "on": 0,
            "alert": "select",
            "bri": "high",
            "xy": [0.3],
            "hue": 12.5
        }))
        .unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let update = LightUpdate::from_json(&json!({"bri": 300, "hue": -5})).unwrap();
        assert_eq!(update.bri, Some(300));
        assert_eq!(update.hue, Some(-5));
    }

    #[test]
    fn integer_xy() {
        let update = LightUpdate::from_json(&json!({"xy": [0, 1]})).unwrap();
        assert_eq!(update.xy, Some([0.0, 1.0]));
    }

    #[test]
    fn not_an_object() {
        assert_eq!(
            LightUpdate::from_json(&json!([1, 2])),
            Err(PayloadError::NotAnObject)
        );
    }
}
