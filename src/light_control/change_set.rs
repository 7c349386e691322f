use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde_derive::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Bool(bool),
    Int(i64),
    Xy([f64; 2]),
    Text(String),
}

impl fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeValue::Bool(b) => write!(f, "{b}"),
            ChangeValue::Int(i) => write!(f, "{i}"),
            ChangeValue::Xy([x, y]) => write!(f, "[{x}, {y}]"),
            ChangeValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub path: String,
    pub value: ChangeValue,
}

/// Path of a light attribute as reported to API clients
pub fn attribute_path(light_id: &str, attribute: &str) -> String {
    format!("/lights/{light_id}/{attribute}")
}

/// Attributes changed by a single request, in the order they were applied.
///
/// Serializes as the bridge response `[{"success": {path: value}}, ...]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet(Vec<Change>);

impl ChangeSet {
    pub fn new() -> ChangeSet {
        ChangeSet(Vec::new())
    }

    pub fn push(&mut self, path: String, value: ChangeValue) {
        self.0.push(Change { path, value });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.0.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&ChangeValue> {
        self.0.iter().find(|c| c.path == path).map(|c| &c.value)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strs: Vec<String> = self
            .0
            .iter()
            .map(|c| format!("{} = {}", c.path, c.value))
            .collect();
        f.write_str(&strs.join(", "))
    }
}

struct Success<'a>(&'a Change);

impl serde::Serialize for Success<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.path, &self.0.value)?;
        map.end()
    }
}

impl serde::Serialize for Change {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("success", &Success(self))?;
        map.end()
    }
}

impl serde::Serialize for ChangeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for change in &self.0 {
            seq.serialize_element(change)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn bridge_response_format() {
        let mut changes = ChangeSet::new();
        changes.push(attribute_path("1", "on"), ChangeValue::Bool(true));
        changes.push(attribute_path("1", "bri"), ChangeValue::Int(100));
        changes.push(attribute_path("1", "xy"), ChangeValue::Xy([0.3, 0.3]));
        changes.push(
            attribute_path("1", "name"),
            ChangeValue::Text("Kitchen".to_string()),
        );
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!([
                {"success": {"/lights/1/on": true}},
                {"success": {"/lights/1/bri": 100}},
                {"success": {"/lights/1/xy": [0.3, 0.3]}},
                {"success": {"/lights/1/name": "Kitchen"}}
            ])
        );
    }

    #[test]
    fn empty() {
        let changes = ChangeSet::new();
        assert!(changes.is_empty());
        assert_eq!(serde_json::to_string(&changes).unwrap(), "[]");
    }

    #[test]
    fn display() {
        let mut changes = ChangeSet::new();
        changes.push(attribute_path("3", "on"), ChangeValue::Bool(false));
        changes.push(attribute_path("3", "hue"), ChangeValue::Int(400));
        assert_eq!(changes.to_string(), "/lights/3/on = false, /lights/3/hue = 400");
        assert_eq!(changes.get("/lights/3/hue"), Some(&ChangeValue::Int(400)));
        let values: Vec<&ChangeValue> = changes.iter().map(|c| &c.value).collect();
        assert_eq!(values, vec![&ChangeValue::Bool(false), &ChangeValue::Int(400)]);
    }
}
