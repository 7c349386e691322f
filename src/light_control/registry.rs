use super::gamut::{self, GamutPolicy};
use super::light_state::{ColorMode, LightState};
use log::{info, warn};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Light {
    pub name: String,
    pub state: LightState,
}

impl Light {
    pub fn new(name: &str, model: &str) -> Light {
        if !gamut::is_known_model(model) {
            warn!(
                "Light {}: unknown model {}, using the gamut of {}",
                name,
                model,
                gamut::DEFAULT_MODEL
            );
        }
        Light {
            name: name.to_string(),
            state: LightState::new(model),
        }
    }
}

/// What a light listing reports for each light
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightSummary {
    pub name: String,
}

/// Initial configuration of one light
#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    pub name: String,
    #[serde(default = "default_model")]
    pub modelid: String,
    #[serde(default)]
    pub colormode: Option<ColorMode>,
}

fn default_model() -> String {
    gamut::DEFAULT_MODEL.to_string()
}

/// Light configurations keyed by light id
pub type RegistryConfig = BTreeMap<String, LightConfig>;

/// All lights known to the bridge
#[derive(Debug, Clone, Default)]
pub struct LightRegistry {
    lights: BTreeMap<String, Light>,
}

impl LightRegistry {
    pub fn new() -> LightRegistry {
        LightRegistry {
            lights: BTreeMap::new(),
        }
    }

    /// Lights with ids "1" to `count`, all of the same model
    pub fn with_default_lights(count: usize, model: &str) -> LightRegistry {
        let mut registry = LightRegistry::new();
        for i in 1..=count {
            registry.add(&i.to_string(), Light::new(&format!("Hue Lamp {i}"), model));
        }
        registry
    }

    pub fn from_config(conf: &RegistryConfig) -> LightRegistry {
        let mut registry = LightRegistry::new();
        for (id, light_conf) in conf {
            let mut light = Light::new(&light_conf.name, &light_conf.modelid);
            if let Some(mode) = light_conf.colormode {
                light.state.colormode = mode;
                light.state.recompute_display_color(GamutPolicy::Advisory);
            }
            registry.add(id, light);
        }
        registry
    }

    /// Add a light, replacing any light with the same id
    pub fn add(&mut self, id: &str, light: Light) {
        info!("Adding light {} ({}, {})", id, light.name, light.state.model);
        self.lights.insert(id.to_string(), light);
    }

    pub fn get(&self, id: &str) -> Option<&Light> {
        self.lights.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Light> {
        self.lights.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lights.keys().map(|k| k.as_str())
    }

    pub fn summaries(&self) -> BTreeMap<String, LightSummary> {
        self.lights
            .iter()
            .map(|(id, light)| {
                (
                    id.clone(),
                    LightSummary {
                        name: light.name.clone(),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_lights() {
        let registry = LightRegistry::with_default_lights(3, "LCT001");
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(registry.get("2").unwrap().name, "Hue Lamp 2");
        assert!(registry.get("4").is_none());
    }

    #[test]
    fn unknown_model_uses_default_gamut() {
        let registry = LightRegistry::with_default_lights(1, "XYZ999");
        let state = &registry.get("1").unwrap().state;
        assert_eq!(state.model, "XYZ999");
        let reference = LightState::new(gamut::DEFAULT_MODEL);
        assert_eq!(state.display_color(), reference.display_color());
    }

    #[test]
    fn from_config() {
        let conf: RegistryConfig = serde_json::from_value(json!({
            "1": {"name": "Desk", "modelid": "LST001"},
            "2": {"name": "Hall"},
            "3": {"name": "Bed", "modelid": "XX", "colormode": "ct"}
        }))
        .unwrap();
        let registry = LightRegistry::from_config(&conf);
        assert_eq!(registry.get("1").unwrap().state.model, "LST001");
        assert_eq!(registry.get("2").unwrap().state.model, gamut::DEFAULT_MODEL);
        assert_eq!(
            registry.get("3").unwrap().state.colormode,
            ColorMode::ColorTemperature
        );
    }

    #[test]
    fn summaries() {
        let mut registry = LightRegistry::with_default_lights(2, "LCT001");
        registry.get_mut("1").unwrap().name = "Kitchen".to_string();
        assert_eq!(
            serde_json::to_value(registry.summaries()).unwrap(),
            json!({"1": {"name": "Kitchen"}, "2": {"name": "Hue Lamp 2"}})
        );
    }
}
