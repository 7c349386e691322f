use crate::error::BridgeError;
use crate::light_control::change_set::ChangeSet;
use crate::light_control::controller::{ControllerConfig, LightStateController};
use crate::light_control::light_update::LightUpdate;
use crate::light_control::registry::{Light, LightRegistry, LightSummary};
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;

/// Receives updated lights, e.g. to push them to the device
pub trait LightForwarder: Send {
    fn send_light(&mut self, id: &str, light: &Light);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall<'a> {
    ListLights,
    SetLightState { id: &'a str, payload: &'a Value },
    SetLightName { id: &'a str, name: &'a str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<'a> {
    Lights(&'a BTreeMap<String, LightSummary>),
    Changes(&'a ChangeSet),
}

/// Told about every successful API call and its response
pub trait ApiNotifier: Send {
    fn notify(&mut self, call: &ApiCall, response: &ApiResponse);
}

/// The light API of the bridge.
///
/// Owns the light registry and serializes all access to it.
pub struct Bridge {
    registry: LightRegistry,
    controller: LightStateController,
    forwarder: Option<Box<dyn LightForwarder>>,
    notifier: Option<Box<dyn ApiNotifier>>,
}

impl Bridge {
    pub fn new(registry: LightRegistry, config: ControllerConfig) -> Bridge {
        Bridge {
            registry,
            controller: LightStateController::new(config),
            forwarder: None,
            notifier: None,
        }
    }

    pub fn forwarder(mut self, forwarder: Box<dyn LightForwarder>) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    pub fn notifier(mut self, notifier: Box<dyn ApiNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    pub fn light(&self, id: &str) -> Option<&Light> {
        self.registry.get(id)
    }

    fn notify(&mut self, call: &ApiCall, response: &ApiResponse) {
        if let Some(notifier) = &mut self.notifier {
            notifier.notify(call, response);
        }
    }

    fn forward(&mut self, id: &str) {
        if let (Some(forwarder), Some(light)) = (&mut self.forwarder, self.registry.get(id)) {
            forwarder.send_light(id, light);
        }
    }

    /// Names of all lights keyed by id
    pub fn lights(&mut self) -> BTreeMap<String, LightSummary> {
        let lights = self.registry.summaries();
        self.notify(&ApiCall::ListLights, &ApiResponse::Lights(&lights));
        lights
    }

    pub fn set_light_state(&mut self, id: &str, payload: &Value) -> Result<ChangeSet, BridgeError> {
        let update = LightUpdate::from_json(payload)?;
        let light = self
            .registry
            .get_mut(id)
            .ok_or_else(|| BridgeError::UnknownLight(id.to_string()))?;
        let changes = self.controller.apply_update(id, &mut light.state, &update)?;
        info!("Updating light {}: color {}", id, light.state.display_color());

        self.forward(id);
        self.notify(
            &ApiCall::SetLightState { id, payload },
            &ApiResponse::Changes(&changes),
        );
        Ok(changes)
    }

    pub fn set_light_name(&mut self, id: &str, name: &str) -> Result<ChangeSet, BridgeError> {
        let light = self
            .registry
            .get_mut(id)
            .ok_or_else(|| BridgeError::UnknownLight(id.to_string()))?;
        let changes = self.controller.rename(id, light, name);
        if changes.is_empty() {
            debug!("Light {}: empty name ignored", id);
        } else {
            info!("Renamed light {} to {}", id, name);
            self.forward(id);
        }
        self.notify(
            &ApiCall::SetLightName { id, name },
            &ApiResponse::Changes(&changes),
        );
        Ok(changes)
    }
}
