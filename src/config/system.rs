//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::actuator::ActuatorConfig;

/// Maximum number of actuators one configuration may describe.
pub const MAX_ACTUATORS: usize = 8;

/// Root configuration structure from TOML.
///
/// Each `[actuators.<key>]` table describes one joint. The controller only
/// ever reads its own entry; nothing here coordinates joints.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named actuator configurations.
    pub actuators: FnvIndexMap<String<32>, ActuatorConfig, MAX_ACTUATORS>,
}

impl SystemConfig {
    /// Get an actuator configuration by key.
    pub fn actuator(&self, key: &str) -> Option<&ActuatorConfig> {
        self.actuators
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// List all actuator keys.
    pub fn actuator_keys(&self) -> impl Iterator<Item = &str> {
        self.actuators.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            actuators: FnvIndexMap::new(),
        }
    }
}
