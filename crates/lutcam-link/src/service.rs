//! Service identity advertised by a link backend.

use serde::Deserialize;

/// Default advertised device name.
pub const DEFAULT_DEVICE_NAME: &str = "ESP32Camera";

/// GATT service UUID the companion app looks for.
pub const SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

/// Read/write/notify characteristic UUID.
pub const CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";

/// Characteristic value before the first notification.
pub const READY_MESSAGE: &str = "ESP32 Camera Ready!";

/// Identity of one advertised service.
///
/// Missing keys fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Advertised name
    pub device_name: String,
    /// Service UUID
    pub service_uuid: String,
    /// Characteristic UUID
    pub characteristic_uuid: String,
    /// Initial characteristic value
    pub initial_value: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            service_uuid: SERVICE_UUID.to_string(),
            characteristic_uuid: CHARACTERISTIC_UUID.to_string(),
            initial_value: READY_MESSAGE.to_string(),
        }
    }
}

impl ServiceInfo {
    /// Default service under another device name.
    pub fn named(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let info = ServiceInfo::default();
        assert_eq!(info.device_name, "ESP32Camera");
        assert_eq!(info.initial_value, READY_MESSAGE);
    }

    #[test]
    fn test_partial_yaml() {
        let info: ServiceInfo = serde_yaml::from_str("device_name: bench-cam\n").unwrap();
        assert_eq!(info, ServiceInfo::named("bench-cam"));
    }
}
