//! Managed device domain model.

use serde::{Deserialize, Serialize};

/// A firewall managed by the controller.
///
/// Identity is the serial number; the remaining fields are display details as reported by the
/// controller at enumeration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial_number: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl Device {
    /// Creates a device with only the identifying fields set.
    ///
    /// An empty hostname falls back to the serial number so every device has something to show.
    pub fn new(serial_number: impl Into<String>, hostname: impl Into<String>) -> Self {
        let serial_number = serial_number.into();
        let hostname = hostname.into();
        let hostname = if hostname.trim().is_empty() {
            serial_number.clone()
        } else {
            hostname
        };
        Self {
            serial_number,
            hostname,
            model: None,
            ip_address: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_ip_address(mut self, ip_address: Option<String>) -> Self {
        self.ip_address = ip_address;
        self
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.serial_number == other.serial_number
    }
}

impl Eq for Device {}

impl std::hash::Hash for Device {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.serial_number.hash(state);
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.hostname, self.serial_number)
    }
}
