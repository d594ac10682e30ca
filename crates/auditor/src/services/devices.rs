//! Device enumeration.

use std::sync::Arc;

use controller::{OperationalApi, OperationalCommand, Session};
use domain::models::Device;
use tracing::{info, warn};

use super::extract;

/// Lists the devices managed by the controller.
pub struct DeviceEnumerator {
    api: Arc<dyn OperationalApi>,
}

impl DeviceEnumerator {
    pub fn new(api: Arc<dyn OperationalApi>) -> Self {
        Self { api }
    }

    /// Connected devices, in controller order.
    ///
    /// Returns an empty list when the controller reports none or the listing fails; either way
    /// there is nothing to audit.
    pub async fn list_devices(&self, session: &Session) -> Vec<Device> {
        let response = match self
            .api
            .execute(session, OperationalCommand::ListDevices, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to list managed devices");
                return Vec::new();
            }
        };

        let devices = extract::devices(&response);
        info!(count = devices.len(), "Enumerated managed devices");
        devices
    }
}
